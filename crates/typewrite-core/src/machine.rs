//! The typing state machine.
//!
//! ```text
//! Typing(w, 0) → … → Typing(w, len) → PauseAfterType(w)
//!     → Deleting(w, len) → … → Deleting(w, 0) → PauseAfterDelete(w)
//!     → Typing(next(w), 0) → …
//! ```
//!
//! The machine always sits *in* the state whose output is currently on
//! screen, so [`TypingMachine::displayed`] is derived from the state alone.

use crate::error::TypewriteError;
use crate::timing::Timings;
use crate::words::{WordList, char_len, prefix};
use serde::Serialize;
use std::time::Duration;

/// Which way the displayed text is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Typing,
    Deleting,
}

/// One of the four machine states (the word is `TypingState::word_index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Typing,
    PauseAfterType,
    Deleting,
    PauseAfterDelete,
}

impl Phase {
    /// Pause states hold the current text without writing anything.
    pub fn emits(self) -> bool {
        matches!(self, Phase::Typing | Phase::Deleting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Typing => "typing",
            Phase::PauseAfterType => "pause_after_type",
            Phase::Deleting => "deleting",
            Phase::PauseAfterDelete => "pause_after_delete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of the effect inside its word list.
///
/// `char_count` never exceeds the length of the word at `word_index`; it is
/// the word length in `PauseAfterType` and zero in `PauseAfterDelete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingState {
    pub word_index: usize,
    pub char_count: usize,
    pub phase: Phase,
}

impl TypingState {
    const INITIAL: Self = Self {
        word_index: 0,
        char_count: 0,
        phase: Phase::Typing,
    };

    /// Mode flips only at the two boundary counts: full length and zero.
    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::Typing | Phase::PauseAfterType => Mode::Typing,
            Phase::Deleting | Phase::PauseAfterDelete => Mode::Deleting,
        }
    }
}

/// Result of executing one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub word_index: usize,
    /// Text to write to the display, or `None` for a pause.
    pub text: Option<String>,
    /// How long to wait before the next step.
    pub delay: Duration,
}

/// Deterministic driver for one typing effect.
#[derive(Debug, Clone)]
pub struct TypingMachine {
    words: WordList,
    timings: Timings,
    state: TypingState,
    started: bool,
    steps: u64,
}

impl TypingMachine {
    /// Machine positioned at `Typing(words[0], 0)`.
    pub fn new(words: WordList, timings: Timings) -> Self {
        Self {
            words,
            timings,
            state: TypingState::INITIAL,
            started: false,
            steps: 0,
        }
    }

    /// Validate raw words and millisecond timings in one go.
    pub fn from_parts<I, S>(
        words: I,
        typing_ms: i64,
        deleting_ms: i64,
        pause_after_typed_ms: i64,
        pause_after_deleted_ms: i64,
    ) -> Result<Self, TypewriteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = WordList::new(words)?;
        let timings = Timings::from_millis(
            typing_ms,
            deleting_ms,
            pause_after_typed_ms,
            pause_after_deleted_ms,
        )?;
        Ok(Self::new(words, timings))
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Number of steps executed so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Word the machine is currently typing, holding, or deleting.
    pub fn current_word(&self) -> &str {
        self.words.get(self.state.word_index)
    }

    /// Text currently on screen.
    pub fn displayed(&self) -> &str {
        prefix(self.current_word(), self.state.char_count)
    }

    /// Steps needed to go once through every word and come back to the start.
    pub fn steps_per_pass(&self) -> u64 {
        // typing 0..=len, pause, deleting len..=0, pause
        self.words
            .iter()
            .map(|word| (char_len(word) as u64).saturating_mul(2).saturating_add(4))
            .fold(0, u64::saturating_add)
    }

    /// Time taken by one pass through the word list, saturating at
    /// [`Duration::MAX`].
    pub fn pass_duration(&self) -> Duration {
        let t = self.timings;
        self.words
            .iter()
            .map(|word| {
                let states = u32::try_from(char_len(word))
                    .unwrap_or(u32::MAX)
                    .saturating_add(1);
                t.typing
                    .saturating_mul(states)
                    .saturating_add(t.pause_after_typed)
                    .saturating_add(t.deleting.saturating_mul(states))
                    .saturating_add(t.pause_after_deleted)
            })
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Execute the current state and move to the next one.
    ///
    /// The first call executes the initial state itself.
    pub fn step(&mut self) -> Step {
        if self.started {
            self.state = self.transition();
        } else {
            self.started = true;
        }
        self.steps += 1;

        let TypingState {
            word_index, phase, ..
        } = self.state;
        let delay = match phase {
            Phase::Typing => self.timings.typing,
            Phase::PauseAfterType => self.timings.pause_after_typed,
            Phase::Deleting => self.timings.deleting,
            Phase::PauseAfterDelete => self.timings.pause_after_deleted,
        };
        let text = phase.emits().then(|| self.displayed().to_owned());

        Step {
            phase,
            word_index,
            text,
            delay,
        }
    }

    /// Iterator over emitted texts only. Never ends.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { machine: self }
    }

    fn transition(&self) -> TypingState {
        let TypingState {
            word_index,
            char_count,
            phase,
        } = self.state;
        let len = char_len(self.current_word());

        match phase {
            Phase::Typing if char_count < len => TypingState {
                char_count: char_count + 1,
                ..self.state
            },
            Phase::Typing => TypingState {
                char_count: len,
                phase: Phase::PauseAfterType,
                ..self.state
            },
            Phase::PauseAfterType => TypingState {
                char_count: len,
                phase: Phase::Deleting,
                ..self.state
            },
            Phase::Deleting if char_count > 0 => TypingState {
                char_count: char_count - 1,
                ..self.state
            },
            Phase::Deleting => TypingState {
                char_count: 0,
                phase: Phase::PauseAfterDelete,
                ..self.state
            },
            Phase::PauseAfterDelete => TypingState {
                word_index: self.words.next_index(word_index),
                char_count: 0,
                phase: Phase::Typing,
            },
        }
    }
}

/// Emitted texts of a [`TypingMachine`], skipping pauses.
pub struct Frames<'a> {
    machine: &'a mut TypingMachine,
}

impl Iterator for Frames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Every word passes through at least two emitting states, so this
        // loop runs at most twice.
        loop {
            if let Some(text) = self.machine.step().text {
                return Some(text);
            }
        }
    }
}
