//! Display surfaces an effect can write into.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// The output boundary of a typing effect.
///
/// Receives the full text to show on every emitting step. The effect never
/// reads it back. An error means the surface is gone and stops the effect.
pub trait TextSink {
    fn display(&mut self, text: &str) -> io::Result<()>;
}

impl<T: TextSink + ?Sized> TextSink for Box<T> {
    fn display(&mut self, text: &str) -> io::Result<()> {
        (**self).display(text)
    }
}

/// A single shared text slot, readable from outside the effect.
#[derive(Debug, Clone, Default)]
pub struct SharedText {
    inner: Arc<Mutex<SlotState>>,
}

#[derive(Debug, Default)]
struct SlotState {
    text: String,
    writes: u64,
}

impl SharedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn get(&self) -> String {
        self.lock().text.clone()
    }

    /// How many times the effect has written the slot.
    pub fn writes(&self) -> u64 {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TextSink for SharedText {
    fn display(&mut self, text: &str) -> io::Result<()> {
        let mut slot = self.lock();
        slot.text.clear();
        slot.text.push_str(text);
        slot.writes += 1;
        Ok(())
    }
}

/// Keeps every written frame, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    frames: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TextSink for Recorder {
    fn display(&mut self, text: &str) -> io::Result<()> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
        Ok(())
    }
}

/// Rewrites one terminal line in place: `\r`, the decorated text, then an
/// erase-to-end-of-line escape.
#[derive(Debug)]
pub struct TerminalLine<W: Write> {
    out: W,
    prefix: String,
    suffix: String,
    caret: String,
}

const ERASE_TO_EOL: &str = "\x1b[K";

impl<W: Write> TerminalLine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prefix: String::new(),
            suffix: String::new(),
            caret: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Marker drawn right after the animated text.
    pub fn with_caret(mut self, caret: impl Into<String>) -> Self {
        self.caret = caret.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextSink for TerminalLine<W> {
    fn display(&mut self, text: &str) -> io::Result<()> {
        write!(
            self.out,
            "\r{}{}{}{}{ERASE_TO_EOL}",
            self.prefix, text, self.caret, self.suffix
        )?;
        self.out.flush()
    }
}
