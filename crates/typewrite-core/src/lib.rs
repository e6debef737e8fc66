//! # Typewrite Core
//!
//! A typewriter text effect: each word in a list is typed out one character
//! at a time, held, deleted one character at a time, held again, and then the
//! next word starts. After the last word the list wraps around, forever.
//!
//! This crate is **clock-free**: it never sleeps and never touches a display.
//! [`TypingMachine::step`] returns the text to show (if any) and the delay
//! before the next step; a host (see `typewrite-runtime`) does the waiting.
//!
//! ## Architecture
//!
//! ```text
//! EffectConfig        ← TOML file + overrides, unvalidated
//!     │ build()
//! WordList + Timings  ← validated at construction, never at step time
//!     │
//! TypingMachine       ← Typing → PauseAfterType → Deleting → PauseAfterDelete
//!     │ step()
//! Step / TraceFrame   ← what to display, how long to wait
//! ```

pub mod config;
pub mod error;
pub mod machine;
pub mod timing;
pub mod trace;
pub mod words;

pub use config::{ConfigError, DEFAULT_CONFIG_PATH, DisplayConfig, EffectConfig, TimingConfig};
pub use error::TypewriteError;
pub use machine::{Frames, Mode, Phase, Step, TypingMachine, TypingState};
pub use timing::Timings;
pub use trace::{MAX_TRACE_STEPS, TraceFrame, trace_cycles, trace_frames};
pub use words::WordList;
