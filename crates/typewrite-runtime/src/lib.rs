//! Runtime for typing effects.
//!
//! `typewrite-core` decides *what* to show; this crate decides *when*. A
//! [`TypingEffect`] runs one [`typewrite_core::TypingMachine`] as a single
//! tokio task, writing every emitted prefix into a [`TextSink`] and sleeping
//! for the step's delay in between.
//!
//! Stopping is explicit: [`TypingEffect::stop`] (or any cloned
//! [`StopHandle`]) guarantees the sink is never written again, even when a
//! delay is still pending.

mod effect;
mod sink;
mod stop;

pub use effect::{EffectError, RunSummary, StopReason, TypingEffect};
pub use sink::{Recorder, SharedText, TerminalLine, TextSink};
pub use stop::StopHandle;
