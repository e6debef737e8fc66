//! Validated step timings.

use crate::error::TypewriteError;
use std::time::Duration;

/// The four delays that pace the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Wait after each character appears (including the empty prefix).
    pub typing: Duration,
    /// Wait after each character is removed (including the full word).
    pub deleting: Duration,
    /// Extra hold once a word is fully typed.
    pub pause_after_typed: Duration,
    /// Extra hold once a word is fully deleted.
    pub pause_after_deleted: Duration,
}

impl Timings {
    /// Build timings from signed millisecond values.
    ///
    /// Zero is accepted; any negative value is rejected with the name of the
    /// offending field.
    pub fn from_millis(
        typing_ms: i64,
        deleting_ms: i64,
        pause_after_typed_ms: i64,
        pause_after_deleted_ms: i64,
    ) -> Result<Self, TypewriteError> {
        Ok(Self {
            typing: non_negative("typing_ms", typing_ms)?,
            deleting: non_negative("deleting_ms", deleting_ms)?,
            pause_after_typed: non_negative("pause_after_typed_ms", pause_after_typed_ms)?,
            pause_after_deleted: non_negative("pause_after_deleted_ms", pause_after_deleted_ms)?,
        })
    }
}

fn non_negative(field: &'static str, value_ms: i64) -> Result<Duration, TypewriteError> {
    u64::try_from(value_ms)
        .map(Duration::from_millis)
        .map_err(|_| TypewriteError::NegativeDuration { field, value_ms })
}
