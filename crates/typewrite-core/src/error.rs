//! Error types for constructing a typing effect.

/// Errors raised while validating a typing-effect configuration.
///
/// Configuration variants are produced at construction time. A machine that
/// was built successfully never fails while stepping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypewriteError {
    /// The word list has no entries.
    #[error("word list is empty; at least one word is required")]
    EmptyWordList,

    /// A duration was configured below zero.
    #[error("{field} must be non-negative, got {value_ms}ms")]
    NegativeDuration { field: &'static str, value_ms: i64 },

    /// A trace was requested that is longer than [`crate::trace::MAX_TRACE_STEPS`].
    #[error("requested trace is too long: {requested} exceeds the limit of {limit}")]
    TraceTooLong { requested: String, limit: u64 },
}
