//! Error types for the engine crate.

/// Errors from building a search policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// The difficulty name matched no tier.
    #[error("unknown difficulty: \"{found}\" (expected beginner, intermediate, advanced or expert)")]
    UnknownDifficulty {
        /// The rejected text.
        found: String,
    },
}
