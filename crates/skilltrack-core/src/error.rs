//! Core error types.
//!
//! Every fallible [`SkillStore`](crate::SkillStore) operation surfaces errors
//! through [`CoreError`]. A failed mutation never leaves the store half
//! updated: the in-memory list, the persisted slot and the change bus are all
//! untouched.

/// Unified error type for the skilltrack core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    // -- Lookup errors ------------------------------------------------------
    /// No skill with this identifier (or identifier prefix) exists.
    #[error("skill not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// A skill with this identifier is already in the store.
    #[error("duplicate skill id: {id}")]
    DuplicateId { id: String },

    // -- Validation errors --------------------------------------------------
    /// The skill name is empty or only whitespace.
    #[error("skill name must not be empty")]
    InvalidName,

    /// A category or level tag could not be parsed.
    #[error("unknown {kind}: `{value}`")]
    UnknownTag { kind: &'static str, value: String },

    // -- Persistence errors -------------------------------------------------
    /// The persistence adapter failed. Adapters flatten their own error type
    /// into a message so the core stays storage-agnostic.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The persisted record list could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the core crate.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Build a [`CoreError::NotFound`] from anything printable.
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Whether this error is a lookup miss rather than a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
