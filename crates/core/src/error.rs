//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic failures of the entity model (validation, identifier
/// parsing, version conflicts, unreadable payloads). Storage concerns map onto
/// the same variants so callers only match one error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an entity saved without a tenant).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (parse failure or wrong entity type).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (stale version / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An entity was addressed through a tenant it does not belong to.
    #[error("tenant mismatch: {0}")]
    TenantMismatch(String),

    /// Stored bytes could not be decoded into their structured form.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn tenant_mismatch(msg: impl Into<String>) -> Self {
        Self::TenantMismatch(msg.into())
    }

    pub fn corrupt_payload(msg: impl Into<String>) -> Self {
        Self::CorruptPayload(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::CorruptPayload(value.to_string())
    }
}
