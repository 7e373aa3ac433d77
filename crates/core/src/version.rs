//! Version tracking for optimistic concurrency.

use crate::error::{DomainError, DomainResult};

/// Entities carrying a monotonically increasing version counter.
///
/// A version of `None` means the entity was never persisted.
pub trait Versioned {
    fn version(&self) -> Option<u64>;

    fn set_version(&mut self, version: u64);
}

/// Optimistic concurrency expectation for a write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (imports, migrations, restores).
    Any,
    /// Require the stored entity to be at an exact version.
    Exact(u64),
    /// Require that no entity is stored yet.
    Absent,
}

impl ExpectedVersion {
    pub fn matches(self, actual: Option<u64>) -> bool {
        match (self, actual) {
            (ExpectedVersion::Any, _) => true,
            (ExpectedVersion::Exact(v), Some(a)) => v == a,
            (ExpectedVersion::Absent, None) => true,
            _ => false,
        }
    }

    pub fn check(self, actual: Option<u64>) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual:?})"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_matches_everything() {
        assert!(ExpectedVersion::Any.matches(None));
        assert!(ExpectedVersion::Any.matches(Some(7)));
    }

    #[test]
    fn exact_requires_same_version() {
        assert!(ExpectedVersion::Exact(3).matches(Some(3)));
        assert!(!ExpectedVersion::Exact(3).matches(Some(4)));
        assert!(!ExpectedVersion::Exact(3).matches(None));
    }

    #[test]
    fn absent_requires_no_stored_entity() {
        assert!(ExpectedVersion::Absent.matches(None));
        assert!(!ExpectedVersion::Absent.matches(Some(1)));
    }

    #[test]
    fn check_reports_conflict() {
        let err = ExpectedVersion::Exact(1).check(Some(2)).unwrap_err();
        match err {
            DomainError::Conflict(msg) => assert!(msg.contains("Exact(1)")),
            other => panic!("Expected Conflict, got {other:?}"),
        }
    }
}
