//! Entity trait: identity + continuity across state changes.

use crate::id::TenantId;

/// Entity marker + minimal interface.
///
/// Entities start out empty (no identifier, no tenant) and are populated
/// through their setters, so every accessor here is optional.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Returns the owning tenant, if one has been assigned.
    fn tenant_id(&self) -> Option<TenantId>;

    /// Creation timestamp in epoch milliseconds.
    fn created_time(&self) -> Option<i64>;
}
