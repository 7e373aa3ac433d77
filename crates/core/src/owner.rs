//! Owner resolution: which entity effectively owns a tenant-scoped record.

use crate::id::{CustomerId, EntityId, TenantId};

/// Entities that can report their effective owner.
pub trait HasOwnerId {
    /// The effective owner, or `None` while no tenant has been assigned.
    fn owner_id(&self) -> Option<EntityId>;
}

/// Resolve the effective owner from a tenant/customer pair.
///
/// The customer owns the record when it is assigned and is not the reserved
/// "unset" identifier; otherwise ownership falls back to the tenant.
pub fn resolve_owner(tenant_id: Option<TenantId>, customer_id: Option<CustomerId>) -> Option<EntityId> {
    match customer_id {
        Some(customer_id) if !customer_id.is_null_uid() => Some(customer_id.into()),
        _ => tenant_id.map(EntityId::from),
    }
}
