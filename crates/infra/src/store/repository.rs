use std::marker::PhantomData;

use tracing::debug;

use devicehub_core::{
    CustomerId, DeviceId, DomainError, DomainResult, Entity, ExpectedVersion, TenantId, Versioned,
};
use devicehub_entities::{Customer, Device};

use super::tenant_store::{InMemoryTenantStore, TenantStore};

/// Versioned entity repository over a tenant-isolated store.
///
/// Every successful save bumps the stored version by one (first save -> 1)
/// and returns the entity as stored.
#[derive(Debug)]
pub struct EntityRepository<E, S> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

pub type DeviceRepository = EntityRepository<Device, InMemoryTenantStore<DeviceId, Device>>;

pub type CustomerRepository = EntityRepository<Customer, InMemoryTenantStore<CustomerId, Customer>>;

impl<E, S> EntityRepository<E, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<E, S> Default for EntityRepository<E, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<E, S> EntityRepository<E, S>
where
    E: Entity + Versioned + Clone,
    S: TenantStore<E::Id, E>,
{
    /// Save `entity` if the stored version matches `expected`.
    pub fn save(&self, entity: &E, expected: ExpectedVersion) -> DomainResult<E> {
        let id = entity
            .id()
            .ok_or_else(|| DomainError::validation("entity id is required"))?;
        let tenant_id = entity
            .tenant_id()
            .ok_or_else(|| DomainError::validation("tenant id is required"))?;

        let saved = self.store.update(tenant_id, id, &mut |current| {
            let actual = current.map(|stored| stored.version().unwrap_or_default());
            if let Err(err) = expected.check(actual) {
                debug!(%tenant_id, ?id, ?expected, ?actual, "rejected stale write");
                return Err(err);
            }
            let mut next = entity.clone();
            next.set_version(actual.map_or(1, |v| v + 1));
            Ok(next)
        })?;

        debug!(%tenant_id, ?id, version = ?saved.version(), "entity saved");
        Ok(saved)
    }

    pub fn find_by_id(&self, tenant_id: TenantId, id: E::Id) -> Option<E> {
        self.store.get(tenant_id, &id)
    }

    /// Like [`EntityRepository::find_by_id`] but a missing entity is `DomainError::NotFound`.
    pub fn get(&self, tenant_id: TenantId, id: E::Id) -> DomainResult<E> {
        self.find_by_id(tenant_id, id)
            .ok_or_else(DomainError::not_found)
    }

    pub fn find_by_tenant(&self, tenant_id: TenantId) -> Vec<E> {
        self.store.list(tenant_id)
    }

    pub fn delete(&self, tenant_id: TenantId, id: E::Id) -> DomainResult<E> {
        let removed = self.store.remove(tenant_id, &id).ok_or_else(DomainError::not_found)?;
        debug!(%tenant_id, ?id, "entity deleted");
        Ok(removed)
    }

    pub fn clear_tenant(&self, tenant_id: TenantId) {
        self.store.clear_tenant(tenant_id);
    }
}
