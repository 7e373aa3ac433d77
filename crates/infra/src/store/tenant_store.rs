use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use devicehub_core::{DomainResult, TenantId};

/// Tenant-isolated key/value store for entities.
///
/// Records of different tenants never see each other: every operation is
/// scoped by the tenant it is given.
pub trait TenantStore<K, V>: Send + Sync {
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V>;
    fn upsert(&self, tenant_id: TenantId, key: K, value: V);
    fn list(&self, tenant_id: TenantId) -> Vec<V>;
    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V>;

    /// Read-modify-write a single record under one write lock.
    ///
    /// `f` sees the current value (if any); its `Ok` result is stored and
    /// returned, an `Err` leaves the record untouched.
    fn update(
        &self,
        tenant_id: TenantId,
        key: K,
        f: &mut dyn FnMut(Option<&V>) -> DomainResult<V>,
    ) -> DomainResult<V>;

    /// Clear all records for a tenant.
    fn clear_tenant(&self, tenant_id: TenantId);
    /// Clear every record of every tenant.
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> TenantStore<K, V> for Arc<S>
where
    S: TenantStore<K, V> + ?Sized,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        (**self).get(tenant_id, key)
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) {
        (**self).upsert(tenant_id, key, value)
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        (**self).list(tenant_id)
    }

    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        (**self).remove(tenant_id, key)
    }

    fn update(
        &self,
        tenant_id: TenantId,
        key: K,
        f: &mut dyn FnMut(Option<&V>) -> DomainResult<V>,
    ) -> DomainResult<V> {
        (**self).update(tenant_id, key, f)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        (**self).clear_tenant(tenant_id)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory tenant-isolated store for tests/dev.
///
/// A poisoned lock is recovered rather than propagated: the map holds plain
/// values, so a panicking writer cannot leave it half-updated.
#[derive(Debug)]
pub struct InMemoryTenantStore<K, V> {
    pub(crate) inner: RwLock<HashMap<(TenantId, K), V>>,
}

impl<K, V> InMemoryTenantStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryTenantStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TenantStore<K, V> for InMemoryTenantStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&(tenant_id, key.clone())).cloned()
    }

    fn upsert(&self, tenant_id: TenantId, key: K, value: V) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert((tenant_id, key), value);
    }

    fn list(&self, tenant_id: TenantId) -> Vec<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.iter()
            .filter_map(|((t, _k), v)| if *t == tenant_id { Some(v.clone()) } else { None })
            .collect()
    }

    fn remove(&self, tenant_id: TenantId, key: &K) -> Option<V> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&(tenant_id, key.clone()))
    }

    fn update(
        &self,
        tenant_id: TenantId,
        key: K,
        f: &mut dyn FnMut(Option<&V>) -> DomainResult<V>,
    ) -> DomainResult<V> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let slot = (tenant_id, key);
        let next = f(map.get(&slot))?;
        map.insert(slot, next.clone());
        Ok(next)
    }

    fn clear_tenant(&self, tenant_id: TenantId) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.retain(|(t, _k), _v| *t != tenant_id);
    }

    fn clear(&self) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }

    fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }
}
