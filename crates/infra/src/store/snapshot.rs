//! JSON snapshots of an in-memory store.
//!
//! A snapshot is a JSON array of `{tenantId, key, value}` records, so a store
//! can be dumped to bytes and rebuilt later with every entity intact.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use devicehub_core::{DomainResult, TenantId};

use super::tenant_store::InMemoryTenantStore;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordRef<'a, K, V> {
    tenant_id: TenantId,
    key: &'a K,
    value: &'a V,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record<K, V> {
    tenant_id: TenantId,
    key: K,
    value: V,
}

impl<K, V> InMemoryTenantStore<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Serialize every record of every tenant.
    pub fn snapshot(&self) -> DomainResult<Vec<u8>> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let records: Vec<RecordRef<'_, K, V>> = map
            .iter()
            .map(|((tenant_id, key), value)| RecordRef {
                tenant_id: *tenant_id,
                key,
                value,
            })
            .collect();
        let bytes = serde_json::to_vec(&records)?;
        info!(records = records.len(), bytes = bytes.len(), "store snapshot taken");
        Ok(bytes)
    }

    /// Rebuild a store from [`InMemoryTenantStore::snapshot`] output.
    ///
    /// Malformed input is `DomainError::CorruptPayload`.
    pub fn restore(bytes: &[u8]) -> DomainResult<Self> {
        let records: Vec<Record<K, V>> = serde_json::from_slice(bytes)?;
        let count = records.len();
        let map: HashMap<(TenantId, K), V> = records
            .into_iter()
            .map(|r| ((r.tenant_id, r.key), r.value))
            .collect();
        info!(records = count, "store restored from snapshot");
        Ok(Self {
            inner: RwLock::new(map),
        })
    }
}
