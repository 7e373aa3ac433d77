//! Tenant-isolated entity storage.

pub mod repository;
pub mod snapshot;
pub mod tenant_store;

pub use repository::{CustomerRepository, DeviceRepository, EntityRepository};
pub use tenant_store::{InMemoryTenantStore, TenantStore};
