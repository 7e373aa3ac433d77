//! Infrastructure layer: entity storage backed by tenant-isolated stores.

pub mod store;

pub use store::{
    CustomerRepository, DeviceRepository, EntityRepository, InMemoryTenantStore, TenantStore,
};
