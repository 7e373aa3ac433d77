//! `devicehub-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, owner resolution, entity/version traits and the shared
//! error type.

pub mod entity;
pub mod error;
pub mod id;
pub mod owner;
pub mod value_object;
pub mod version;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    CustomerId, DeviceId, DeviceProfileId, EntityId, EntityType, NULL_UUID, OtaPackageId,
    TenantId, is_null_uuid,
};
pub use owner::{HasOwnerId, resolve_owner};
pub use value_object::ValueObject;
pub use version::{ExpectedVersion, Versioned};
