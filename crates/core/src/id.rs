//! Strongly-typed identifiers used across the domain.
//!
//! Every identifier is a UUID tagged with the [`EntityType`] it points at. On
//! the wire an identifier is `{"entityType": "DEVICE", "id": "<uuid>"}`, and a
//! payload whose `entityType` does not match the target type is rejected.

use core::str::FromStr;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::DomainError;

/// Reserved identifier meaning "no entity assigned".
pub const NULL_UUID: Uuid = Uuid::from_u128(0x1381_4000_1dd2_11b2_8080_8080_8080_8080);

/// Whether `uuid` is one of the reserved "unset" values (platform sentinel or all-zero).
pub fn is_null_uuid(uuid: &Uuid) -> bool {
    *uuid == NULL_UUID || uuid.is_nil()
}

/// Kind of entity an identifier refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Tenant,
    Customer,
    Device,
    DeviceProfile,
    OtaPackage,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Tenant,
        EntityType::Customer,
        EntityType::Device,
        EntityType::DeviceProfile,
        EntityType::OtaPackage,
    ];

    /// Wire name, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::Tenant => "TENANT",
            EntityType::Customer => "CUSTOMER",
            EntityType::Device => "DEVICE",
            EntityType::DeviceProfile => "DEVICE_PROFILE",
            EntityType::OtaPackage => "OTA_PACKAGE",
        }
    }
}

impl core::fmt::Display for EntityType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntityId {
    entity_type: EntityType,
    id: Uuid,
}

/// Identifier of a tenant (multi-tenant boundary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(Uuid);

/// Identifier of a customer (sub-owner beneath a tenant).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CustomerId(Uuid);

/// Identifier of a device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

/// Identifier of a device profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceProfileId(Uuid);

/// Identifier of a firmware or software (OTA) package.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OtaPackageId(Uuid);

macro_rules! impl_entity_id {
    ($t:ident, $entity_type:expr, $name:literal) => {
        impl $t {
            pub const ENTITY_TYPE: EntityType = $entity_type;

            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn entity_type(&self) -> EntityType {
                Self::ENTITY_TYPE
            }

            /// Whether this identifier holds a reserved "unset" value.
            pub fn is_null_uid(&self) -> bool {
                is_null_uuid(&self.0)
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }

        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                RawEntityId {
                    entity_type: Self::ENTITY_TYPE,
                    id: self.0,
                }
                .serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = RawEntityId::deserialize(deserializer)?;
                if raw.entity_type != Self::ENTITY_TYPE {
                    return Err(D::Error::custom(format!(
                        "{}: expected entity type {}, found {}",
                        $name,
                        Self::ENTITY_TYPE,
                        raw.entity_type
                    )));
                }
                Ok(Self(raw.id))
            }
        }

        impl From<$t> for EntityId {
            fn from(value: $t) -> Self {
                EntityId::$t(value)
            }
        }
    };
}

impl_entity_id!(TenantId, EntityType::Tenant, "TenantId");
impl_entity_id!(CustomerId, EntityType::Customer, "CustomerId");
impl_entity_id!(DeviceId, EntityType::Device, "DeviceId");
impl_entity_id!(DeviceProfileId, EntityType::DeviceProfile, "DeviceProfileId");
impl_entity_id!(OtaPackageId, EntityType::OtaPackage, "OtaPackageId");

/// Identifier of any entity, tagged by its type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    TenantId(TenantId),
    CustomerId(CustomerId),
    DeviceId(DeviceId),
    DeviceProfileId(DeviceProfileId),
    OtaPackageId(OtaPackageId),
}

impl EntityId {
    pub fn new(entity_type: EntityType, uuid: Uuid) -> Self {
        match entity_type {
            EntityType::Tenant => TenantId(uuid).into(),
            EntityType::Customer => CustomerId(uuid).into(),
            EntityType::Device => DeviceId(uuid).into(),
            EntityType::DeviceProfile => DeviceProfileId(uuid).into(),
            EntityType::OtaPackage => OtaPackageId(uuid).into(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityId::TenantId(_) => EntityType::Tenant,
            EntityId::CustomerId(_) => EntityType::Customer,
            EntityId::DeviceId(_) => EntityType::Device,
            EntityId::DeviceProfileId(_) => EntityType::DeviceProfile,
            EntityId::OtaPackageId(_) => EntityType::OtaPackage,
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            EntityId::TenantId(id) => id.0,
            EntityId::CustomerId(id) => id.0,
            EntityId::DeviceId(id) => id.0,
            EntityId::DeviceProfileId(id) => id.0,
            EntityId::OtaPackageId(id) => id.0,
        }
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.entity_type(), self.uuid())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawEntityId {
            entity_type: self.entity_type(),
            id: self.uuid(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntityId::deserialize(deserializer)?;
        Ok(EntityId::new(raw.entity_type, raw.id))
    }
}
