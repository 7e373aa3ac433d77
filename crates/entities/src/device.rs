use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use devicehub_core::{
    CustomerId, DeviceId, DeviceProfileId, DomainResult, Entity, EntityId, HasOwnerId,
    OtaPackageId, TenantId, Versioned, resolve_owner,
};

use crate::additional_info;
use crate::device_data::{self, DeviceData};

/// A device registered under a tenant, optionally assigned to a customer.
///
/// Every field starts out absent. The structured payload is stored as JSON
/// bytes and only decoded when [`Device::device_data`] is called.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    id: Option<DeviceId>,
    created_time: Option<i64>,
    tenant_id: Option<TenantId>,
    customer_id: Option<CustomerId>,
    name: Option<String>,
    #[serde(rename = "type")]
    device_type: Option<String>,
    label: Option<String>,
    device_profile_id: Option<DeviceProfileId>,
    #[serde(rename = "deviceData", with = "device_data::json_bytes")]
    device_data_bytes: Option<Vec<u8>>,
    firmware_id: Option<OtaPackageId>,
    software_id: Option<OtaPackageId>,
    external_id: Option<DeviceId>,
    version: Option<u64>,
    additional_info: Option<Value>,
}

impl Device {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: DeviceId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<DeviceId> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<DeviceId>>) {
        self.id = id.into();
    }

    /// Raw UUID of the identifier.
    pub fn uuid_id(&self) -> Option<Uuid> {
        self.id.map(Uuid::from)
    }

    pub fn created_time(&self) -> Option<i64> {
        self.created_time
    }

    pub fn set_created_time(&mut self, created_time: i64) {
        self.created_time = Some(created_time);
    }

    /// Creation time as a UTC timestamp (`None` when unset or out of range).
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_time.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn set_tenant_id(&mut self, tenant_id: impl Into<Option<TenantId>>) {
        self.tenant_id = tenant_id.into();
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn set_customer_id(&mut self, customer_id: impl Into<Option<CustomerId>>) {
        self.customer_id = customer_id.into();
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<S: Into<String>>(&mut self, name: impl Into<Option<S>>) {
        self.name = name.into().map(Into::into);
    }

    pub fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    pub fn set_device_type<S: Into<String>>(&mut self, device_type: impl Into<Option<S>>) {
        self.device_type = device_type.into().map(Into::into);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<S: Into<String>>(&mut self, label: impl Into<Option<S>>) {
        self.label = label.into().map(Into::into);
    }

    pub fn device_profile_id(&self) -> Option<DeviceProfileId> {
        self.device_profile_id
    }

    pub fn set_device_profile_id(&mut self, profile_id: impl Into<Option<DeviceProfileId>>) {
        self.device_profile_id = profile_id.into();
    }

    pub fn firmware_id(&self) -> Option<OtaPackageId> {
        self.firmware_id
    }

    pub fn set_firmware_id(&mut self, firmware_id: impl Into<Option<OtaPackageId>>) {
        self.firmware_id = firmware_id.into();
    }

    pub fn software_id(&self) -> Option<OtaPackageId> {
        self.software_id
    }

    pub fn set_software_id(&mut self, software_id: impl Into<Option<OtaPackageId>>) {
        self.software_id = software_id.into();
    }

    pub fn external_id(&self) -> Option<DeviceId> {
        self.external_id
    }

    pub fn set_external_id(&mut self, external_id: impl Into<Option<DeviceId>>) {
        self.external_id = external_id.into();
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn set_version(&mut self, version: u64) {
        self.version = Some(version);
    }

    pub fn additional_info(&self) -> Option<&Value> {
        self.additional_info.as_ref()
    }

    pub fn additional_info_mut(&mut self) -> &mut Option<Value> {
        &mut self.additional_info
    }

    /// Replace the metadata container; a JSON `null` clears it.
    pub fn set_additional_info(&mut self, info: impl Into<Option<Value>>) {
        self.additional_info = additional_info::normalize(info.into());
    }

    /// Serialize `data` and store it as the device payload.
    pub fn set_device_data(&mut self, data: DeviceData) {
        match data.to_bytes() {
            Ok(bytes) => self.device_data_bytes = Some(bytes),
            Err(err) => {
                warn!(device_id = ?self.id, error = %err, "failed to serialize device data");
                self.device_data_bytes = None;
            }
        }
    }

    /// Store already-serialized payload bytes without validating them.
    pub fn set_device_data_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.device_data_bytes = Some(bytes.into());
    }

    pub fn clear_device_data(&mut self) {
        self.device_data_bytes = None;
    }

    pub fn device_data_bytes(&self) -> Option<&[u8]> {
        self.device_data_bytes.as_deref()
    }

    /// Materialize the payload.
    ///
    /// Corrupt bytes are logged and reported as `None`, the same as a device
    /// without payload. Use [`Device::try_device_data`] to tell them apart.
    pub fn device_data(&self) -> Option<DeviceData> {
        match self.try_device_data() {
            Ok(data) => data,
            Err(err) => {
                warn!(device_id = ?self.id, error = %err, "failed to deserialize device data");
                None
            }
        }
    }

    /// Materialize the payload, surfacing corrupt bytes as `DomainError::CorruptPayload`.
    pub fn try_device_data(&self) -> DomainResult<Option<DeviceData>> {
        self.device_data_bytes
            .as_deref()
            .map(DeviceData::from_bytes)
            .transpose()
    }

    /// Overwrite this device's state with `other`, keeping id and creation time.
    ///
    /// Additional info is only replaced when `other` carries some.
    pub fn update_device(&mut self, other: &Device) -> &mut Self {
        self.tenant_id = other.tenant_id;
        self.customer_id = other.customer_id;
        self.name = other.name.clone();
        self.device_type = other.device_type.clone();
        self.label = other.label.clone();
        self.device_profile_id = other.device_profile_id;
        self.device_data_bytes = other.device_data_bytes.clone();
        self.firmware_id = other.firmware_id;
        self.software_id = other.software_id;
        if let Some(info) = &other.additional_info {
            self.additional_info = Some(info.clone());
        }
        self.external_id = other.external_id;
        self.version = other.version;
        self
    }
}

impl Entity for Device {
    type Id = DeviceId;

    fn id(&self) -> Option<DeviceId> {
        self.id
    }

    fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    fn created_time(&self) -> Option<i64> {
        self.created_time
    }
}

impl Versioned for Device {
    fn version(&self) -> Option<u64> {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = Some(version);
    }
}

impl HasOwnerId for Device {
    fn owner_id(&self) -> Option<EntityId> {
        resolve_owner(self.tenant_id, self.customer_id)
    }
}

/// Payloads compare by their JSON content, so key order and whitespace in the
/// stored bytes do not matter. Bytes that are not valid JSON compare raw.
fn payload_eq(a: Option<&[u8]>, b: Option<&[u8]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            if a == b {
                return true;
            }
            match (
                serde_json::from_slice::<Value>(a),
                serde_json::from_slice::<Value>(b),
            ) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => false,
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.created_time == other.created_time
            && self.tenant_id == other.tenant_id
            && self.customer_id == other.customer_id
            && self.name == other.name
            && self.device_type == other.device_type
            && self.label == other.label
            && self.device_profile_id == other.device_profile_id
            && payload_eq(self.device_data_bytes(), other.device_data_bytes())
            && self.firmware_id == other.firmware_id
            && self.software_id == other.software_id
            && self.external_id == other.external_id
            && self.version == other.version
            && self.additional_info == other.additional_info
    }
}

impl Eq for Device {}

// Subset of the fields compared by `Eq`, so equal devices always hash equal.
impl Hash for Device {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.device_type.hash(state);
        self.version.hash(state);
    }
}

fn display_opt<T: core::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

impl core::fmt::Display for Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Device [id={}, tenantId={}, customerId={}, name={}, type={}, label={}, deviceProfileId={}, version={}]",
            display_opt(&self.id),
            display_opt(&self.tenant_id),
            display_opt(&self.customer_id),
            display_opt(&self.name),
            display_opt(&self.device_type),
            display_opt(&self.label),
            display_opt(&self.device_profile_id),
            display_opt(&self.version),
        )
    }
}
