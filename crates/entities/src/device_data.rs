//! Structured device payload (`deviceData`).
//!
//! Devices keep the payload as serialized JSON bytes and materialize it on
//! demand. The codec lives here together with the serde adapter that renders
//! the stored bytes as a nested JSON object in the device document.

use serde::{Deserialize, Serialize};

use devicehub_core::{DomainResult, ValueObject};

/// Device-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum DeviceConfiguration {
    Default,
}

/// Power saving mode of constrained (CoAP/LwM2M) devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerMode {
    Psm,
    Drx,
    EDrx,
}

/// Power saving settings shared by the CoAP and LwM2M transports.
///
/// Timers are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerSavingConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_mode: Option<PowerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psm_activity_timer: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edrx_cycle: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_transmission_window: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnmpProtocolVersion {
    V1,
    V2c,
    V3,
}

/// Polling target of an SNMP device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnmpTransportConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<SnmpProtocolVersion>,
}

/// Per-device transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum DeviceTransportConfiguration {
    Default,
    Mqtt,
    Coap(PowerSavingConfiguration),
    Lwm2m(PowerSavingConfiguration),
    Snmp(SnmpTransportConfiguration),
}

/// Structured payload attached to a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<DeviceConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_configuration: Option<DeviceTransportConfiguration>,
}

impl ValueObject for DeviceData {}

impl DeviceData {
    /// Payload assigned to devices created without explicit configuration.
    pub fn default_data() -> Self {
        Self {
            configuration: Some(DeviceConfiguration::Default),
            transport_configuration: Some(DeviceTransportConfiguration::Default),
        }
    }

    pub fn to_bytes(&self) -> DomainResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a payload; malformed bytes map to `DomainError::CorruptPayload`.
    pub fn from_bytes(bytes: &[u8]) -> DomainResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Serde adapter: stored payload bytes <-> nested JSON value.
///
/// Bytes that are not valid JSON serialize as `null`.
pub(crate) mod json_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        let value = bytes
            .as_deref()
            .and_then(|b| serde_json::from_slice::<Value>(b).ok());
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::to_vec(&v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
