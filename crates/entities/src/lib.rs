//! Entity module: devices and customers of the platform.
//!
//! Plain data holders with deterministic helpers (owner resolution, payload
//! materialization, public-visibility flag). No IO, no storage.

pub mod additional_info;
pub mod customer;
pub mod device;
pub mod device_data;

pub use customer::{ContactInfo, Customer, IS_PUBLIC_KEY, ShortCustomerInfo};
pub use device::Device;
pub use device_data::{
    DeviceConfiguration, DeviceData, DeviceTransportConfiguration, PowerMode,
    PowerSavingConfiguration, SnmpProtocolVersion, SnmpTransportConfiguration,
};
