//! Recoverability of devices stored in the in-memory repository.
//!
//! Verifies:
//! - A fully populated device is stored and read back intact
//! - Bulk recovery returns every device of the tenant
//! - Updates are visible on recovery and earlier metadata is preserved
//! - A snapshot/restore cycle reproduces every entity field-for-field

use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::json;

use devicehub_core::{CustomerId, DeviceId, DeviceProfileId, ExpectedVersion, TenantId};
use devicehub_entities::{
    Device, DeviceConfiguration, DeviceData, DeviceTransportConfiguration, PowerMode,
    PowerSavingConfiguration, SnmpProtocolVersion, SnmpTransportConfiguration, additional_info,
};
use devicehub_infra::{DeviceRepository, InMemoryTenantStore, TenantStore};

fn setup() -> DeviceRepository {
    devicehub_observability::init();
    DeviceRepository::default()
}

fn test_device(tenant_id: TenantId, name: &str) -> Device {
    let mut device = Device::with_id(DeviceId::new());
    device.set_tenant_id(tenant_id);
    device.set_name(name);
    device.set_device_type("Temperature Sensor");
    device.set_label("Test Label");
    device.set_created_time(Utc::now().timestamp_millis());
    device.set_customer_id(CustomerId::new());
    device.set_device_profile_id(DeviceProfileId::new());
    device.set_additional_info(json!({
        "location": "Test Location",
        "manufacturer": "Test Manufacturer",
        "criticalAsset": true
    }));
    device
}

#[test]
fn saves_complete_industrial_device() {
    let repo = setup();
    let tenant_id = TenantId::new();

    let mut device = Device::with_id(DeviceId::new());
    device.set_tenant_id(tenant_id);
    device.set_name("Capteur Température Zone A");
    device.set_device_type("Temperature Sensor");
    device.set_label("Production Floor - Section A1");
    device.set_created_time(Utc::now().timestamp_millis());
    device.set_customer_id(CustomerId::new());
    device.set_device_profile_id(DeviceProfileId::new());
    device.set_device_data(DeviceData::default_data());
    device.set_additional_info(json!({
        "location": "Building 3, Floor 2, Zone A",
        "manufacturer": "Siemens",
        "model": "S7-1200",
        "installationDate": "2024-01-15",
        "maintenanceInterval": 90,
        "criticalAsset": true
    }));

    repo.save(&device, ExpectedVersion::Absent).unwrap();

    let stored = repo.find_by_id(tenant_id, device.id().unwrap()).unwrap();
    assert_eq!(stored.name(), Some("Capteur Température Zone A"));
    assert_eq!(stored.device_data(), Some(DeviceData::default_data()));
    let info = stored.additional_info().unwrap();
    assert_eq!(info["criticalAsset"].as_bool(), Some(true));
    assert_eq!(info["maintenanceInterval"].as_i64(), Some(90));
    assert_eq!(info.as_object().unwrap().len(), 6);
}

#[test]
fn recovers_every_field_after_save() {
    let repo = setup();
    let tenant_id = TenantId::new();
    let device = test_device(tenant_id, "Recovery Test Device");
    let device_id = device.id().unwrap();
    repo.save(&device, ExpectedVersion::Absent).unwrap();

    let started = Instant::now();
    let recovered = repo.get(tenant_id, device_id).unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(recovered.name(), Some("Recovery Test Device"));
    assert_eq!(recovered.device_type(), Some("Temperature Sensor"));
    assert_eq!(recovered.label(), Some("Test Label"));
    assert_eq!(recovered.tenant_id(), Some(tenant_id));
    assert_eq!(recovered.customer_id(), device.customer_id());
    assert_eq!(recovered.device_profile_id(), device.device_profile_id());
    assert_eq!(recovered.created_time(), device.created_time());

    let info = recovered.additional_info().unwrap();
    assert_eq!(info["location"], "Test Location");
    assert_eq!(info["manufacturer"], "Test Manufacturer");
    assert_eq!(info["criticalAsset"].as_bool(), Some(true));
}

#[test]
fn bulk_recovery_returns_every_tenant_device() {
    let repo = setup();
    let tenant_id = TenantId::new();
    let other_tenant = TenantId::new();

    for i in 0..10i64 {
        let mut device = test_device(tenant_id, &format!("Sensor-{i}"));
        additional_info::set_field(device.additional_info_mut(), "sensorId", i);
        additional_info::set_field(device.additional_info_mut(), "priority", "high");
        repo.save(&device, ExpectedVersion::Absent).unwrap();
    }
    repo.save(&test_device(other_tenant, "Foreign"), ExpectedVersion::Absent)
        .unwrap();

    let started = Instant::now();
    let recovered = repo.find_by_tenant(tenant_id);
    assert!(started.elapsed() < Duration::from_secs(10));

    assert_eq!(recovered.len(), 10);
    assert!(recovered.iter().all(|d| d.tenant_id() == Some(tenant_id)));
    let mut sensor_ids: Vec<i64> = recovered
        .iter()
        .map(|d| d.additional_info().unwrap()["sensorId"].as_i64().unwrap())
        .collect();
    sensor_ids.sort_unstable();
    assert_eq!(sensor_ids, (0..10).collect::<Vec<i64>>());
}

#[test]
fn recovers_updates_and_preserves_existing_metadata() {
    let repo = setup();
    let tenant_id = TenantId::new();
    let device = test_device(tenant_id, "Update Test Device");
    let device_id = device.id().unwrap();
    let saved = repo.save(&device, ExpectedVersion::Absent).unwrap();

    let mut to_update = repo.get(tenant_id, device_id).unwrap();
    to_update.set_label("Updated Label - Maintenance Mode");
    additional_info::set_field(to_update.additional_info_mut(), "lastMaintenance", "2026-02-08");
    additional_info::set_field(to_update.additional_info_mut(), "status", "operational");
    repo.save(&to_update, ExpectedVersion::Exact(saved.version().unwrap()))
        .unwrap();

    let recovered = repo.get(tenant_id, device_id).unwrap();
    assert_eq!(recovered.label(), Some("Updated Label - Maintenance Mode"));
    assert_eq!(recovered.version(), Some(2));

    let info = recovered.additional_info().unwrap();
    assert_eq!(info["lastMaintenance"], "2026-02-08");
    assert_eq!(info["status"], "operational");
    assert_eq!(info["manufacturer"], "Test Manufacturer");
    assert_eq!(info["criticalAsset"].as_bool(), Some(true));
}

#[test]
fn stale_update_does_not_overwrite_recovered_state() {
    let repo = setup();
    let tenant_id = TenantId::new();
    let saved = repo
        .save(&test_device(tenant_id, "Contended"), ExpectedVersion::Absent)
        .unwrap();

    let mut first = saved.clone();
    first.set_label("first writer");
    repo.save(&first, ExpectedVersion::Exact(1)).unwrap();

    let mut second = saved.clone();
    second.set_label("second writer");
    assert!(repo.save(&second, ExpectedVersion::Exact(1)).is_err());

    let recovered = repo.get(tenant_id, saved.id().unwrap()).unwrap();
    assert_eq!(recovered.label(), Some("first writer"));
}

fn transport_payloads() -> Vec<DeviceData> {
    let transports = [
        DeviceTransportConfiguration::Default,
        DeviceTransportConfiguration::Mqtt,
        DeviceTransportConfiguration::Coap(PowerSavingConfiguration {
            power_mode: Some(PowerMode::Drx),
            ..PowerSavingConfiguration::default()
        }),
        DeviceTransportConfiguration::Lwm2m(PowerSavingConfiguration {
            power_mode: Some(PowerMode::Psm),
            psm_activity_timer: Some(10),
            ..PowerSavingConfiguration::default()
        }),
        DeviceTransportConfiguration::Snmp(SnmpTransportConfiguration {
            host: Some("192.168.1.20".into()),
            port: Some(161),
            protocol_version: Some(SnmpProtocolVersion::V2c),
        }),
    ];
    transports
        .into_iter()
        .map(|transport| DeviceData {
            configuration: Some(DeviceConfiguration::Default),
            transport_configuration: Some(transport),
        })
        .collect()
}

#[test]
fn snapshot_restore_reproduces_every_device() {
    let repo = setup();
    let tenant_id = TenantId::new();
    let mut originals = Vec::new();
    for (i, payload) in transport_payloads().into_iter().enumerate() {
        let mut device = test_device(tenant_id, &format!("Snapshot-{i}"));
        device.set_device_data(payload.clone());
        originals.push((repo.save(&device, ExpectedVersion::Absent).unwrap(), payload));
    }

    let bytes = repo.store().snapshot().unwrap();
    repo.store().clear();
    assert!(repo.find_by_tenant(tenant_id).is_empty());

    let restored = DeviceRepository::new(InMemoryTenantStore::restore(&bytes).unwrap());
    for (original, payload) in &originals {
        let recovered = restored.get(tenant_id, original.id().unwrap()).unwrap();
        assert_eq!(&recovered, original);
        assert_eq!(recovered.device_data().as_ref(), Some(payload));
    }
}
