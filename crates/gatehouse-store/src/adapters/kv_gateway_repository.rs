//! Key-value implementation of GatewayRepository
//!
//! The whole gateway collection lives as one JSON array under a single
//! storage key. Every mutation reads the collection, changes an in-memory
//! copy and writes the collection back. A process-local lock serializes
//! those cycles; separate processes sharing one medium remain
//! last-writer-wins.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gatehouse::{
    Device, DeviceDraft, DeviceUid, DomainError, Gateway, GatewayRepository,
    MAX_DEVICES_PER_GATEWAY,
};

use super::json_store::JsonStore;
use super::storage::StorageMedium;

/// Storage key holding the gateway collection
pub const DEFAULT_STORAGE_KEY: &str = "gateways";

/// GatewayRepository over a JSON key-value store
pub struct KvGatewayRepository<M: StorageMedium> {
    store: JsonStore<M>,
    key: String,
    write_lock: Mutex<()>,
}

impl<M: StorageMedium> KvGatewayRepository<M> {
    pub fn new(store: JsonStore<M>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: JsonStore<M>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &JsonStore<M> {
        &self.store
    }

    fn load(&self) -> Result<Vec<Gateway>, DomainError> {
        let gateways = self
            .store
            .read::<Vec<Gateway>>(&self.key)
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        Ok(gateways.unwrap_or_default())
    }

    fn persist(&self, gateways: &[Gateway]) -> Result<(), DomainError> {
        self.store
            .write(&self.key, gateways)
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    /// One read-modify-write cycle. Nothing is written if `op` fails.
    async fn mutate<F, T>(&self, op: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Vec<Gateway>) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut gateways = self.load()?;
        let outcome = op(&mut gateways)?;
        self.persist(&gateways)?;
        Ok(outcome)
    }
}

fn position_of(gateways: &[Gateway], serial_number: &str) -> Option<usize> {
    gateways
        .iter()
        .position(|g| g.serial_number == serial_number)
}

fn capacity_exceeded(serial_number: &str) -> DomainError {
    DomainError::CapacityExceeded {
        serial_number: serial_number.to_string(),
        limit: MAX_DEVICES_PER_GATEWAY,
    }
}

fn duplicate_device(uid: DeviceUid, serial_number: &str) -> DomainError {
    DomainError::Conflict(format!(
        "Device {} already exists on gateway {}",
        uid, serial_number
    ))
}

/// Reject a gateway record whose embedded devices break the device limit
/// or repeat a uid
fn check_devices(gateway: &Gateway) -> Result<(), DomainError> {
    if gateway.devices.len() > MAX_DEVICES_PER_GATEWAY {
        return Err(capacity_exceeded(&gateway.serial_number));
    }
    let mut seen = HashSet::with_capacity(gateway.devices.len());
    for device in &gateway.devices {
        if !seen.insert(device.uid) {
            return Err(duplicate_device(device.uid, &gateway.serial_number));
        }
    }
    Ok(())
}

#[async_trait]
impl<M: StorageMedium> GatewayRepository for KvGatewayRepository<M> {
    async fn list_gateways(&self) -> Result<Vec<Gateway>, DomainError> {
        self.load()
    }

    async fn get_gateway(&self, serial_number: &str) -> Result<Option<Gateway>, DomainError> {
        let gateways = self.load()?;
        Ok(gateways
            .into_iter()
            .find(|g| g.serial_number == serial_number))
    }

    async fn add_gateway(&self, gateway: Gateway) -> Result<Gateway, DomainError> {
        self.mutate(move |gateways| {
            if position_of(gateways, &gateway.serial_number).is_some() {
                return Err(DomainError::Conflict(format!(
                    "Gateway with serial number {} already exists",
                    gateway.serial_number
                )));
            }
            check_devices(&gateway)?;
            gateways.push(gateway.clone());
            Ok(gateway)
        })
        .await
    }

    async fn remove_gateway(&self, serial_number: &str) -> Result<bool, DomainError> {
        self.mutate(|gateways| {
            let before = gateways.len();
            gateways.retain(|g| g.serial_number != serial_number);
            Ok(gateways.len() != before)
        })
        .await
    }

    async fn list_devices(&self, serial_number: &str) -> Result<Option<Vec<Device>>, DomainError> {
        Ok(self
            .get_gateway(serial_number)
            .await?
            .map(|gateway| gateway.devices))
    }

    async fn add_device(&self, serial_number: &str, device: Device) -> Result<Device, DomainError> {
        self.mutate(move |gateways| {
            let index = position_of(gateways, serial_number)
                .ok_or_else(|| DomainError::gateway_not_found(serial_number))?;
            let gateway = &mut gateways[index];

            if gateway.contains_device(device.uid) {
                return Err(duplicate_device(device.uid, serial_number));
            }
            if !gateway.has_capacity() {
                return Err(capacity_exceeded(serial_number));
            }

            gateway.devices.push(device.clone());
            Ok(device)
        })
        .await
    }

    async fn attach_device(
        &self,
        serial_number: &str,
        draft: DeviceDraft,
    ) -> Result<Device, DomainError> {
        self.mutate(move |gateways| {
            let index = position_of(gateways, serial_number)
                .ok_or_else(|| DomainError::gateway_not_found(serial_number))?;
            let gateway = &mut gateways[index];

            if !gateway.has_capacity() {
                return Err(capacity_exceeded(serial_number));
            }

            let device = Device::from_draft(gateway.next_device_uid(), draft);
            gateway.devices.push(device.clone());
            Ok(device)
        })
        .await
    }

    async fn remove_device(
        &self,
        serial_number: &str,
        uid: DeviceUid,
    ) -> Result<bool, DomainError> {
        self.mutate(|gateways| {
            let index = position_of(gateways, serial_number)
                .ok_or_else(|| DomainError::gateway_not_found(serial_number))?;
            let devices = &mut gateways[index].devices;
            let before = devices.len();
            devices.retain(|d| d.uid != uid);
            Ok(devices.len() != before)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use gatehouse::DeviceStatus;

    fn repo() -> KvGatewayRepository<MemoryStorage> {
        KvGatewayRepository::new(JsonStore::new(MemoryStorage::new()))
    }

    fn device(uid: DeviceUid) -> Device {
        Device::new(uid, format!("Vendor {uid}"), DeviceStatus::Online)
    }

    #[tokio::test]
    async fn test_add_gateway_rejects_duplicate_serial() {
        let repo = repo();
        repo.add_gateway(Gateway::new("12345", "Gateway 1", "192.168.0.1"))
            .await
            .unwrap();

        let err = repo
            .add_gateway(Gateway::new("12345", "Other", "192.168.0.2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.list_gateways().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_gateway_rejects_too_many_devices() {
        let repo = repo();
        let mut gateway = Gateway::new("GW-1", "g", "10.0.0.1");
        gateway.devices = (1..=MAX_DEVICES_PER_GATEWAY as DeviceUid + 2)
            .map(device)
            .collect();

        let err = repo.add_gateway(gateway).await.unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));
        assert!(repo.list_gateways().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_gateway_rejects_repeated_device_uids() {
        let repo = repo();
        let mut gateway = Gateway::new("GW-1", "g", "10.0.0.1");
        gateway.devices = vec![device(7), device(3), device(7)];

        let err = repo.add_gateway(gateway).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repo.get_gateway("GW-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_gateway_keeps_valid_embedded_devices() {
        let repo = repo();
        let mut gateway = Gateway::new("GW-1", "g", "10.0.0.1");
        gateway.devices = vec![device(2), device(5)];

        repo.add_gateway(gateway).await.unwrap();
        let devices = repo.list_devices("GW-1").await.unwrap().unwrap();
        assert_eq!(devices.iter().map(|d| d.uid).collect::<Vec<_>>(), vec![2, 5]);
    }

    #[tokio::test]
    async fn test_attach_device_assigns_next_uid() {
        let repo = repo();
        repo.add_gateway(Gateway::new("GW-1", "g", "10.0.0.1"))
            .await
            .unwrap();
        repo.add_device("GW-1", device(101)).await.unwrap();

        let attached = repo
            .attach_device("GW-1", DeviceDraft::new("Acme", DeviceStatus::Offline))
            .await
            .unwrap();
        assert_eq!(attached.uid, 102);
        assert_eq!(attached.status, DeviceStatus::Offline);

        let err = repo
            .attach_device("nope", DeviceDraft::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_device_to_missing_gateway_is_not_found() {
        let repo = repo();
        let err = repo.add_device("nope", device(1)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.store().medium().is_empty());
    }

    #[tokio::test]
    async fn test_add_device_rejects_duplicate_uid() {
        let repo = repo();
        repo.add_gateway(Gateway::new("GW-1", "g", "10.0.0.1"))
            .await
            .unwrap();
        repo.add_device("GW-1", device(7)).await.unwrap();

        let err = repo.add_device("GW-1", device(7)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let repo = repo();
        repo.add_gateway(Gateway::new("GW-1", "g", "10.0.0.1"))
            .await
            .unwrap();
        for uid in 1..=MAX_DEVICES_PER_GATEWAY as DeviceUid {
            repo.add_device("GW-1", device(uid)).await.unwrap();
        }

        let err = repo.add_device("GW-1", device(99)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::CapacityExceeded { limit: MAX_DEVICES_PER_GATEWAY, .. }
        ));
        let devices = repo.list_devices("GW-1").await.unwrap().unwrap();
        assert_eq!(devices.len(), MAX_DEVICES_PER_GATEWAY);
    }

    #[tokio::test]
    async fn test_remove_device_from_missing_gateway_is_not_found() {
        let repo = repo();
        assert!(repo.remove_device("nope", 1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_remove_missing_gateway_is_noop() {
        let repo = repo();
        repo.add_gateway(Gateway::new("GW-1", "g", "10.0.0.1"))
            .await
            .unwrap();
        assert!(!repo.remove_gateway("GW-2").await.unwrap());
        assert_eq!(repo.list_gateways().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let repo = KvGatewayRepository::with_key(JsonStore::new(MemoryStorage::new()), "lab");
        repo.add_gateway(Gateway::new("GW-1", "g", "10.0.0.1"))
            .await
            .unwrap();
        assert!(repo.store().medium().get_item("lab").unwrap().is_some());
        assert!(repo.store().medium().get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
