//! Gateway Repository Port
//!
//! Abstract interface for the persisted gateway collection. Devices are
//! embedded in their gateway and are only reachable through it.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Device, DeviceDraft, DeviceUid, Gateway};

/// Repository interface for the gateway aggregate
///
/// Each mutating call is one read-modify-write cycle over the whole
/// collection. Lookup misses are `Ok(None)`, not errors.
#[async_trait]
pub trait GatewayRepository: Send + Sync {
    /// All gateways in insertion order (empty on missing or corrupt storage)
    async fn list_gateways(&self) -> Result<Vec<Gateway>, DomainError>;

    /// Find a gateway by serial number
    async fn get_gateway(&self, serial_number: &str) -> Result<Option<Gateway>, DomainError>;

    /// Append a gateway.
    ///
    /// Fails with `Conflict` if the serial number is already stored or the
    /// record repeats a device uid, and with `CapacityExceeded` if it
    /// carries more devices than a gateway may host.
    async fn add_gateway(&self, gateway: Gateway) -> Result<Gateway, DomainError>;

    /// Delete a gateway together with its devices.
    ///
    /// Returns whether anything was removed; an unknown serial is a no-op.
    async fn remove_gateway(&self, serial_number: &str) -> Result<bool, DomainError>;

    /// Devices of a gateway in display order, `None` if the gateway is absent
    async fn list_devices(&self, serial_number: &str) -> Result<Option<Vec<Device>>, DomainError>;

    /// Attach a device to an existing gateway.
    ///
    /// Fails with `NotFound` for an unknown gateway, `Conflict` on a
    /// duplicate uid and `CapacityExceeded` when the gateway is full.
    async fn add_device(&self, serial_number: &str, device: Device) -> Result<Device, DomainError>;

    /// Attach a device built from `draft` under the gateway's next uid.
    ///
    /// The uid is chosen in the same cycle that stores the device, so
    /// concurrent callers never race for one uid. Fails like `add_device`.
    async fn attach_device(
        &self,
        serial_number: &str,
        draft: DeviceDraft,
    ) -> Result<Device, DomainError>;

    /// Detach a device by uid.
    ///
    /// Fails with `NotFound` for an unknown gateway; an unknown uid is a
    /// no-op returning `false`.
    async fn remove_device(
        &self,
        serial_number: &str,
        uid: DeviceUid,
    ) -> Result<bool, DomainError>;
}
