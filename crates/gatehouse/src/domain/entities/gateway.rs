//! Gateway - Network gateway hosting a bounded set of devices
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use super::device::{Device, DeviceUid};

/// Maximum number of devices a single gateway may host
pub const MAX_DEVICES_PER_GATEWAY: usize = 10;

/// Gateway - top-level aggregate, keyed by serial number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub serial_number: String,
    pub name: String,
    pub ip_address: String,
    /// Display order is insertion order
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Gateway input as entered by an operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDraft {
    pub serial_number: String,
    pub name: String,
    pub ip_address: String,
}

impl Gateway {
    /// Create a gateway with no devices
    pub fn new(
        serial_number: impl Into<String>,
        name: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            name: name.into(),
            ip_address: ip_address.into(),
            devices: Vec::new(),
        }
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Whether another device can be attached
    pub fn has_capacity(&self) -> bool {
        self.devices.len() < MAX_DEVICES_PER_GATEWAY
    }

    pub fn find_device(&self, uid: DeviceUid) -> Option<&Device> {
        self.devices.iter().find(|d| d.uid == uid)
    }

    pub fn contains_device(&self, uid: DeviceUid) -> bool {
        self.find_device(uid).is_some()
    }

    /// One past the highest uid currently attached, starting at 1.
    ///
    /// No counter is persisted: removing the highest device frees its uid
    /// for the next registration. Lower uids are never handed out again
    /// while a higher one is attached.
    pub fn next_device_uid(&self) -> DeviceUid {
        self.devices
            .iter()
            .map(|d| d.uid)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}

impl From<GatewayDraft> for Gateway {
    fn from(draft: GatewayDraft) -> Self {
        Self::new(draft.serial_number, draft.name, draft.ip_address)
    }
}
