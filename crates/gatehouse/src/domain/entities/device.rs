//! Device - Endpoint attached to a gateway
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DeviceStatus;

/// Device identifier, unique within its owning gateway
pub type DeviceUid = u32;

/// Device - owned exclusively by one Gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub uid: DeviceUid,
    pub vendor: String,
    pub date_created: DateTime<Utc>,
    pub status: DeviceStatus,
}

/// Device input before a uid and creation time are assigned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDraft {
    pub vendor: String,
    #[serde(default)]
    pub status: DeviceStatus,
}

impl Device {
    /// Create a device stamped with the current time
    pub fn new(uid: DeviceUid, vendor: String, status: DeviceStatus) -> Self {
        Self {
            uid,
            vendor,
            date_created: Utc::now(),
            status,
        }
    }

    /// Materialize a draft under the given uid
    pub fn from_draft(uid: DeviceUid, draft: DeviceDraft) -> Self {
        Self::new(uid, draft.vendor, draft.status)
    }
}

impl DeviceDraft {
    pub fn new(vendor: impl Into<String>, status: DeviceStatus) -> Self {
        Self {
            vendor: vendor.into(),
            status,
        }
    }
}
