//! Field - Closed set of user-editable fields

/// Identifies an editable text field on a gateway or device form.
///
/// Device `status` is absent on purpose: it is a [`DeviceStatus`] and
/// cannot hold an invalid value.
///
/// [`DeviceStatus`]: super::DeviceStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    SerialNumber,
    Name,
    IpAddress,
    Vendor,
}

impl Field {
    /// Fields edited on the gateway form, in display order
    pub const GATEWAY: [Field; 3] = [Field::SerialNumber, Field::Name, Field::IpAddress];

    /// Text fields edited on the device form
    pub const DEVICE: [Field; 1] = [Field::Vendor];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::SerialNumber => "Serial Number",
            Field::Name => "Name",
            Field::IpAddress => "IP Address",
            Field::Vendor => "Vendor",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::SerialNumber => write!(f, "serial_number"),
            Field::Name => write!(f, "name"),
            Field::IpAddress => write!(f, "ip_address"),
            Field::Vendor => write!(f, "vendor"),
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial_number" => Ok(Field::SerialNumber),
            "name" => Ok(Field::Name),
            "ip_address" => Ok(Field::IpAddress),
            "vendor" => Ok(Field::Vendor),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}
