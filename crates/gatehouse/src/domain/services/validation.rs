//! Field Validation Rules
//!
//! Pure validators mapping a candidate field value to an optional
//! human-readable error message. Validators never fail; a rejected value
//! is reported as data.

use std::collections::BTreeMap;

use regex_lite::Regex;

use crate::domain::{errors::DomainError, DeviceDraft, Field, Gateway, GatewayDraft};

/// Hyphenated alphanumeric tokens, e.g. `12345` or `GW-01-A`
pub const DEFAULT_SERIAL_NUMBER_PATTERN: &str = r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$";

/// Four dot-separated decimal octets in 0..=255 without leading zeros
const IPV4_PATTERN: &str =
    r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$";

pub const SERIAL_NUMBER_INVALID: &str = "Serial Number is not valid";
pub const SERIAL_NUMBER_TAKEN: &str = "Serial Number is already used before";
pub const NAME_INVALID: &str = "Name is not valid";
pub const IP_ADDRESS_INVALID: &str = "IP address is not valid";
pub const VENDOR_INVALID: &str = "Vendor is not valid";

/// Per-field validation messages, ordered by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`, clearing any stale message
    pub fn record(&mut self, field: Field, outcome: Option<String>) {
        match outcome {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Convert into a domain error, or `Ok(())` when nothing was reported
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Ok(());
        }
        let summary = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::Validation(summary))
    }
}

/// Compiled validation rules for gateway and device fields
#[derive(Debug, Clone)]
pub struct ValidationRules {
    serial_number: Regex,
    ip_address: Regex,
}

impl ValidationRules {
    /// Build rules with a custom serial number grammar
    pub fn new(serial_number_pattern: &str) -> Result<Self, DomainError> {
        let serial_number = Regex::new(serial_number_pattern).map_err(|e| {
            DomainError::Validation(format!(
                "Invalid serial number pattern {serial_number_pattern:?}: {e}"
            ))
        })?;
        let ip_address = Regex::new(IPV4_PATTERN)
            .map_err(|e| DomainError::Validation(format!("Invalid IPv4 pattern: {e}")))?;

        Ok(Self {
            serial_number,
            ip_address,
        })
    }

    /// Format check plus uniqueness against a caller-held snapshot
    pub fn validate_serial_number(&self, value: &str, existing: &[Gateway]) -> Option<String> {
        if !self.serial_number.is_match(value) {
            return Some(SERIAL_NUMBER_INVALID.to_string());
        }
        if !is_unique_serial_number(value, existing) {
            return Some(SERIAL_NUMBER_TAKEN.to_string());
        }
        None
    }

    pub fn validate_name(&self, value: &str) -> Option<String> {
        non_empty(value, NAME_INVALID)
    }

    pub fn validate_ip_address(&self, value: &str) -> Option<String> {
        if self.ip_address.is_match(value) {
            None
        } else {
            Some(IP_ADDRESS_INVALID.to_string())
        }
    }

    pub fn validate_vendor(&self, value: &str) -> Option<String> {
        non_empty(value, VENDOR_INVALID)
    }

    /// Dispatch to the validator owning `field`
    pub fn validate(&self, field: Field, value: &str, existing: &[Gateway]) -> Option<String> {
        match field {
            Field::SerialNumber => self.validate_serial_number(value, existing),
            Field::Name => self.validate_name(value),
            Field::IpAddress => self.validate_ip_address(value),
            Field::Vendor => self.validate_vendor(value),
        }
    }

    /// Validate every field of a gateway draft
    pub fn validate_gateway(&self, draft: &GatewayDraft, existing: &[Gateway]) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.record(
            Field::SerialNumber,
            self.validate_serial_number(&draft.serial_number, existing),
        );
        errors.record(Field::Name, self.validate_name(&draft.name));
        errors.record(Field::IpAddress, self.validate_ip_address(&draft.ip_address));
        errors
    }

    /// Validate every text field of a device draft
    pub fn validate_device(&self, draft: &DeviceDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.record(Field::Vendor, self.validate_vendor(&draft.vendor));
        errors
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(DEFAULT_SERIAL_NUMBER_PATTERN).expect("default serial number pattern is valid")
    }
}

/// True when no gateway in `existing` already uses `serial_number`
pub fn is_unique_serial_number(serial_number: &str, existing: &[Gateway]) -> bool {
    !existing.iter().any(|g| g.serial_number == serial_number)
}

fn non_empty(value: &str, message: &str) -> Option<String> {
    if value.is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    #[test]
    fn test_serial_number_format() {
        let rules = rules();
        assert_eq!(rules.validate_serial_number("12345", &[]), None);
        assert_eq!(rules.validate_serial_number("GW-01-A", &[]), None);
        assert_eq!(
            rules.validate_serial_number("GW--01", &[]).as_deref(),
            Some(SERIAL_NUMBER_INVALID)
        );
        assert_eq!(
            rules.validate_serial_number("", &[]).as_deref(),
            Some(SERIAL_NUMBER_INVALID)
        );
        assert_eq!(
            rules.validate_serial_number("gw 1", &[]).as_deref(),
            Some(SERIAL_NUMBER_INVALID)
        );
    }

    #[test]
    fn test_serial_number_uniqueness_against_snapshot() {
        let existing = vec![Gateway::new("12345", "Gateway 1", "192.168.0.1")];
        assert_eq!(
            rules().validate_serial_number("12345", &existing).as_deref(),
            Some(SERIAL_NUMBER_TAKEN)
        );
        assert_eq!(rules().validate_serial_number("12346", &existing), None);
    }

    #[test]
    fn test_custom_serial_pattern() {
        let rules = ValidationRules::new(r"^SN[0-9]{4}$").unwrap();
        assert_eq!(rules.validate_serial_number("SN0042", &[]), None);
        assert!(rules.validate_serial_number("12345", &[]).is_some());
    }

    #[test]
    fn test_invalid_serial_pattern_is_rejected() {
        let err = ValidationRules::new("(unclosed").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_ip_address() {
        let rules = rules();
        for ok in ["0.0.0.0", "192.168.0.1", "255.255.255.255", "10.0.100.9"] {
            assert_eq!(rules.validate_ip_address(ok), None, "{ok}");
        }
        for bad in [
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "01.2.3.4",
            "a.b.c.d",
            "",
            " 1.2.3.4",
        ] {
            assert_eq!(
                rules.validate_ip_address(bad).as_deref(),
                Some(IP_ADDRESS_INVALID),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_non_empty_fields() {
        let rules = rules();
        assert_eq!(rules.validate_name("").as_deref(), Some(NAME_INVALID));
        assert_eq!(rules.validate_name("Gateway 1"), None);
        assert_eq!(rules.validate_vendor("").as_deref(), Some(VENDOR_INVALID));
        assert_eq!(rules.validate_vendor("Vendor A"), None);
    }

    #[test]
    fn test_validate_gateway_collects_all_fields() {
        let draft = GatewayDraft {
            serial_number: "bad serial".to_string(),
            name: String::new(),
            ip_address: "300.0.0.1".to_string(),
        };
        let errors = rules().validate_gateway(&draft, &[]);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Name), Some(NAME_INVALID));

        let err = errors.into_result().unwrap_err();
        assert!(err.to_string().contains("ip_address: IP address is not valid"));
    }

    #[test]
    fn test_record_clears_stale_message() {
        let mut errors = FieldErrors::new();
        errors.record(Field::Vendor, Some(VENDOR_INVALID.to_string()));
        errors.record(Field::Vendor, None);
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }
}
