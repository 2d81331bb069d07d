//! Form State
//!
//! Field-local, eagerly validated input state for gateway and device
//! entry. Every `set` re-runs the validator of that one field; the submit
//! gate requires every required field to be filled and no outstanding
//! error.

use crate::domain::{errors::DomainError, DeviceDraft, DeviceStatus, Field, Gateway, GatewayDraft};

use super::validation::{FieldErrors, ValidationRules};

/// Gateway entry form
#[derive(Debug, Clone)]
pub struct GatewayForm {
    rules: ValidationRules,
    snapshot: Vec<Gateway>,
    data: GatewayDraft,
    errors: FieldErrors,
}

impl GatewayForm {
    /// `snapshot` is the gateway list the operator is looking at; serial
    /// number uniqueness is checked against it.
    pub fn new(rules: ValidationRules, snapshot: Vec<Gateway>) -> Self {
        Self {
            rules,
            snapshot,
            data: GatewayDraft::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Replace the uniqueness snapshot, e.g. after the list was refreshed
    pub fn refresh_snapshot(&mut self, snapshot: Vec<Gateway>) {
        self.snapshot = snapshot;
    }

    /// Update one field and re-run its validator
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), DomainError> {
        let value = value.into();
        let outcome = self.rules.validate(field, &value, &self.snapshot);
        match field {
            Field::SerialNumber => self.data.serial_number = value,
            Field::Name => self.data.name = value,
            Field::IpAddress => self.data.ip_address = value,
            Field::Vendor => {
                return Err(DomainError::Validation(format!(
                    "{} is not a gateway field",
                    field.label()
                )))
            }
        }
        self.errors.record(field, outcome);
        Ok(())
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::SerialNumber => Some(self.data.serial_number.as_str()),
            Field::Name => Some(self.data.name.as_str()),
            Field::IpAddress => Some(self.data.ip_address.as_str()),
            Field::Vendor => None,
        }
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn draft(&self) -> &GatewayDraft {
        &self.data
    }

    pub fn can_submit(&self) -> bool {
        let filled = Field::GATEWAY
            .iter()
            .all(|f| self.value(*f).is_some_and(|v| !v.is_empty()));
        filled && self.errors.is_empty()
    }

    /// Hand out the draft and reset, or `None` while the gate is closed
    pub fn submit(&mut self) -> Option<GatewayDraft> {
        if !self.can_submit() {
            return None;
        }
        let draft = std::mem::take(&mut self.data);
        self.errors.clear();
        Some(draft)
    }

    /// Discard input, as on cancel
    pub fn reset(&mut self) {
        self.data = GatewayDraft::default();
        self.errors.clear();
    }
}

/// Device entry form
#[derive(Debug, Clone)]
pub struct DeviceForm {
    rules: ValidationRules,
    data: DeviceDraft,
    errors: FieldErrors,
}

impl DeviceForm {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules,
            data: DeviceDraft::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), DomainError> {
        let value = value.into();
        match field {
            Field::Vendor => {
                let outcome = self.rules.validate_vendor(&value);
                self.data.vendor = value;
                self.errors.record(field, outcome);
                Ok(())
            }
            other => Err(DomainError::Validation(format!(
                "{} is not a device field",
                other.label()
            ))),
        }
    }

    pub fn set_status(&mut self, status: DeviceStatus) {
        self.data.status = status;
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn draft(&self) -> &DeviceDraft {
        &self.data
    }

    pub fn can_submit(&self) -> bool {
        !self.data.vendor.is_empty() && self.errors.is_empty()
    }

    pub fn submit(&mut self) -> Option<DeviceDraft> {
        if !self.can_submit() {
            return None;
        }
        let draft = std::mem::take(&mut self.data);
        self.errors.clear();
        Some(draft)
    }

    pub fn reset(&mut self) {
        self.data = DeviceDraft::default();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validation::{
        IP_ADDRESS_INVALID, NAME_INVALID, SERIAL_NUMBER_TAKEN,
    };

    fn gateway_form() -> GatewayForm {
        let existing = vec![Gateway::new("12345", "Gateway 1", "192.168.0.1")];
        GatewayForm::new(ValidationRules::default(), existing)
    }

    #[test]
    fn test_gateway_form_is_closed_until_filled() {
        let mut form = gateway_form();
        assert!(!form.can_submit());

        form.set(Field::SerialNumber, "GW-2").unwrap();
        form.set(Field::Name, "Gateway 2").unwrap();
        assert!(!form.can_submit());

        form.set(Field::IpAddress, "10.0.0.2").unwrap();
        assert!(form.can_submit());
    }

    #[test]
    fn test_gateway_form_validates_each_change() {
        let mut form = gateway_form();
        form.set(Field::IpAddress, "10.0.0").unwrap();
        assert_eq!(form.error(Field::IpAddress), Some(IP_ADDRESS_INVALID));

        form.set(Field::IpAddress, "10.0.0.9").unwrap();
        assert_eq!(form.error(Field::IpAddress), None);

        form.set(Field::Name, "x").unwrap();
        form.set(Field::Name, "").unwrap();
        assert_eq!(form.error(Field::Name), Some(NAME_INVALID));
    }

    #[test]
    fn test_gateway_form_rejects_known_serial() {
        let mut form = gateway_form();
        form.set(Field::SerialNumber, "12345").unwrap();
        form.set(Field::Name, "Dup").unwrap();
        form.set(Field::IpAddress, "10.0.0.3").unwrap();
        assert_eq!(form.error(Field::SerialNumber), Some(SERIAL_NUMBER_TAKEN));
        assert!(!form.can_submit());
        assert!(form.submit().is_none());
    }

    #[test]
    fn test_gateway_form_submit_resets() {
        let mut form = gateway_form();
        form.set(Field::SerialNumber, "GW-2").unwrap();
        form.set(Field::Name, "Gateway 2").unwrap();
        form.set(Field::IpAddress, "10.0.0.2").unwrap();

        let draft = form.submit().unwrap();
        assert_eq!(draft.serial_number, "GW-2");
        assert_eq!(form.draft(), &GatewayDraft::default());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_refreshed_snapshot_applies_to_next_change() {
        let mut form = gateway_form();
        form.set(Field::SerialNumber, "GW-9").unwrap();
        assert_eq!(form.error(Field::SerialNumber), None);

        form.refresh_snapshot(vec![Gateway::new("GW-9", "Other tab", "10.0.0.9")]);
        form.set(Field::SerialNumber, "GW-9").unwrap();
        assert_eq!(form.error(Field::SerialNumber), Some(SERIAL_NUMBER_TAKEN));
    }

    #[test]
    fn test_gateway_form_rejects_device_field() {
        let mut form = gateway_form();
        assert!(form.set(Field::Vendor, "Acme").is_err());
    }

    #[test]
    fn test_device_form() {
        let mut form = DeviceForm::new(ValidationRules::default());
        assert!(!form.can_submit());

        form.set(Field::Vendor, "Vendor A").unwrap();
        form.set_status(DeviceStatus::Offline);
        assert!(form.can_submit());

        let draft = form.submit().unwrap();
        assert_eq!(draft, DeviceDraft::new("Vendor A", DeviceStatus::Offline));
        assert_eq!(form.draft().status, DeviceStatus::Online);
    }

    #[test]
    fn test_device_form_clears_error_on_fix() {
        let mut form = DeviceForm::new(ValidationRules::default());
        form.set(Field::Vendor, "").unwrap();
        assert!(form.error(Field::Vendor).is_some());
        form.set(Field::Vendor, "Acme").unwrap();
        assert!(form.error(Field::Vendor).is_none());
        assert!(form.set(Field::Name, "nope").is_err());
    }
}
