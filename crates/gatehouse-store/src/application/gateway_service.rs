//! Gateway Application Service (Use Case)
//!
//! Orchestrates validation and repository operations for gateways and
//! their devices.

use std::sync::Arc;

use gatehouse::{
    Device, DeviceDraft, DeviceForm, DeviceUid, DomainError, Gateway, GatewayDraft, GatewayForm,
    GatewayRepository, ValidationRules,
};

/// Application service for gateway and device operations
pub struct GatewayService<R: GatewayRepository> {
    repo: Arc<R>,
    rules: ValidationRules,
}

impl<R: GatewayRepository> GatewayService<R> {
    pub fn new(repo: Arc<R>, rules: ValidationRules) -> Self {
        Self { repo, rules }
    }

    /// Get all gateways
    pub async fn list_gateways(&self) -> Result<Vec<Gateway>, DomainError> {
        self.repo.list_gateways().await
    }

    /// Get a gateway by serial number
    pub async fn get_gateway(&self, serial_number: &str) -> Result<Option<Gateway>, DomainError> {
        self.repo.get_gateway(serial_number).await
    }

    /// Whether `serial_number` is still free in the stored collection
    pub async fn is_unique_serial_number(&self, serial_number: &str) -> Result<bool, DomainError> {
        let gateways = self.repo.list_gateways().await?;
        Ok(gatehouse::is_unique_serial_number(serial_number, &gateways))
    }

    /// Empty gateway form checked against the current collection
    pub async fn gateway_form(&self) -> Result<GatewayForm, DomainError> {
        let snapshot = self.repo.list_gateways().await?;
        Ok(GatewayForm::new(self.rules.clone(), snapshot))
    }

    pub fn device_form(&self) -> DeviceForm {
        DeviceForm::new(self.rules.clone())
    }

    /// Validate and register a new gateway with no devices
    pub async fn register_gateway(&self, draft: GatewayDraft) -> Result<Gateway, DomainError> {
        let existing = self.repo.list_gateways().await?;
        self.rules.validate_gateway(&draft, &existing).into_result()?;

        let saved = self.repo.add_gateway(Gateway::from(draft)).await?;

        tracing::info!(
            "Registered Gateway: {} ({}) at {}",
            saved.name,
            saved.serial_number,
            saved.ip_address
        );

        Ok(saved)
    }

    /// Delete a gateway and every device attached to it
    pub async fn remove_gateway(&self, serial_number: &str) -> Result<bool, DomainError> {
        let removed = self.repo.remove_gateway(serial_number).await?;
        if removed {
            tracing::info!("Removed Gateway: {}", serial_number);
        }
        Ok(removed)
    }

    /// Devices of a gateway, `None` if the gateway is not registered
    pub async fn list_devices(
        &self,
        serial_number: &str,
    ) -> Result<Option<Vec<Device>>, DomainError> {
        self.repo.list_devices(serial_number).await
    }

    /// Whether another device can be attached to the gateway
    pub async fn can_add_device(&self, serial_number: &str) -> Result<bool, DomainError> {
        let gateway = self
            .repo
            .get_gateway(serial_number)
            .await?
            .ok_or_else(|| DomainError::gateway_not_found(serial_number))?;
        Ok(gateway.has_capacity())
    }

    /// Validate a device draft, assign the next uid and attach it
    pub async fn register_device(
        &self,
        serial_number: &str,
        draft: DeviceDraft,
    ) -> Result<Device, DomainError> {
        self.rules.validate_device(&draft).into_result()?;

        let saved = self.repo.attach_device(serial_number, draft).await?;

        tracing::info!(
            "Registered Device: {} ({}) on Gateway {}",
            saved.uid,
            saved.vendor,
            serial_number
        );

        Ok(saved)
    }

    /// Detach a device; an unknown uid is a no-op
    pub async fn remove_device(
        &self,
        serial_number: &str,
        uid: DeviceUid,
    ) -> Result<bool, DomainError> {
        let removed = self.repo.remove_device(serial_number, uid).await?;
        if removed {
            tracing::info!("Removed Device: {} from Gateway {}", uid, serial_number);
        }
        Ok(removed)
    }
}
