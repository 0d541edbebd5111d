use std::sync::Arc;

use async_trait::async_trait;
use frontend_settings_sdk::{
    FrontendSettingsApi, SettingsDocument, SettingsError, SettingsType, SettingsUpdate,
    UserContext,
};
use serde_json::Value;

use crate::domain::service::Service;

/// In-process client: calls the domain service directly, no HTTP hop.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FrontendSettingsApi for LocalClient {
    async fn fetch(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<SettingsDocument<Value>, SettingsError> {
        self.service
            .get_document(ctx, settings_type)
            .await
            .map_err(Into::into)
    }

    async fn request_lock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.service.lock(ctx, settings_type).await?;
        Ok(())
    }

    async fn request_take_control(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.service.take_control(ctx, settings_type).await?;
        Ok(())
    }

    async fn request_unlock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.service.unlock(ctx, settings_type).await?;
        Ok(())
    }

    async fn save(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        update: SettingsUpdate<Value>,
    ) -> Result<(), SettingsError> {
        self.service.save(ctx, settings_type, update).await?;
        Ok(())
    }

    async fn archive(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        tests: Vec<Value>,
    ) -> Result<(), SettingsError> {
        self.service
            .archive(ctx, settings_type, tests)
            .await
            .map_err(Into::into)
    }

    async fn list_archived(
        &self,
        _ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<Vec<Value>, SettingsError> {
        self.service
            .list_archived(settings_type)
            .await
            .map_err(Into::into)
    }
}
