//! Single-writer access to one settings document.

use std::sync::Arc;

use frontend_settings_sdk::{
    FrontendSettingsApi, LockStatus, SettingsDocument, SettingsError, SettingsType,
    SettingsUpdate, UserContext,
};
use serde_json::Value;
use tracing::{debug, info};

/// Editing state of a document as seen by this editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    ReadOnlyUnlocked,
    ReadOnlyLockedByOther,
    /// This editor holds the lock.
    EditMode,
}

impl EditorMode {
    #[must_use]
    pub fn from_lock(lock: &LockStatus, user_email: &str) -> Self {
        if lock.is_held_by(user_email) {
            EditorMode::EditMode
        } else if lock.locked {
            EditorMode::ReadOnlyLockedByOther
        } else {
            EditorMode::ReadOnlyUnlocked
        }
    }

    #[must_use]
    pub fn can_edit(self) -> bool {
        self == EditorMode::EditMode
    }
}

/// Lock and document requests for one settings type on behalf of one editor.
#[derive(Clone)]
pub struct DocumentLockClient {
    api: Arc<dyn FrontendSettingsApi>,
    ctx: UserContext,
    settings_type: SettingsType,
}

impl DocumentLockClient {
    #[must_use]
    pub fn new(
        api: Arc<dyn FrontendSettingsApi>,
        ctx: UserContext,
        settings_type: SettingsType,
    ) -> Self {
        Self {
            api,
            ctx,
            settings_type,
        }
    }

    #[must_use]
    pub fn settings_type(&self) -> SettingsType {
        self.settings_type
    }

    #[must_use]
    pub fn user(&self) -> &UserContext {
        &self.ctx
    }

    /// # Errors
    /// Returns the transport or server error; there is no retry.
    pub async fn fetch(&self) -> Result<SettingsDocument<Value>, SettingsError> {
        self.api.fetch(&self.ctx, self.settings_type).await
    }

    /// # Errors
    /// Returns [`SettingsError::LockConflict`] when another editor holds the lock.
    pub async fn request_lock(&self) -> Result<(), SettingsError> {
        self.api.request_lock(&self.ctx, self.settings_type).await?;
        info!(settings_type = %self.settings_type, user = self.ctx.email(), "Lock acquired");
        Ok(())
    }

    /// Take the lock whoever holds it.
    ///
    /// # Errors
    /// Returns the transport or server error.
    pub async fn request_take_control(&self) -> Result<(), SettingsError> {
        self.api
            .request_take_control(&self.ctx, self.settings_type)
            .await?;
        info!(settings_type = %self.settings_type, user = self.ctx.email(), "Took control");
        Ok(())
    }

    /// # Errors
    /// Returns [`SettingsError::LockConflict`] when the lock belongs to someone else.
    pub async fn request_unlock(&self) -> Result<(), SettingsError> {
        self.api
            .request_unlock(&self.ctx, self.settings_type)
            .await?;
        info!(settings_type = %self.settings_type, user = self.ctx.email(), "Lock released");
        Ok(())
    }

    /// Replace the document under the version from the last fetch.
    ///
    /// # Errors
    /// Returns [`SettingsError::VersionConflict`] for a stale version and
    /// [`SettingsError::LockConflict`] when the lock was lost.
    pub async fn save(&self, update: SettingsUpdate<Value>) -> Result<(), SettingsError> {
        debug!(
            settings_type = %self.settings_type,
            version = %update.version,
            archived = update.archived.len(),
            "Saving settings"
        );
        self.api.save(&self.ctx, self.settings_type, update).await
    }

    /// # Errors
    /// Returns the transport or server error.
    pub async fn list_archived(&self) -> Result<Vec<Value>, SettingsError> {
        self.api.list_archived(&self.ctx, self.settings_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn mode_follows_lock_holder() {
        let me = "alice@example.com";
        assert_eq!(
            EditorMode::from_lock(&LockStatus::unlocked(), me),
            EditorMode::ReadOnlyUnlocked
        );
        assert_eq!(
            EditorMode::from_lock(&LockStatus::held_by(me, OffsetDateTime::UNIX_EPOCH), me),
            EditorMode::EditMode
        );
        assert_eq!(
            EditorMode::from_lock(
                &LockStatus::held_by("bob@example.com", OffsetDateTime::UNIX_EPOCH),
                me
            ),
            EditorMode::ReadOnlyLockedByOther
        );
        assert!(EditorMode::EditMode.can_edit());
        assert!(!EditorMode::ReadOnlyLockedByOther.can_edit());
    }
}
