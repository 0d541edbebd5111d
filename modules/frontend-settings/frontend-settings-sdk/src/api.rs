//! `FrontendSettingsApi` trait definition.
//!
//! Every method takes a `UserContext` identifying the editor on whose behalf
//! the call is made. Lock ownership is tracked by the server per settings
//! document, keyed by that identity.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SettingsError;
use crate::models::{SettingsDocument, SettingsUpdate, UserContext};
use crate::settings_type::SettingsType;

/// Request header carrying the editor identity.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Public API of the frontend settings store.
///
/// Values travel as raw JSON at this boundary so that the trait stays object
/// safe; typed access goes through [`SettingsDocument::decode`] and the
/// [`SettingsResource`](crate::SettingsResource) bindings.
#[async_trait]
pub trait FrontendSettingsApi: Send + Sync {
    /// Fetch the current document, including its lock status.
    async fn fetch(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<SettingsDocument<Value>, SettingsError>;

    /// Lock the document for the calling user.
    ///
    /// Fails with [`SettingsError::LockConflict`] if another user holds the lock.
    /// Re-locking a document already held by the caller succeeds.
    async fn request_lock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError>;

    /// Transfer the lock to the calling user regardless of the current holder.
    async fn request_take_control(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError>;

    /// Release the lock held by the calling user.
    async fn request_unlock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError>;

    /// Replace the document value wholesale.
    ///
    /// The caller must hold the lock and `update.version` must match the
    /// current version. A successful save releases the lock.
    async fn save(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        update: SettingsUpdate<Value>,
    ) -> Result<(), SettingsError>;

    /// Append tests to the archive of a settings type.
    async fn archive(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        tests: Vec<Value>,
    ) -> Result<(), SettingsError>;

    /// List archived tests of a settings type, oldest first.
    async fn list_archived(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<Vec<Value>, SettingsError>;
}
