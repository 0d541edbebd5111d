//! Editor session: one identity, one notifier, any number of shells.

use std::collections::BTreeSet;
use std::sync::Arc;

use frontend_settings_sdk::{
    FrontendSettingsApi, SettingsError, SettingsType, TestsResource, UserContext,
};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::editors::TestEditor;
use crate::error::EditorError;
use crate::http_client::HttpSettingsClient;
use crate::lock::DocumentLockClient;
use crate::notifier::Notifier;
use crate::preview::Stage;
use crate::shell::TestEditorShell;
use crate::store::SettingsStore;

/// Context shared by the shells an editor opens.
///
/// Closing the session releases locks this editor still holds on the
/// documents it opened.
pub struct EditorSession {
    api: Arc<dyn FrontendSettingsApi>,
    ctx: UserContext,
    notifier: Arc<dyn Notifier>,
    stage: Stage,
    release_lock_on_close: bool,
    opened: Mutex<BTreeSet<SettingsType>>,
}

impl EditorSession {
    /// Session talking HTTP to the API at `config.base_url`.
    ///
    /// # Errors
    /// Returns [`EditorError::Config`] for an unusable configuration.
    pub fn open(config: &EditorConfig, notifier: Arc<dyn Notifier>) -> Result<Self, EditorError> {
        if config.user_email.trim().is_empty() {
            return Err(EditorError::Config(
                "user_email must not be empty".to_owned(),
            ));
        }
        let client = HttpSettingsClient::from_config(config)?;
        info!(base_url = %client.base_url(), user = %config.user_email, "Editor session opened");

        let mut session = Self::with_client(
            Arc::new(client),
            UserContext::new(config.user_email.clone()),
            notifier,
        );
        session.stage = config.stage;
        session.release_lock_on_close = config.release_lock_on_close;
        Ok(session)
    }

    /// Session over any implementation of the settings API.
    #[must_use]
    pub fn with_client(
        api: Arc<dyn FrontendSettingsApi>,
        ctx: UserContext,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            ctx,
            notifier,
            stage: Stage::default(),
            release_lock_on_close: true,
            opened: Mutex::new(BTreeSet::new()),
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn user(&self) -> &UserContext {
        &self.ctx
    }

    #[must_use]
    pub fn lock_client(&self, settings_type: SettingsType) -> DocumentLockClient {
        DocumentLockClient::new(Arc::clone(&self.api), self.ctx.clone(), settings_type)
    }

    /// Shell for the documents of `R`, edited with `editor`. Call
    /// [`TestEditorShell::load`] before use.
    pub fn shell<R, E>(&self, editor: E) -> TestEditorShell<R, E>
    where
        R: TestsResource,
        E: TestEditor<R::Variant>,
    {
        self.opened.lock().insert(R::SETTINGS_TYPE);
        TestEditorShell::new(
            SettingsStore::new(self.lock_client(R::SETTINGS_TYPE)),
            editor,
            Arc::clone(&self.notifier),
            self.stage,
        )
    }

    /// End the session, releasing every lock still held by this editor on
    /// the documents it opened.
    ///
    /// Every document is attempted; the first failure is returned.
    ///
    /// # Errors
    /// Returns the first fetch or unlock error.
    pub async fn close(self) -> Result<(), EditorError> {
        if !self.release_lock_on_close {
            return Ok(());
        }

        let opened = std::mem::take(&mut *self.opened.lock());
        let mut first_error: Option<SettingsError> = None;
        for settings_type in opened {
            let client = self.lock_client(settings_type);
            let released = match client.fetch().await {
                Ok(doc) if doc.is_locked_by_me() => client.request_unlock().await.map(|()| true),
                Ok(_) => Ok(false),
                Err(err) => Err(err),
            };
            match released {
                Ok(true) => info!(settings_type = %settings_type, "Lock released on close"),
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        settings_type = %settings_type,
                        error = %err,
                        "Failed to release lock on close"
                    );
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), |err| Err(err.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;

    #[test]
    fn open_rejects_blank_identity_and_bad_url() {
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::new());

        let blank = EditorConfig::new("http://localhost:8087", " ");
        assert!(matches!(
            EditorSession::open(&blank, Arc::clone(&notifier)),
            Err(EditorError::Config(_))
        ));

        let bad_url = EditorConfig::new("localhost", "alice@example.com");
        assert!(matches!(
            EditorSession::open(&bad_url, notifier),
            Err(EditorError::Config(_))
        ));
    }
}
