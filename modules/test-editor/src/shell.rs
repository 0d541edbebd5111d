//! The editor shell: one settings document, one selected test, one editor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use frontend_settings_sdk::{SettingsError, TestsResource, Variant};
use tracing::{debug, info, warn};
use url::Url;

use crate::editors::TestEditor;
use crate::error::EditorError;
use crate::lock::EditorMode;
use crate::names::{check_new_name, validate_name};
use crate::notifier::{LOCK_CONFLICT_ALERT, Notifier, VALIDATION_ALERT, lock_lost_alert};
use crate::preview::{Stage, preview_url};
use crate::store::{SettingsStore, TestOf};
use crate::validation::ValidationAggregator;

/// Composes the lock workflow, the working copy and a per-feature editor.
///
/// Every action takes `&mut self`, so one shell runs its actions one at a
/// time. Failures the user should see are passed to the notifier before they
/// are returned.
pub struct TestEditorShell<R: TestsResource, E: TestEditor<R::Variant>> {
    store: SettingsStore<R>,
    editor: E,
    validation: ValidationAggregator,
    valid: Arc<AtomicBool>,
    notifier: Arc<dyn Notifier>,
    selected: Option<String>,
    stage: Stage,
}

impl<R: TestsResource, E: TestEditor<R::Variant>> TestEditorShell<R, E> {
    pub fn new(
        store: SettingsStore<R>,
        editor: E,
        notifier: Arc<dyn Notifier>,
        stage: Stage,
    ) -> Self {
        let valid = Arc::new(AtomicBool::new(true));
        let listener = Arc::clone(&valid);
        Self {
            store,
            editor,
            validation: ValidationAggregator::with_listener(move |is_valid| {
                listener.store(is_valid, Ordering::Relaxed);
            }),
            valid,
            notifier,
            selected: None,
            stage,
        }
    }

    /// Fetch the document and rebuild the working copy.
    ///
    /// Local edits are dropped. The selected test stays selected if it still
    /// exists.
    ///
    /// # Errors
    /// Returns the fetch error after alerting it.
    pub async fn load(&mut self) -> Result<EditorMode, EditorError> {
        let mode = match self.store.refresh().await {
            Ok(mode) => mode,
            Err(err) => {
                self.notifier.alert(&err.to_string());
                return Err(err.into());
            }
        };
        if self
            .selected
            .as_deref()
            .is_some_and(|name| self.store.test(name).is_none())
        {
            self.selected = None;
        }
        self.remount();
        Ok(mode)
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.store.mode()
    }

    #[must_use]
    pub fn store(&self) -> &SettingsStore<R> {
        &self.store
    }

    #[must_use]
    pub fn tests(&self) -> Vec<&TestOf<R>> {
        self.store.tests()
    }

    #[must_use]
    pub fn selected_test(&self) -> Option<&TestOf<R>> {
        self.selected.as_deref().and_then(|name| self.store.test(name))
    }

    /// Open `name` in the editor, or close the editor with `None`.
    ///
    /// Selection works in every mode. The validation map is rebuilt from the
    /// newly selected test.
    ///
    /// # Errors
    /// Returns [`EditorError::UnknownTest`] for a name not in the document.
    pub fn select_test(&mut self, name: Option<&str>) -> Result<(), EditorError> {
        if let Some(name) = name
            && self.store.test(name).is_none()
        {
            return Err(EditorError::UnknownTest(name.to_owned()));
        }
        self.selected = name.map(str::to_owned);
        self.remount();
        Ok(())
    }

    /// Apply `update` to the selected test. No request is made.
    ///
    /// # Errors
    /// Returns [`EditorError::ReadOnly`] outside edit mode and a name error
    /// when the update renames the test onto a taken name.
    pub fn on_test_change(
        &mut self,
        update: impl FnOnce(TestOf<R>) -> TestOf<R>,
    ) -> Result<&TestOf<R>, EditorError> {
        self.require_edit()?;
        let name = self.selected.clone().ok_or(EditorError::NoTestSelected)?;
        let current = self
            .store
            .test(&name)
            .cloned()
            .ok_or_else(|| EditorError::UnknownTest(name.clone()))?;

        let next = update(current);
        if next.name != name {
            check_new_name(
                &next.name,
                self.store.names().filter(|taken| *taken != name),
            )?;
        }
        let renamed = next.name.clone();

        if self.store.update(&name, |_| next).is_none() {
            return Err(EditorError::UnknownTest(name));
        }
        // Variants may have been renamed or dropped, so stale keys must go.
        self.selected = Some(renamed.clone());
        self.remount();
        self.store
            .test(&renamed)
            .ok_or(EditorError::UnknownTest(renamed))
    }

    /// Forward a field report from an editor form.
    pub fn set_validation_status_for_field(&mut self, field: &str, is_valid: bool) -> bool {
        self.validation.set_validation_status_for_field(field, is_valid)
    }

    /// Aggregate validity as last seen by the listener.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn validation(&self) -> &ValidationAggregator {
        &self.validation
    }

    /// Add an empty draft test and select it.
    ///
    /// # Errors
    /// Returns [`EditorError::ReadOnly`] outside edit mode, or a name error
    /// when `name` or `nickname` is blank or already used.
    pub fn create_test(&mut self, name: &str, nickname: Option<&str>) -> Result<(), EditorError> {
        self.require_edit()?;
        self.check_test_names(name, nickname)?;

        self.store
            .insert(TestOf::<R>::draft(name, nickname.map(str::to_owned)));
        info!(settings_type = %R::SETTINGS_TYPE, test = name, "Test created");
        self.select_test(Some(name))
    }

    /// Copy `source` as a new draft test and select the copy.
    ///
    /// # Errors
    /// As [`create_test`](Self::create_test), plus
    /// [`EditorError::UnknownTest`] for an unknown source.
    pub fn copy_test(
        &mut self,
        source: &str,
        name: &str,
        nickname: Option<&str>,
    ) -> Result<(), EditorError> {
        self.require_edit()?;
        let copy = self
            .store
            .test(source)
            .ok_or_else(|| EditorError::UnknownTest(source.to_owned()))?
            .copy_as(name, nickname.map(str::to_owned));
        self.check_test_names(name, nickname)?;

        self.store.insert(copy);
        info!(settings_type = %R::SETTINGS_TYPE, source, test = name, "Test copied");
        self.select_test(Some(name))
    }

    /// Drop a test from the next save.
    ///
    /// # Errors
    /// Returns [`EditorError::ReadOnly`] outside edit mode and
    /// [`EditorError::UnknownTest`] for an unknown name.
    pub fn delete_test(&mut self, name: &str) -> Result<(), EditorError> {
        self.require_edit()?;
        if !self.store.mark_deleted(name) {
            return Err(EditorError::UnknownTest(name.to_owned()));
        }
        debug!(settings_type = %R::SETTINGS_TYPE, test = name, "Test marked for deletion");
        self.deselect(name);
        Ok(())
    }

    /// Move a test to the archive on the next save.
    ///
    /// # Errors
    /// As [`delete_test`](Self::delete_test).
    pub fn archive_test(&mut self, name: &str) -> Result<(), EditorError> {
        self.require_edit()?;
        if !self.store.mark_archived(name) {
            return Err(EditorError::UnknownTest(name.to_owned()));
        }
        debug!(settings_type = %R::SETTINGS_TYPE, test = name, "Test marked for archiving");
        self.deselect(name);
        Ok(())
    }

    /// Add a variant with default copy to the selected test.
    ///
    /// # Errors
    /// Returns a name error when `name` is blank or taken in this test.
    pub fn create_variant(&mut self, name: &str) -> Result<&TestOf<R>, EditorError> {
        self.check_variant_name(name)?;
        let variant = R::Variant::with_name(name);
        self.on_test_change(|mut test| {
            test.variants.push(variant);
            test
        })
    }

    /// Add a copy of variant `source` under `name`.
    ///
    /// # Errors
    /// As [`create_variant`](Self::create_variant), plus
    /// [`EditorError::UnknownVariant`].
    pub fn clone_variant(&mut self, source: &str, name: &str) -> Result<&TestOf<R>, EditorError> {
        self.check_variant_name(name)?;
        let mut variant = self
            .selected_test()
            .and_then(|test| test.variant(source))
            .cloned()
            .ok_or_else(|| EditorError::UnknownVariant(source.to_owned()))?;
        variant.set_name(name.to_owned());
        self.on_test_change(|mut test| {
            test.variants.push(variant);
            test
        })
    }

    /// Remove a variant. The validation map is rebuilt so that the removed
    /// variant's fields no longer count.
    ///
    /// # Errors
    /// Returns [`EditorError::UnknownVariant`] for an unknown name.
    pub fn delete_variant(&mut self, name: &str) -> Result<(), EditorError> {
        self.require_edit()?;
        if self
            .selected_test()
            .ok_or(EditorError::NoTestSelected)?
            .variant(name)
            .is_none()
        {
            return Err(EditorError::UnknownVariant(name.to_owned()));
        }
        self.on_test_change(|mut test| {
            test.variants.retain(|v| v.name() != name);
            test
        })?;
        self.remount();
        Ok(())
    }

    /// Request the lock, then refetch whatever the outcome.
    ///
    /// # Errors
    /// Returns [`SettingsError::LockConflict`] when another editor holds it.
    pub async fn lock(&mut self) -> Result<EditorMode, EditorError> {
        let requested = self.store.client().request_lock().await;
        if let Err(err) = &requested {
            match err {
                SettingsError::LockConflict { holder } => {
                    warn!(
                        settings_type = %R::SETTINGS_TYPE,
                        holder = holder.as_deref().unwrap_or("unknown"),
                        "Lock request refused"
                    );
                    self.notifier.alert(LOCK_CONFLICT_ALERT);
                }
                other => self.notifier.alert(&other.to_string()),
            }
        }
        let refreshed = self.load().await;
        requested?;
        refreshed
    }

    /// Take the lock from whoever holds it, then refetch.
    ///
    /// # Errors
    /// Returns the request or fetch error.
    pub async fn take_control(&mut self) -> Result<EditorMode, EditorError> {
        let requested = self.store.client().request_take_control().await;
        if let Err(err) = &requested {
            self.notifier.alert(&err.to_string());
        }
        let refreshed = self.load().await;
        requested?;
        refreshed
    }

    /// Throw local edits away: release the lock if held, then refetch.
    ///
    /// Never writes the document. Calling it in a read-only mode only
    /// refetches.
    ///
    /// # Errors
    /// Returns the unlock or fetch error.
    pub async fn discard(&mut self) -> Result<EditorMode, EditorError> {
        if self.mode().can_edit() {
            let unlocked = self.store.client().request_unlock().await;
            if let Err(err) = unlocked {
                self.notifier.alert(&err.to_string());
                if let Err(refresh) = self.load().await {
                    warn!(
                        settings_type = %R::SETTINGS_TYPE,
                        error = %refresh,
                        "Refetch after failed unlock also failed"
                    );
                }
                return Err(err.into());
            }
        }
        self.load().await
    }

    /// Save the working copy if every reported field is valid.
    ///
    /// An invalid test is blocked locally: the user is alerted and no request
    /// is made. Otherwise the document is saved, which also releases the lock,
    /// and refetched whatever the outcome.
    ///
    /// # Errors
    /// Returns [`EditorError::ValidationFailed`] with the invalid fields,
    /// [`EditorError::ReadOnly`] outside edit mode, or the save error.
    pub async fn save(&mut self) -> Result<EditorMode, EditorError> {
        self.require_edit()?;
        if !self.is_valid() {
            let fields = self.validation.invalid_fields();
            warn!(settings_type = %R::SETTINGS_TYPE, ?fields, "Save blocked by invalid fields");
            self.notifier.alert(VALIDATION_ALERT);
            return Err(EditorError::ValidationFailed { fields });
        }

        let saved = self.store.save().await;
        match &saved {
            Ok(()) => info!(settings_type = %R::SETTINGS_TYPE, "Settings saved"),
            Err(SettingsError::LockConflict { holder }) => {
                self.notifier.alert(&lock_lost_alert(holder.as_deref()));
            }
            Err(err) => self.notifier.alert(&err.to_string()),
        }
        let refreshed = self.load().await;
        saved?;
        refreshed
    }

    /// Check that this editor still holds the lock it was editing under.
    ///
    /// When another editor has taken control the user is alerted and the
    /// document is refetched, dropping local edits. Returns whether the lock
    /// is still held; `false` without a request outside edit mode.
    ///
    /// # Errors
    /// Returns the fetch error.
    pub async fn check_lock_ownership(&mut self) -> Result<bool, EditorError> {
        if !self.mode().can_edit() {
            return Ok(false);
        }
        let document = match self.store.client().fetch().await {
            Ok(document) => document,
            Err(err) => {
                self.notifier.alert(&err.to_string());
                return Err(err.into());
            }
        };
        if document.lock_status.is_held_by(&document.user_email) {
            return Ok(true);
        }

        let holder = document.lock_status.email;
        warn!(
            settings_type = %R::SETTINGS_TYPE,
            holder = holder.as_deref().unwrap_or("nobody"),
            "Lock lost while editing"
        );
        self.notifier.alert(&lock_lost_alert(holder.as_deref()));
        self.load().await?;
        Ok(false)
    }

    /// Archived tests of this settings type, oldest first.
    ///
    /// # Errors
    /// Returns the request error, or [`SettingsError::Validation`] for an
    /// archived entry of the wrong shape.
    pub async fn list_archived(&self) -> Result<Vec<TestOf<R>>, EditorError> {
        let values = self.store.client().list_archived().await?;
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<TestOf<R>>(value).map_err(|e| {
                    EditorError::from(SettingsError::validation(
                        format!("tests[{index}]"),
                        e.to_string(),
                    ))
                })
            })
            .collect()
    }

    /// Preview link for `variant` of the selected test.
    #[must_use]
    pub fn preview_url(&self, variant: &str) -> Option<Url> {
        let test = self.selected_test()?;
        if test.variant(variant).is_none() {
            return None;
        }
        preview_url(self.stage, R::SETTINGS_TYPE, &test.name, variant)
    }

    fn require_edit(&self) -> Result<(), EditorError> {
        if self.mode().can_edit() {
            Ok(())
        } else {
            Err(EditorError::ReadOnly)
        }
    }

    fn check_test_names(&self, name: &str, nickname: Option<&str>) -> Result<(), EditorError> {
        check_new_name(name, self.store.names())?;
        if let Some(nickname) = nickname {
            check_new_name(nickname, self.store.names())?;
            if nickname.eq_ignore_ascii_case(name) {
                return Err(EditorError::DuplicateName {
                    name: nickname.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn check_variant_name(&self, name: &str) -> Result<(), EditorError> {
        self.require_edit()?;
        let test = self.selected_test().ok_or(EditorError::NoTestSelected)?;
        validate_name(name)?;
        check_new_name(name, test.variants.iter().map(Variant::name))
    }

    fn deselect(&mut self, name: &str) {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
            self.remount();
        }
    }

    /// Clear the validation map and let the editor report the selected test
    /// from scratch.
    fn remount(&mut self) {
        self.validation.reset();
        if let Some(test) = self.selected.as_deref().and_then(|name| self.store.test(name)) {
            self.editor.report_validity(test, &mut self.validation);
        }
    }
}
