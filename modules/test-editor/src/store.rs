//! Typed working copy of a test document.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use frontend_settings_sdk::{
    LockStatus, SettingsDocument, SettingsError, SettingsUpdate, Test, TestList, TestsResource,
};
use tracing::debug;

use crate::lock::{DocumentLockClient, EditorMode};

/// Test type held by the document of `R`.
pub type TestOf<R> = Test<<R as TestsResource>::Variant>;

/// What happened to a test since the last fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modification {
    Edited,
    Created,
    /// Dropped from the document on the next save.
    Deleted,
    /// Moved to the archive on the next save.
    Archived,
}

impl Modification {
    #[must_use]
    pub fn is_removal(self) -> bool {
        matches!(self, Modification::Deleted | Modification::Archived)
    }
}

/// Last fetched document of `R` plus the editor's working copy of its tests.
pub struct SettingsStore<R: TestsResource> {
    client: DocumentLockClient,
    document: Option<SettingsDocument<TestList<TestOf<R>>>>,
    working: Vec<TestOf<R>>,
    modified: BTreeMap<String, Modification>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: TestsResource> SettingsStore<R> {
    #[must_use]
    pub fn new(client: DocumentLockClient) -> Self {
        Self {
            client,
            document: None,
            working: Vec::new(),
            modified: BTreeMap::new(),
            _resource: PhantomData,
        }
    }

    #[must_use]
    pub fn client(&self) -> &DocumentLockClient {
        &self.client
    }

    /// Replace the cached document and the working copy with the server's.
    ///
    /// # Errors
    /// Returns the fetch error, or [`SettingsError::Validation`] if the stored
    /// value does not have the shape of `R`.
    pub async fn refresh(&mut self) -> Result<EditorMode, SettingsError> {
        let document = self
            .client
            .fetch()
            .await?
            .decode::<TestList<TestOf<R>>>()?;
        debug!(
            settings_type = %R::SETTINGS_TYPE,
            version = %document.version,
            tests = document.value.tests.len(),
            "Settings fetched"
        );
        self.working.clone_from(&document.value.tests);
        self.modified.clear();
        self.document = Some(document);
        Ok(self.mode())
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.document
            .as_ref()
            .map_or(EditorMode::ReadOnlyUnlocked, |doc| {
                EditorMode::from_lock(&doc.lock_status, &doc.user_email)
            })
    }

    #[must_use]
    pub fn document(&self) -> Option<&SettingsDocument<TestList<TestOf<R>>>> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn lock_status(&self) -> Option<&LockStatus> {
        self.document.as_ref().map(|doc| &doc.lock_status)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.version.as_str())
    }

    /// Tests not marked for deletion or archiving, in document order.
    #[must_use]
    pub fn tests(&self) -> Vec<&TestOf<R>> {
        self.working
            .iter()
            .filter(|t| !self.is_removed(&t.name))
            .collect()
    }

    #[must_use]
    pub fn test(&self, name: &str) -> Option<&TestOf<R>> {
        self.visible_index(name).map(|i| &self.working[i])
    }

    #[must_use]
    pub fn modification(&self, name: &str) -> Option<Modification> {
        self.modified.get(name).copied()
    }

    #[must_use]
    pub fn modified(&self) -> &BTreeMap<String, Modification> {
        &self.modified
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        !self.modified.is_empty()
    }

    /// Names and nicknames of every test in the working copy.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.working
            .iter()
            .flat_map(|t| std::iter::once(t.name.as_str()).chain(t.nickname.as_deref()))
    }

    pub fn insert(&mut self, test: TestOf<R>) {
        self.modified.insert(test.name.clone(), Modification::Created);
        self.working.push(test);
    }

    /// Apply `update` to the named test and return the result.
    pub fn update(
        &mut self,
        name: &str,
        update: impl FnOnce(TestOf<R>) -> TestOf<R>,
    ) -> Option<&TestOf<R>> {
        let index = self.visible_index(name)?;
        let next = update(self.working[index].clone());

        let mark = self.modified.remove(name).unwrap_or(Modification::Edited);
        self.modified.insert(next.name.clone(), mark);
        self.working[index] = next;
        Some(&self.working[index])
    }

    /// Mark a test for deletion. A test created since the last fetch is
    /// dropped outright.
    pub fn mark_deleted(&mut self, name: &str) -> bool {
        let Some(index) = self.visible_index(name) else {
            return false;
        };
        if self.modified.get(name) == Some(&Modification::Created) {
            self.working.remove(index);
            self.modified.remove(name);
        } else {
            self.modified.insert(name.to_owned(), Modification::Deleted);
        }
        true
    }

    pub fn mark_archived(&mut self, name: &str) -> bool {
        if self.visible_index(name).is_none() {
            return false;
        }
        self.modified
            .insert(name.to_owned(), Modification::Archived);
        true
    }

    /// The tests array sent on save.
    #[must_use]
    pub fn tests_to_save(&self) -> Vec<TestOf<R>> {
        self.working
            .iter()
            .filter(|t| !self.is_removed(&t.name))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn tests_to_archive(&self) -> Vec<TestOf<R>> {
        self.working
            .iter()
            .filter(|t| self.modification(&t.name) == Some(Modification::Archived))
            .cloned()
            .collect()
    }

    /// Save the remaining tests under the version of the last fetch. Tests
    /// marked for archiving travel with the same request, so the server
    /// archives them only if the save goes through.
    ///
    /// # Errors
    /// Returns the save request's error.
    pub async fn save(&self) -> Result<(), SettingsError> {
        let Some(document) = &self.document else {
            return Err(SettingsError::internal("settings have not been fetched"));
        };

        let archived = self
            .tests_to_archive()
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SettingsError::internal(e.to_string()))?;

        let update = SettingsUpdate::new(
            TestList {
                tests: self.tests_to_save(),
            },
            document.version.clone(),
        )
        .with_archived(archived)
        .encode()?;
        self.client.save(update).await
    }

    fn is_removed(&self, name: &str) -> bool {
        self.modification(name).is_some_and(Modification::is_removal)
    }

    fn visible_index(&self, name: &str) -> Option<usize> {
        if self.is_removed(name) {
            return None;
        }
        self.working.iter().position(|t| t.name == name)
    }
}
