use async_trait::async_trait;
use frontend_settings_sdk::{LockStatus, SettingsType};
use serde_json::Value;

/// A document as held by storage.
///
/// `version` changes only when the value is saved; `revision` changes on every
/// write (lock changes included) and guards compare-and-swap updates.
/// Archived tests live beside the value so one swap moves tests out of the
/// document and into the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub value: Value,
    pub version: String,
    pub lock: LockStatus,
    pub archive: Vec<Value>,
    pub revision: u64,
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find(&self, settings_type: SettingsType) -> anyhow::Result<Option<StoredDocument>>;

    /// Store `doc` unless a document already exists; returns the stored one.
    async fn insert_if_absent(
        &self,
        settings_type: SettingsType,
        doc: StoredDocument,
    ) -> anyhow::Result<StoredDocument>;

    /// Replace the document if its revision is still `expected_revision`.
    async fn compare_and_swap(
        &self,
        settings_type: SettingsType,
        expected_revision: u64,
        doc: StoredDocument,
    ) -> anyhow::Result<bool>;
}
