use std::collections::HashMap;

use async_trait::async_trait;
use frontend_settings_sdk::SettingsType;
use parking_lot::RwLock;

use crate::domain::repo::{DocumentRepository, StoredDocument};

/// Process-local document store.
///
/// Every operation completes under a single lock acquisition, which is what
/// makes `compare_and_swap` atomic.
#[derive(Default)]
pub struct InMemoryRepository {
    documents: RwLock<HashMap<SettingsType, StoredDocument>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryRepository {
    async fn find(&self, settings_type: SettingsType) -> anyhow::Result<Option<StoredDocument>> {
        Ok(self.documents.read().get(&settings_type).cloned())
    }

    async fn insert_if_absent(
        &self,
        settings_type: SettingsType,
        doc: StoredDocument,
    ) -> anyhow::Result<StoredDocument> {
        let mut documents = self.documents.write();
        Ok(documents.entry(settings_type).or_insert(doc).clone())
    }

    async fn compare_and_swap(
        &self,
        settings_type: SettingsType,
        expected_revision: u64,
        doc: StoredDocument,
    ) -> anyhow::Result<bool> {
        let mut documents = self.documents.write();
        match documents.get_mut(&settings_type) {
            Some(current) if current.revision == expected_revision => {
                *current = doc;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => anyhow::bail!("{settings_type} document disappeared during update"),
        }
    }
}
