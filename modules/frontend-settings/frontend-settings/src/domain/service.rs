use std::sync::Arc;

use frontend_settings_sdk::{
    LockStatus, SettingsDocument, SettingsType, SettingsUpdate, UserContext,
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::repo::{DocumentRepository, StoredDocument};

/// Retries of a compare-and-swap cycle before giving up.
const MAX_CAS_ATTEMPTS: usize = 16;

pub struct Service {
    repo: Arc<dyn DocumentRepository>,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_document(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<SettingsDocument<Value>, DomainError> {
        let doc = self.load_or_init(settings_type).await?;
        Ok(SettingsDocument {
            value: doc.value,
            version: doc.version,
            lock_status: doc.lock,
            user_email: ctx.email().to_owned(),
        })
    }

    pub async fn lock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<LockStatus, DomainError> {
        let lock = self
            .mutate(settings_type, |doc| {
                if let Some(holder) = holder_other_than(&doc.lock, ctx) {
                    return Err(DomainError::LockConflict { holder });
                }
                doc.lock = LockStatus::held_by(ctx.email(), OffsetDateTime::now_utc());
                Ok(doc.lock.clone())
            })
            .await?;

        info!(settings_type = %settings_type, user = ctx.email(), "Settings locked");
        Ok(lock)
    }

    pub async fn take_control(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<LockStatus, DomainError> {
        let (previous, lock) = self
            .mutate(settings_type, |doc| {
                let previous = holder_other_than(&doc.lock, ctx);
                doc.lock = LockStatus::held_by(ctx.email(), OffsetDateTime::now_utc());
                Ok((previous, doc.lock.clone()))
            })
            .await?;

        if let Some(previous) = previous {
            warn!(
                settings_type = %settings_type,
                user = ctx.email(),
                previous_holder = %previous,
                "Lock taken over from another editor"
            );
        } else {
            info!(settings_type = %settings_type, user = ctx.email(), "Settings locked (forced)");
        }
        Ok(lock)
    }

    pub async fn unlock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<LockStatus, DomainError> {
        let lock = self
            .mutate(settings_type, |doc| {
                if let Some(holder) = holder_other_than(&doc.lock, ctx) {
                    return Err(DomainError::LockConflict { holder });
                }
                doc.lock = LockStatus::unlocked();
                Ok(doc.lock.clone())
            })
            .await?;

        info!(settings_type = %settings_type, user = ctx.email(), "Settings unlocked");
        Ok(lock)
    }

    /// Replace the document value, append `update.archived` to the archive
    /// and release the caller's lock, all in one write.
    ///
    /// Lock ownership is checked before the version, so an editor whose lock
    /// was taken over learns that rather than seeing a generic conflict.
    pub async fn save(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        update: SettingsUpdate<Value>,
    ) -> Result<String, DomainError> {
        settings_type
            .validate_value(&update.value)
            .map_err(|e| DomainError::validation("value", e.to_string()))?;
        validate_archived(settings_type, &update.archived, "archived")?;

        let SettingsUpdate {
            value,
            version,
            archived,
        } = update;
        let archived_count = archived.len();
        let new_version = self
            .mutate(settings_type, |doc| {
                if !doc.lock.is_held_by(ctx.email()) {
                    return Err(DomainError::LockConflict {
                        holder: doc
                            .lock
                            .email
                            .clone()
                            .unwrap_or_else(|| "nobody".to_owned()),
                    });
                }
                if doc.version != version {
                    return Err(DomainError::VersionConflict {
                        supplied: version.clone(),
                        current: doc.version.clone(),
                    });
                }
                doc.value = value.clone();
                doc.version = new_version_token();
                doc.lock = LockStatus::unlocked();
                doc.archive.extend(archived.iter().cloned());
                Ok(doc.version.clone())
            })
            .await?;

        info!(
            settings_type = %settings_type,
            user = ctx.email(),
            version = %new_version,
            archived = archived_count,
            "Settings saved"
        );
        Ok(new_version)
    }

    /// Append tests to the archive. Only the lock holder may archive.
    pub async fn archive(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        tests: Vec<Value>,
    ) -> Result<(), DomainError> {
        validate_archived(settings_type, &tests, "tests")?;

        let count = tests.len();
        self.mutate(settings_type, |doc| {
            if !doc.lock.is_held_by(ctx.email()) {
                return Err(DomainError::LockConflict {
                    holder: doc
                        .lock
                        .email
                        .clone()
                        .unwrap_or_else(|| "nobody".to_owned()),
                });
            }
            doc.archive.extend(tests.iter().cloned());
            Ok(())
        })
        .await?;

        info!(settings_type = %settings_type, user = ctx.email(), count, "Tests archived");
        Ok(())
    }

    pub async fn list_archived(&self, settings_type: SettingsType) -> Result<Vec<Value>, DomainError> {
        Ok(self.load_or_init(settings_type).await?.archive)
    }

    /// Seed a document with `value`, replacing whatever is stored.
    pub async fn seed(&self, settings_type: SettingsType, value: Value) -> Result<(), DomainError> {
        settings_type
            .validate_value(&value)
            .map_err(|e| DomainError::validation("value", e.to_string()))?;

        self.mutate(settings_type, |doc| {
            doc.value = value.clone();
            doc.version = new_version_token();
            Ok(())
        })
        .await?;
        debug!(settings_type = %settings_type, "Settings seeded");
        Ok(())
    }

    async fn load_or_init(&self, settings_type: SettingsType) -> Result<StoredDocument, DomainError> {
        if let Some(doc) = self.repo.find(settings_type).await? {
            return Ok(doc);
        }
        let initial = StoredDocument {
            value: settings_type.empty_value(),
            version: new_version_token(),
            lock: LockStatus::unlocked(),
            archive: Vec::new(),
            revision: 0,
        };
        Ok(self.repo.insert_if_absent(settings_type, initial).await?)
    }

    /// Apply `f` to the current document and store the result atomically.
    ///
    /// `f` may run more than once when concurrent writers race.
    async fn mutate<T, F>(&self, settings_type: SettingsType, f: F) -> Result<T, DomainError>
    where
        F: Fn(&mut StoredDocument) -> Result<T, DomainError> + Send,
        T: Send,
    {
        for _ in 0..MAX_CAS_ATTEMPTS {
            let current = self.load_or_init(settings_type).await?;
            let mut next = current.clone();
            let out = f(&mut next)?;
            next.revision = current.revision + 1;
            if self
                .repo
                .compare_and_swap(settings_type, current.revision, next)
                .await?
            {
                return Ok(out);
            }
            debug!(settings_type = %settings_type, "Concurrent write detected, retrying");
        }
        Err(DomainError::Internal(format!(
            "{settings_type} is under too much write contention"
        )))
    }
}

fn holder_other_than(lock: &LockStatus, ctx: &UserContext) -> Option<String> {
    if lock.is_held_by_other(ctx.email()) {
        Some(
            lock.email
                .clone()
                .unwrap_or_else(|| "another user".to_owned()),
        )
    } else {
        None
    }
}

/// Check that `tests` may be archived under `settings_type`; `field` names
/// the list in errors.
fn validate_archived(
    settings_type: SettingsType,
    tests: &[Value],
    field: &str,
) -> Result<(), DomainError> {
    if tests.is_empty() {
        return Ok(());
    }
    if !settings_type.holds_tests() {
        return Err(DomainError::validation(
            field,
            format!("{settings_type} does not hold tests"),
        ));
    }
    for (index, test) in tests.iter().enumerate() {
        settings_type
            .validate_test(test)
            .map_err(|e| DomainError::validation(format!("{field}[{index}]"), e.to_string()))?;
    }
    Ok(())
}

fn new_version_token() -> String {
    Uuid::new_v4().to_string()
}
