//! Start-up seeding from a directory of `<settingsType>.json` files.

use std::path::Path;

use anyhow::Context;
use frontend_settings_sdk::SettingsType;
use serde_json::Value;
use tracing::info;

use crate::domain::service::Service;

/// Load every `<settingsType>.json` present in `dir` into the store.
///
/// Missing files are skipped; unknown file names are ignored.
///
/// # Errors
/// Returns an error if a present file cannot be read, is not JSON, or does not
/// match the shape of its settings type.
pub async fn seed_from_dir(service: &Service, dir: &Path) -> anyhow::Result<usize> {
    let mut seeded = 0;
    for settings_type in SettingsType::ALL {
        let path = dir.join(format!("{settings_type}.json"));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }

        let raw = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let value: Value = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing seed file {}", path.display()))?;
        service
            .seed(settings_type, value)
            .await
            .with_context(|| format!("seeding {settings_type} from {}", path.display()))?;

        info!(settings_type = %settings_type, path = %path.display(), "Seeded settings");
        seeded += 1;
    }
    Ok(seeded)
}
