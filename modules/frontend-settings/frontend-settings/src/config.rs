use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontendSettingsConfig {
    /// Directory of `<settingsType>.json` files loaded at start-up.
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
    /// Upper bound on request bodies, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for FrontendSettingsConfig {
    fn default() -> Self {
        Self {
            seed_dir: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    8 * 1024 * 1024
}
