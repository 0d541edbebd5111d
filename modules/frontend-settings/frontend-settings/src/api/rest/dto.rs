use frontend_settings_sdk::LockStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct LockQuery {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatusDto {
    pub lock_status: LockStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDto {
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub tests: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchivedTestsDto {
    pub tests: Vec<Value>,
}
