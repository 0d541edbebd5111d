//! Frontend Settings SDK
//!
//! This crate provides the public contract of the frontend settings API:
//! - `FrontendSettingsApi` trait implemented by the in-process and HTTP clients
//! - Document models (`SettingsDocument`, `LockStatus`, `Test`, ...)
//! - The `SettingsType` lookup table and typed `SettingsResource` bindings
//! - Error type (`SettingsError`) and the RFC 9457 `Problem` wire body
//!
//! Consumers hold the client as a trait object:
//! ```ignore
//! let api: Arc<dyn FrontendSettingsApi> = Arc::new(HttpSettingsClient::new(..));
//! let doc = api.fetch(&ctx, SettingsType::EpicTests).await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod features;
pub mod models;
pub mod problem;
pub mod settings_type;

pub use api::{FrontendSettingsApi, USER_EMAIL_HEADER};
pub use errors::SettingsError;
pub use features::{Test, TestStatus, Variant};
pub use models::{LockStatus, SettingsDocument, SettingsUpdate, TestList, UserContext};
pub use problem::Problem;
pub use settings_type::{SettingsResource, SettingsType, TestsResource};
