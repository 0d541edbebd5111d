//! Frontend Settings Module Implementation
//!
//! Stores one versioned JSON document per settings type and arbitrates a
//! single editing lock per document. The public API is defined in
//! `frontend-settings-sdk` and re-exported here.

pub use frontend_settings_sdk::{FrontendSettingsApi, SettingsError, SettingsType};

pub mod module;
pub use module::FrontendSettingsModule;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
