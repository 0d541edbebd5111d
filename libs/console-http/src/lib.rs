//! HTTP client for the promo console editor.
//!
//! A thin hyper-based client with:
//! - TLS via rustls (webpki roots), plain HTTP allowed for local servers
//! - Connection pooling
//! - A per-request timeout
//! - Default header injection (User-Agent, editor identity)
//!
//! # Example
//!
//! ```ignore
//! use console_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("promo-console/1.0")
//!     .build()?;
//!
//! let doc: serde_json::Value = client
//!     .get("http://localhost:8087/frontend-settings/epicTests")
//!     .header("x-user-email", "editor@example.com")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, HttpClientConfig};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{DefaultHeadersLayer, DefaultHeadersService};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
