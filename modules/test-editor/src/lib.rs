//! Test Editor
//!
//! Editor core for frontend settings tests: the lock workflow against the
//! settings API, the working copy of a test document, and the validation
//! gate in front of Save.
//!
//! ```ignore
//! let session = EditorSession::open(&config, Arc::new(TracingNotifier))?;
//! let mut shell = session.shell::<EpicTests, _>(EpicEditor);
//! shell.load().await?;
//! shell.lock().await?;
//! shell.create_test("2025-01-01_MY_TEST", None)?;
//! shell.save().await?;
//! session.close().await?;
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod editors;
pub mod error;
pub mod http_client;
pub mod lock;
pub mod names;
pub mod notifier;
pub mod preview;
pub mod session;
pub mod shell;
pub mod store;
pub mod validation;

pub use config::EditorConfig;
pub use editors::{TestEditor, variant_field};
pub use error::EditorError;
pub use http_client::HttpSettingsClient;
pub use lock::{DocumentLockClient, EditorMode};
pub use notifier::{
    LOCK_CONFLICT_ALERT, Notifier, RecordingNotifier, TracingNotifier, VALIDATION_ALERT,
};
pub use preview::Stage;
pub use session::EditorSession;
pub use shell::TestEditorShell;
pub use store::{Modification, SettingsStore, TestOf};
pub use validation::ValidationAggregator;
