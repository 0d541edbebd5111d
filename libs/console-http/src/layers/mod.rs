//! Tower layers composed into the client stack.

mod default_headers;

pub use default_headers::{DefaultHeadersLayer, DefaultHeadersService};
