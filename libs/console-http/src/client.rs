use crate::builder::HttpClientBuilder;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use tower::buffer::Buffer;

/// Future type of the boxed inner service
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, HttpError>> + Send>>;

/// The buffered service stack shared by every clone of [`HttpClient`]
pub type BufferedService = Buffer<Request<Full<Bytes>>, ServiceFuture>;

/// HTTP client over a tower service stack.
///
/// `HttpClient` is `Clone + Send + Sync`; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: BufferedService,
    pub(crate) max_body_size: usize,
}

impl HttpClient {
    /// Create a client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a GET request builder.
    ///
    /// The URL must be absolute (`http://host/path` or `https://host/path`).
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    pub fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.max_body_size,
            method,
            url.to_owned(),
        )
    }
}

/// Map buffer errors to `HttpError`.
///
/// The buffer wraps inner service errors; anything else means the worker
/// task has gone away.
pub(crate) fn map_buffer_error(err: tower::BoxError) -> HttpError {
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(err) => {
            tracing::error!(
                error = %err,
                "buffer worker closed unexpectedly; service unavailable"
            );
            HttpError::ServiceClosed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn test_client() -> HttpClient {
        HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn get_returns_json() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/frontend-settings/epicTests");
            then.status(200).json_body(json!({"version": "v1"}));
        });

        let client = test_client();
        let url = format!("{}/frontend-settings/epicTests", server.base_url());
        let body: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();

        assert_eq!(body["version"], "v1");
    }

    #[tokio::test]
    async fn post_sends_json_body_with_content_type() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/save")
                .header("content-type", "application/json")
                .json_body(json!({"value": {}, "version": "v1"}));
            then.status(200);
        });

        let client = test_client();
        let url = format!("{}/save", server.base_url());
        let resp = client
            .post(&url)
            .json(&json!({"value": {}, "version": "v1"}))
            .unwrap()
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), http::StatusCode::OK);
        m.assert();
    }

    #[tokio::test]
    async fn default_headers_reach_the_server() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/whoami")
                .header("user-agent", "editor/1.0")
                .header("x-user-email", "alice@example.com");
            then.status(204);
        });

        let client = HttpClient::builder()
            .user_agent("editor/1.0")
            .default_header("x-user-email", "alice@example.com")
            .build()
            .unwrap();
        let url = format!("{}/whoami", server.base_url());
        let resp = client.get(&url).send().await.unwrap();

        assert_eq!(resp.status(), http::StatusCode::NO_CONTENT);
        m.assert();
    }

    #[tokio::test]
    async fn non_2xx_is_ok_from_send_and_err_from_json() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/lock");
            then.status(409)
                .header("content-type", "application/problem+json")
                .body(r#"{"code":"LOCK_CONFLICT"}"#);
        });

        let client = test_client();
        let url = format!("{}/lock", server.base_url());
        let resp = client.post(&url).send().await.unwrap();
        assert_eq!(resp.status(), http::StatusCode::CONFLICT);

        let err = resp.json::<serde_json::Value>().await.unwrap_err();
        match err {
            HttpError::HttpStatus {
                status,
                body_preview,
                content_type,
            } => {
                assert_eq!(status, http::StatusCode::CONFLICT);
                assert!(body_preview.contains("LOCK_CONFLICT"));
                assert_eq!(content_type.as_deref(), Some("application/problem+json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn body_size_limit_is_enforced() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/big");
            then.status(200).body("x".repeat(2048));
        });

        let client = HttpClient::builder().max_body_size(1024).build().unwrap();
        let url = format!("{}/big", server.base_url());
        let err = client.get(&url).send().await.unwrap().bytes().await.unwrap_err();

        assert!(matches!(err, HttpError::BodyTooLarge { limit: 1024, .. }));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(500));
        });

        let client = HttpClient::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let url = format!("{}/slow", server.base_url());
        let err = client.get(&url).send().await.unwrap_err();

        assert!(matches!(err, HttpError::Timeout(d) if d == Duration::from_millis(50)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = test_client();
        let err = client
            .get(&format!("http://{addr}/gone"))
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn http_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
