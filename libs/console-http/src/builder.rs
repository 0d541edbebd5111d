use crate::client::{BufferedService, HttpClient};
use crate::config::HttpClientConfig;
use crate::error::HttpError;
use crate::layers::DefaultHeadersLayer;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::Response;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::sync::Arc;
use std::time::Duration;
use tower::buffer::Buffer;
use tower::timeout::TimeoutLayer;
use tower::{ServiceBuilder, ServiceExt};

/// Builder for [`HttpClient`].
#[must_use]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    default_headers: Vec<(String, String)>,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            default_headers: Vec::new(),
        }
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size read by [`HttpResponse`](crate::HttpResponse).
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Add a header sent with every request unless the request sets it.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Must be called from within a Tokio runtime: the request buffer spawns
    /// its worker task here.
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or a default header is invalid.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let timeout = self.config.request_timeout;

        let connector = build_connector()?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        // pool_timer is required for pool_idle_timeout to take effect
        client_builder
            .pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);
        if let Some(idle_timeout) = self.config.pool_idle_timeout {
            client_builder.pool_idle_timeout(idle_timeout);
        }
        let hyper_client = client_builder.build::<_, Full<Bytes>>(connector);

        let mut headers = vec![(
            http::header::USER_AGENT.as_str().to_owned(),
            self.config.user_agent.clone(),
        )];
        headers.extend(self.default_headers);
        let headers_layer = DefaultHeadersLayer::try_new(headers)?;

        // Request flow (outer to inner):
        //   Buffer -> ErrorMapping -> Timeout -> DefaultHeaders -> hyper_client
        //
        // send() returns Ok for every HTTP status; only transport failures and
        // timeouts come back as Err.
        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(timeout))
            .layer(headers_layer)
            .service(hyper_client)
            .map_response(box_response_body)
            .map_err(move |e: tower::BoxError| map_tower_error(e, timeout))
            .boxed_clone();

        let buffered: BufferedService = Buffer::new(service, self.config.buffer_capacity.max(1));

        Ok(HttpClient {
            service: buffered,
            max_body_size: self.config.max_body_size,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn map_tower_error(err: tower::BoxError, timeout: Duration) -> HttpError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return HttpError::Timeout(timeout);
    }
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(other) => HttpError::Transport(other),
    }
}

fn box_response_body<B>(response: Response<B>) -> Response<ResponseBody>
where
    B: hyper::body::Body<Data = Bytes> + Send + Sync + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = response.into_parts();
    let boxed: ResponseBody = body.map_err(Into::into).boxed();
    Response::from_parts(parts, boxed)
}

/// HTTPS connector over webpki roots that also accepts plain `http://` URLs.
fn build_connector() -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let provider = rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()));
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(provider)
        .map_err(|e| HttpError::Tls(Box::new(e)))?
        .https_or_http()
        .enable_http1()
        .build();
    Ok(connector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};

    #[test]
    fn builder_overrides_config() {
        let builder = HttpClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("editor/2.0")
            .max_body_size(1024)
            .default_header("x-user-email", "alice@example.com");

        assert_eq!(builder.config.request_timeout, Duration::from_secs(5));
        assert_eq!(builder.config.user_agent, "editor/2.0");
        assert_eq!(builder.config.max_body_size, 1024);
        assert_eq!(builder.default_headers.len(), 1);
    }

    #[test]
    fn default_builder_uses_default_config() {
        let builder = HttpClientBuilder::default();
        assert_eq!(builder.config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(builder.config.user_agent, DEFAULT_USER_AGENT);
    }

    #[tokio::test]
    async fn invalid_default_header_fails_build() {
        let result = HttpClientBuilder::new()
            .default_header("x-user-email", "bad\nvalue")
            .build();
        assert!(matches!(result, Err(HttpError::InvalidHeaderValue(_))));
    }
}
