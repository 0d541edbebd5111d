use std::time::Duration;

/// Default User-Agent string for HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("promo-console-http/", env!("CARGO_PKG_VERSION"));

/// Transport-level timeout applied to every request unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpClient`](crate::HttpClient).
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout for a single request, including reading the response head.
    pub request_timeout: Duration,

    /// Value of the `User-Agent` header, unless the request sets its own.
    pub user_agent: String,

    /// Upper bound on response bodies read through [`HttpResponse`](crate::HttpResponse).
    pub max_body_size: usize,

    /// How long idle pooled connections are kept. `None` keeps them forever.
    pub pool_idle_timeout: Option<Duration>,

    pub pool_max_idle_per_host: usize,

    /// Requests queued in front of the connection pool.
    pub buffer_capacity: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_size: 10 * 1024 * 1024,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 8,
            buffer_capacity: 256,
        }
    }
}
