//! `FrontendSettingsApi` over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use console_http::{HttpClient, HttpError, RequestBuilder};
use frontend_settings_sdk::{
    FrontendSettingsApi, Problem, SettingsDocument, SettingsError, SettingsType, SettingsUpdate,
    USER_EMAIL_HEADER, UserContext,
};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::EditorConfig;
use crate::error::EditorError;

#[derive(Serialize, Deserialize)]
struct ArchivedTests {
    tests: Vec<Value>,
}

/// Client of the settings API rooted at a base URL.
#[derive(Clone)]
pub struct HttpSettingsClient {
    http: HttpClient,
    base_url: Url,
}

impl HttpSettingsClient {
    /// # Errors
    /// Returns [`EditorError::Config`] for a base URL that is not an absolute
    /// http(s) URL, or when the transport cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, EditorError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| EditorError::Config(format!("invalid base_url '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(EditorError::Config(format!(
                "base_url must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        // join() replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = HttpClient::builder()
            .timeout(request_timeout)
            .default_header("accept", "application/json")
            .build()
            .map_err(|e| EditorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// # Errors
    /// See [`HttpSettingsClient::new`].
    pub fn from_config(config: &EditorConfig) -> Result<Self, EditorError> {
        Self::new(&config.base_url, config.request_timeout)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, settings_type: SettingsType, suffix: &str) -> Result<String, SettingsError> {
        self.base_url
            .join(&format!("frontend-settings/{}{suffix}", settings_type.as_str()))
            .map(String::from)
            .map_err(|e| SettingsError::internal(format!("invalid request URL: {e}")))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Bytes, SettingsError> {
        let response = request.send().await.map_err(from_http_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(from_http_error)?;
        if status.is_success() {
            return Ok(body);
        }

        debug!(%status, "Settings API returned an error");
        Err(match serde_json::from_slice::<Problem>(&body) {
            Ok(problem) => problem.into_settings_error(),
            Err(_) => from_status(status, &body),
        })
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SettingsError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body)
            .map_err(|e| SettingsError::internal(format!("unexpected response body: {e}")))
    }

    fn post(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        suffix: &str,
    ) -> Result<RequestBuilder, SettingsError> {
        Ok(self
            .http
            .post(&self.url(settings_type, suffix)?)
            .header(USER_EMAIL_HEADER, ctx.email()))
    }

    fn get(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        suffix: &str,
    ) -> Result<RequestBuilder, SettingsError> {
        Ok(self
            .http
            .get(&self.url(settings_type, suffix)?)
            .header(USER_EMAIL_HEADER, ctx.email()))
    }
}

#[async_trait]
impl FrontendSettingsApi for HttpSettingsClient {
    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email()))]
    async fn fetch(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<SettingsDocument<Value>, SettingsError> {
        self.execute_json(self.get(ctx, settings_type, "")?).await
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email()))]
    async fn request_lock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.execute(self.post(ctx, settings_type, "/lock")?)
            .await
            .map(drop)
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email()))]
    async fn request_take_control(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.execute(self.post(ctx, settings_type, "/lock?force=true")?)
            .await
            .map(drop)
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email()))]
    async fn request_unlock(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<(), SettingsError> {
        self.execute(self.post(ctx, settings_type, "/unlock")?)
            .await
            .map(drop)
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email(), version = %update.version))]
    async fn save(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        update: SettingsUpdate<Value>,
    ) -> Result<(), SettingsError> {
        let request = self
            .post(ctx, settings_type, "")?
            .json(&update)
            .map_err(from_http_error)?;
        self.execute(request).await.map(drop)
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email(), count = tests.len()))]
    async fn archive(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
        tests: Vec<Value>,
    ) -> Result<(), SettingsError> {
        let request = self
            .post(ctx, settings_type, "/archive")?
            .json(&ArchivedTests { tests })
            .map_err(from_http_error)?;
        self.execute(request).await.map(drop)
    }

    #[instrument(skip_all, fields(settings_type = %settings_type, user = ctx.email()))]
    async fn list_archived(
        &self,
        ctx: &UserContext,
        settings_type: SettingsType,
    ) -> Result<Vec<Value>, SettingsError> {
        let archived: ArchivedTests = self
            .execute_json(self.get(ctx, settings_type, "/archive")?)
            .await?;
        Ok(archived.tests)
    }
}

fn from_http_error(err: HttpError) -> SettingsError {
    if err.is_transport() {
        SettingsError::network(err.to_string())
    } else {
        SettingsError::internal(err.to_string())
    }
}

/// Error for a failed response without a problem body.
fn from_status(status: StatusCode, body: &[u8]) -> SettingsError {
    match status {
        StatusCode::NOT_FOUND => SettingsError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SettingsError::Unauthorized,
        StatusCode::CONFLICT => SettingsError::lock_conflict(None),
        status if status.is_server_error() => {
            SettingsError::internal(format!("HTTP {status}: {}", String::from_utf8_lossy(body)))
        }
        status => SettingsError::network(format!("HTTP {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> HttpSettingsClient {
        HttpSettingsClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn alice() -> UserContext {
        UserContext::new("alice@example.com")
    }

    #[tokio::test]
    async fn fetch_sends_identity_and_decodes_document() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/frontend-settings/epicTests")
                .header("x-user-email", "alice@example.com")
                .header("accept", "application/json");
            then.status(200).json_body(json!({
                "value": {"tests": []},
                "version": "v1",
                "lockStatus": {"locked": false},
                "userEmail": "alice@example.com"
            }));
        });

        let doc = client(&server)
            .fetch(&alice(), SettingsType::EpicTests)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(doc.version, "v1");
        assert!(!doc.lock_status.locked);
    }

    #[tokio::test]
    async fn lock_conflict_problem_maps_to_lock_conflict() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/frontend-settings/bannerTests/lock");
            then.status(409)
                .header("content-type", "application/problem+json")
                .json_body(json!({
                    "type": "about:blank",
                    "title": "Conflict",
                    "status": 409,
                    "detail": "locked",
                    "code": "LOCK_CONFLICT",
                    "holder": "bob@example.com"
                }));
        });

        let err = client(&server)
            .request_lock(&alice(), SettingsType::BannerTests)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SettingsError::lock_conflict(Some("bob@example.com".to_owned()))
        );
    }

    #[tokio::test]
    async fn take_control_forces_the_lock() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/frontend-settings/epicTests/lock")
                .query_param("force", "true");
            then.status(200)
                .json_body(json!({"lockStatus": {"locked": true, "email": "alice@example.com"}}));
        });

        client(&server)
            .request_take_control(&alice(), SettingsType::EpicTests)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn save_posts_value_and_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/frontend-settings/amountsTests")
                .json_body(json!({"value": {"tests": []}, "version": "v1"}));
            then.status(200).json_body(json!({"version": "v2"}));
        });

        client(&server)
            .save(
                &alice(),
                SettingsType::AmountsTests,
                SettingsUpdate::new(json!({"tests": []}), "v1"),
            )
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn plain_error_statuses_are_classified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/frontend-settings/epicTests");
            then.status(404).body("not here");
        });
        server.mock(|when, then| {
            when.path("/frontend-settings/bannerTests");
            then.status(503).body("maintenance");
        });
        let client = client(&server);

        let err = client
            .fetch(&alice(), SettingsType::EpicTests)
            .await
            .unwrap_err();
        assert_eq!(err, SettingsError::NotFound);

        let err = client
            .fetch(&alice(), SettingsType::BannerTests)
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::Internal(ref m) if m.contains("maintenance")));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client =
            HttpSettingsClient::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();

        let err = client
            .fetch(&alice(), SettingsType::EpicTests)
            .await
            .unwrap_err();

        assert!(matches!(err, SettingsError::Network(_)));
    }

    #[tokio::test]
    async fn base_url_path_is_kept() {
        let client =
            HttpSettingsClient::new("http://localhost:8087/admin", Duration::from_secs(1)).unwrap();

        assert_eq!(
            client.url(SettingsType::ChannelSwitches, "/lock").unwrap(),
            "http://localhost:8087/admin/frontend-settings/channelSwitches/lock"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        assert!(matches!(
            HttpSettingsClient::new("ftp://example.com", Duration::from_secs(1)),
            Err(EditorError::Config(_))
        ));
    }
}
