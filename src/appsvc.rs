use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    AppReleaseDetails, AppSvcError, ClientOptions, Request, Response, Result, RetryPolicy,
    RetryingClient, SearchAppsAclRequest, SearchAppsAclResponse, SearchAppsOutRequest,
    SearchAppsResponse,
};

#[derive(Clone)]
/// Typed client for the application catalog service.
pub struct AppSvcClient {
    http: RetryingClient,
    base_url: String,
}

impl fmt::Debug for AppSvcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSvcClient")
            .field("base_url", &self.base_url)
            .field("options", self.http.options())
            .finish()
    }
}

impl AppSvcClient {
    /// Creates a client for the catalog at `base_url` with default options.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Creates a client with explicit timeout, pool and retry options.
    pub fn with_options(base_url: impl AsRef<str>, options: ClientOptions) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(AppSvcError::Config("catalog base URL is empty".to_owned()));
        }
        Ok(Self {
            http: RetryingClient::new(options)?,
            base_url,
        })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `APPSVC_URL` — catalog base URL (required)
    /// - `APPSVC_CONNECT_TIMEOUT_MS`, `APPSVC_READ_TIMEOUT_MS` — timeouts
    /// - `APPSVC_MAX_ATTEMPTS`, `APPSVC_BACKOFF_FACTOR` — retry policy
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("APPSVC_URL").map_err(|_| {
            AppSvcError::Config("missing APPSVC_URL environment variable".to_owned())
        })?;

        let defaults = ClientOptions::default();
        let max_attempts = env_or("APPSVC_MAX_ATTEMPTS", defaults.retry.max_attempts())?;
        let backoff_factor = env_or("APPSVC_BACKOFF_FACTOR", defaults.retry.backoff_factor())?;
        let options = ClientOptions {
            connect_timeout_ms: env_or("APPSVC_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms)?,
            read_timeout_ms: env_or("APPSVC_READ_TIMEOUT_MS", defaults.read_timeout_ms)?,
            retry: RetryPolicy::new(max_attempts, backoff_factor)?,
            ..defaults
        };
        Self::with_options(url, options)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying retrying transport.
    pub fn transport(&self) -> &RetryingClient {
        &self.http
    }

    /// Searches the catalog.
    pub async fn search_apps(&self, req: &SearchAppsOutRequest) -> Result<SearchAppsResponse> {
        self.post_json("/apps/search", req).await
    }

    /// Autocomplete list for the search box.
    pub async fn search_apps_acl(
        &self,
        req: &SearchAppsAclRequest,
    ) -> Result<SearchAppsAclResponse> {
        self.post_json("/apps/search/acl", req).await
    }

    /// Full details of one app release.
    pub async fn get_app_release(&self, app_release_uuid: &str) -> Result<AppReleaseDetails> {
        let url = format!("{}/apps/{}", self.base_url, app_release_uuid.trim());
        let request = Request::get(url).with_json_content_type();
        let response = self.http.execute(request).await?;
        decode_ok(response)
    }

    async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let request = Request::json(Method::POST, url, payload)?;
        let response = self.http.execute(request).await?;
        decode_ok(response)
    }
}

/// Anything but 200 is a failed call carrying the body verbatim.
fn decode_ok<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.is_ok() {
        return Err(AppSvcError::Http {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|err| {
        AppSvcError::Decode(format!(
            "invalid catalog response JSON: {err}; body: {}",
            response.body
        ))
    })
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|err| AppSvcError::Config(format!("{name} is invalid: {err}"))),
        _ => Ok(default),
    }
}
