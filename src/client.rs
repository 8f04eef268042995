use std::fmt;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::{AppSvcError, ClientOptions, Request, Response, Result};

#[derive(Clone)]
/// Pooled HTTP transport that retries transient failures.
///
/// Clones share one connection pool. The pool is keyed by scheme and
/// authority, so `http://` and `https://` connections are never mixed, and
/// it is released when the last clone is dropped.
pub struct RetryingClient {
    http: reqwest::Client,
    options: ClientOptions,
}

impl fmt::Debug for RetryingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingClient")
            .field("options", &self.options)
            .finish()
    }
}

impl RetryingClient {
    /// Creates a client with its own connection pool.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout())
            .read_timeout(options.read_timeout())
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .build()
            .map_err(|err| AppSvcError::Config(format!("cannot build http client: {err}")))?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Sends `request`, retrying network failures and retryable statuses
    /// as the policy allows.
    ///
    /// Any final response is returned as-is, whatever its status; mapping
    /// statuses to errors is up to the caller. A network failure that is not
    /// retried surfaces as [`AppSvcError::Transport`].
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let policy = &self.options.retry;
        let eligible = policy.allows_method(&request.method);
        let connect = request
            .connect_timeout
            .unwrap_or_else(|| self.options.connect_timeout());
        let read = request
            .read_timeout
            .unwrap_or_else(|| self.options.read_timeout());

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %request.method, url = %request.url, eligible, "calling downstream");

        let mut retries = 0u32;
        loop {
            let can_retry = eligible && retries < policy.max_attempts();

            match self.attempt(&request, connect, read).await {
                Ok(mut response) => {
                    if can_retry && policy.retries_status(response.status) {
                        retries += 1;
                        self.wait_before_retry(retries, &format!("status {}", response.status))
                            .await;
                        continue;
                    }

                    response.attempts = retries + 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        url = %request.url,
                        status = response.status,
                        attempts = response.attempts,
                        "downstream returned"
                    );
                    return Ok(response);
                }
                Err(AttemptError::ReadTimeout(budget)) => {
                    if can_retry {
                        retries += 1;
                        self.wait_before_retry(retries, "read timeout").await;
                        continue;
                    }

                    #[cfg(feature = "tracing")]
                    tracing::warn!(url = %request.url, attempts = retries + 1, "downstream read timed out");
                    return Err(AppSvcError::ReadTimeout {
                        attempts: retries + 1,
                        timeout: budget,
                    });
                }
                Err(AttemptError::Transport(err)) => {
                    if err.is_builder() {
                        return Err(AppSvcError::InvalidRequest(err.to_string()));
                    }
                    if can_retry && should_retry_transport(&err) {
                        retries += 1;
                        self.wait_before_retry(retries, &err.to_string()).await;
                        continue;
                    }

                    #[cfg(feature = "tracing")]
                    tracing::warn!(url = %request.url, attempts = retries + 1, error = %err, "downstream call failed");
                    return Err(AppSvcError::Transport {
                        attempts: retries + 1,
                        source: err,
                    });
                }
            }
        }
    }

    /// One round trip. The dialer enforces the client's connect budget and
    /// every socket read is bounded by its read budget. Reading the body
    /// must finish within `read` of the response head, and the whole
    /// attempt is capped at `connect + read`.
    async fn attempt(
        &self,
        request: &Request,
        connect: Duration,
        read: Duration,
    ) -> std::result::Result<Response, AttemptError> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .timeout(connect + read);
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = timeout(read, response.text())
            .await
            .map_err(|_| AttemptError::ReadTimeout(read))??;

        Ok(Response {
            status,
            headers,
            body,
            attempts: 0,
        })
    }

    /// Sleeps for the scheduled backoff before retry `retry` (1-indexed).
    async fn wait_before_retry(&self, retry: u32, reason: &str) {
        let delay = self.options.retry.backoff(retry);

        #[cfg(feature = "tracing")]
        tracing::warn!(retry, reason, delay_ms = delay.as_millis() as u64, "retrying downstream call");
        #[cfg(not(feature = "tracing"))]
        let _ = reason;

        sleep(delay).await;
    }
}

enum AttemptError {
    Transport(reqwest::Error),
    /// The body did not arrive within the read budget.
    ReadTimeout(Duration),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Transport(err)
    }
}

/// Connection refused, timeouts, resets and truncated bodies are transient.
fn should_retry_transport(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
}
