use serde::Serialize;

/// Wire code for any failed call to the catalog service.
pub const ERROR_APPSVC: (u16, &str) = (1409, "appsvc error");
/// Wire code for failures that have no dedicated mapping.
pub const ERROR_UNKNOWN: (u16, &str) = (1500, "unknown error");

/// Error type returned by the catalog client and the retrying transport.
#[derive(Debug, thiserror::Error)]
pub enum AppSvcError {
    /// Network failure from `reqwest` after the retry budget was spent
    /// or on a method that is not retry-eligible.
    #[error("transport error after {attempts} attempt(s): {source}")]
    Transport {
        /// Attempts made before giving up.
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
    /// The response body did not finish arriving within the read budget.
    #[error("read timed out after {timeout:?} ({attempts} attempt(s))")]
    ReadTimeout {
        attempts: u32,
        timeout: std::time::Duration,
    },
    /// Final response status was not 200; carries the raw body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// A 200 response whose body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Invalid client options or environment.
    #[error("config error: {0}")]
    Config(String),
    /// The outgoing request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AppSvcError {
    /// Opaque diagnostic payload: the downstream body when there is one,
    /// the error description otherwise.
    pub fn message(&self) -> String {
        match self {
            AppSvcError::Http { body, .. } if !body.is_empty() => body.clone(),
            AppSvcError::Http { .. } => ERROR_APPSVC.1.to_owned(),
            AppSvcError::Transport { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the failure came from talking to the downstream service,
    /// as opposed to local misconfiguration.
    pub fn is_downstream(&self) -> bool {
        matches!(
            self,
            AppSvcError::Transport { .. }
                | AppSvcError::ReadTimeout { .. }
                | AppSvcError::Http { .. }
                | AppSvcError::Decode(_)
        )
    }
}

/// JSON error body returned to API consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl ErrorBody {
    /// HTTP status to pair with this body.
    pub fn http_status(&self) -> u16 {
        if self.code == ERROR_UNKNOWN.0 {
            500
        } else {
            409
        }
    }

    pub fn unknown() -> Self {
        Self {
            code: ERROR_UNKNOWN.0,
            message: ERROR_UNKNOWN.1.to_owned(),
        }
    }
}

impl From<&AppSvcError> for ErrorBody {
    fn from(err: &AppSvcError) -> Self {
        if !err.is_downstream() {
            return Self::unknown();
        }
        Self {
            code: ERROR_APPSVC.0,
            message: err.message(),
        }
    }
}

/// Error type of the account store.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("user {0} not found")]
    UserNotFound(i64),
}
