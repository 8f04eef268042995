//! `appsvc-http` is an async HTTP client for the application catalog
//! service, with bounded retry and exponential backoff.
//!
//! The crate is layered:
//! - [`RetryingClient::execute`] sends one [`Request`] through a pooled
//!   transport, retrying transient failures per [`RetryPolicy`]
//! - [`AppSvcClient`] wraps it with the typed catalog calls
//! - [`Catalog`] and [`Accounts`] hold the small amount of business logic
//!   that sits in front of the catalog (kids mode, profile updates)

mod account;
mod appsvc;
mod catalog;
mod client;
mod error;
mod http;
mod options;
mod retry;
mod session;
mod types;

pub use account::{Accounts, InMemoryUserStore, UpdateUser, User, UserStore};
pub use appsvc::AppSvcClient;
pub use catalog::{kids_mode, outgoing_search, Catalog, SearchAppsRequest, KIDS_MODE_MAX_AGE};
pub use client::RetryingClient;
pub use error::{AccountError, AppSvcError, ErrorBody, ERROR_APPSVC, ERROR_UNKNOWN};
pub use http::{Request, Response};
pub use options::ClientOptions;
pub use retry::RetryPolicy;
pub use session::{InMemorySessionStore, SessionStore};
pub use types::{
    AppPlatform, AppReleaseDetails, AppReqs, Company, Cover, GameRefs, HwReqs, IgdbDescr,
    MediaAssets, Runner, Screenshot, SearchAppsAclRequest, SearchAppsAclResponse, SearchAppsItem,
    SearchAppsOrderBy, SearchAppsOutRequest, SearchAppsResponse, UaReqs,
};

pub use reqwest::Method;

pub type Result<T> = std::result::Result<T, AppSvcError>;
