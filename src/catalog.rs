use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    AppReleaseDetails, AppSvcClient, Result, SearchAppsAclRequest, SearchAppsAclResponse,
    SearchAppsOrderBy, SearchAppsOutRequest, SearchAppsResponse, User,
};

/// Users younger than this many whole years browse in kids mode.
pub const KIDS_MODE_MAX_AGE: u32 = 10;

/// Search request as received from API consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAppsRequest {
    pub app_name: Option<String>,
    pub offset: u32,
    pub limit: u32,
    pub order_by: Option<SearchAppsOrderBy>,
}

impl Default for SearchAppsRequest {
    fn default() -> Self {
        Self {
            app_name: None,
            offset: 0,
            limit: 100,
            order_by: Some(SearchAppsOrderBy::TsAdded),
        }
    }
}

/// Whether someone born on `dob` is still a kid on `today`.
///
/// A date of birth in the future counts as a kid.
pub fn kids_mode(dob: NaiveDate, today: NaiveDate) -> bool {
    today
        .years_since(dob)
        .map_or(true, |age| age < KIDS_MODE_MAX_AGE)
}

/// Builds the outgoing search for `user` (anonymous when `None`).
pub fn outgoing_search(
    req: &SearchAppsRequest,
    user: Option<&User>,
    today: NaiveDate,
) -> SearchAppsOutRequest {
    SearchAppsOutRequest {
        app_name: req.app_name.clone(),
        kids_mode: user.is_some_and(|user| kids_mode(user.dob, today)),
        offset: req.offset,
        limit: req.limit,
        order_by: req.order_by,
    }
}

/// Catalog operations exposed to API handlers.
#[derive(Clone, Debug)]
pub struct Catalog {
    appsvc: AppSvcClient,
}

impl Catalog {
    pub fn new(appsvc: AppSvcClient) -> Self {
        Self { appsvc }
    }

    pub async fn get_app_release(&self, app_release_uuid: &str) -> Result<AppReleaseDetails> {
        self.appsvc.get_app_release(app_release_uuid).await
    }

    /// Searches the catalog, filtering for kids when the signed-in user is
    /// younger than [`KIDS_MODE_MAX_AGE`].
    pub async fn search_apps(
        &self,
        user: Option<&User>,
        req: &SearchAppsRequest,
    ) -> Result<SearchAppsResponse> {
        let today = Local::now().date_naive();
        let out = outgoing_search(req, user, today);
        self.appsvc.search_apps(&out).await
    }

    pub async fn search_apps_acl(&self, req: &SearchAppsAclRequest) -> Result<SearchAppsAclResponse> {
        self.appsvc.search_apps_acl(req).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{kids_mode, outgoing_search, SearchAppsRequest};
    use crate::{SearchAppsOrderBy, User};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tenth_birthday_ends_kids_mode() {
        let dob = date(2014, 6, 15);
        assert!(kids_mode(dob, date(2024, 6, 14)));
        assert!(!kids_mode(dob, date(2024, 6, 15)));
        assert!(!kids_mode(dob, date(2030, 1, 1)));
    }

    #[test]
    fn future_dob_is_kids_mode() {
        assert!(kids_mode(date(2030, 1, 1), date(2024, 1, 1)));
    }

    #[test]
    fn anonymous_search_is_never_kids_mode() {
        let req = SearchAppsRequest {
            app_name: Some("doom".to_owned()),
            offset: 20,
            limit: 10,
            order_by: Some(SearchAppsOrderBy::Name),
        };
        let out = outgoing_search(&req, None, date(2024, 1, 1));
        assert!(!out.kids_mode);
        assert_eq!(out.app_name.as_deref(), Some("doom"));
        assert_eq!(out.offset, 20);
        assert_eq!(out.limit, 10);
        assert_eq!(out.order_by, Some(SearchAppsOrderBy::Name));
    }

    #[test]
    fn young_user_search_is_kids_mode() {
        let mut user = User::new(1);
        user.dob = date(2020, 3, 1);
        let out = outgoing_search(&SearchAppsRequest::default(), Some(&user), date(2024, 1, 1));
        assert!(out.kids_mode);
        assert_eq!(out.limit, 100);
    }

    #[test]
    fn inbound_request_fills_defaults() {
        let req: SearchAppsRequest = serde_json::from_str(r#"{"app_name":"qu"}"#).unwrap();
        assert_eq!(req.limit, 100);
        assert_eq!(req.order_by, Some(SearchAppsOrderBy::TsAdded));
    }
}
