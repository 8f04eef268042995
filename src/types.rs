use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAppsOrderBy {
    #[default]
    TsAdded,
    YearReleased,
    Name,
}

/// Search request as sent to the catalog service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppsOutRequest {
    pub app_name: Option<String>,
    pub kids_mode: bool,
    pub offset: u32,
    pub limit: u32,
    pub order_by: Option<SearchAppsOrderBy>,
}

impl Default for SearchAppsOutRequest {
    fn default() -> Self {
        Self {
            app_name: None,
            kids_mode: false,
            offset: 0,
            limit: 100,
            order_by: Some(SearchAppsOrderBy::TsAdded),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppsItem {
    pub cover_image_id: String,
    pub esrb_rating: i32,
    pub id: String,
    pub lang: String,
    pub name: String,
    pub slug: String,
    pub year_released: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppsResponse {
    #[serde(default)]
    pub apps: Vec<SearchAppsItem>,
}

/// Autocomplete lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppsAclRequest {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub kids_mode: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppsAclResponse {
    pub acl: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub developer: bool,
    pub porting: bool,
    pub publisher: bool,
    pub supporting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    pub image_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub image_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAssets {
    pub cover: Cover,
    #[serde(default)]
    pub screenshots: Option<Vec<Screenshot>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runner {
    pub name: String,
    #[serde(default)]
    pub ver: Option<String>,
    #[serde(default)]
    pub window_system: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HwReqs {
    pub dgpu: bool,
    pub igpu: bool,
    pub memory: u64,
    pub memory_shared: u64,
    pub nanocpus: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UaReqs {
    pub lock_pointer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppReqs {
    #[serde(default)]
    pub color_bits: Option<u32>,
    pub screen_width: u32,
    pub screen_height: u32,
    #[serde(default)]
    pub hw: HwReqs,
    #[serde(default)]
    pub midi: bool,
    #[serde(default)]
    pub ua: UaReqs,
}

/// Cross references into third-party game databases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRefs {
    pub ag_id: Option<i64>,
    pub lutris_id: Option<String>,
    pub mg_id: Option<i64>,
    pub pcgw_id: Option<String>,
    pub qz_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgdbDescr {
    pub id: i64,
    pub slug: String,
    #[serde(default)]
    pub similar_ids: Option<Vec<i64>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPlatform {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub alternative_name: String,
    pub slug: String,
}

/// Full release record returned by `GET /apps/{uuid}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppReleaseDetails {
    #[serde(default)]
    pub addl_artifacts: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub alternative_names: Vec<String>,
    pub app_reqs: AppReqs,
    #[serde(default)]
    pub companies: Vec<Company>,
    pub esrb_rating: i32,
    pub igdb: IgdbDescr,
    pub id: i64,
    pub is_visible: bool,
    pub lang: String,
    pub long_descr: String,
    pub media_assets: MediaAssets,
    #[serde(default)]
    pub media_assets_localized: Option<MediaAssets>,
    pub name: String,
    pub platform: AppPlatform,
    #[serde(default)]
    pub refs: GameRefs,
    pub runner: Runner,
    pub short_descr: String,
    pub ts_added: String,
    pub uuid: String,
    pub year_released: i32,
}
