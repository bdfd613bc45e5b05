use serde::{Deserialize, Serialize};

use super::identity::{Identity, Permission};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoamiResponse {
    #[serde(flatten)]
    pub identity: Identity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaniResponse {
    pub allow: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteInfo {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub permissions: Vec<Permission>,
}
