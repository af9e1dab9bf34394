use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// User summary stored next to the bearer token after sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_deref(), Some("admin") | Some("super_admin"))
    }
}
