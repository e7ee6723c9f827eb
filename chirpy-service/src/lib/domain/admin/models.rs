use serde::Deserialize;

/// Deployment platform the service runs on.
///
/// Destructive administrative operations are only enabled on `dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Platform {
    #[serde(rename = "dev")]
    Development,
    #[serde(rename = "prod")]
    Production,
}

impl Platform {
    pub fn allows_reset(self) -> bool {
        matches!(self, Platform::Development)
    }
}
