use serde::{Deserialize, Serialize};

use crate::types::errors::SettingsError;

/// Runtime configuration for the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Origin of the REST backend serving `/api/**`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Section identifiers of the single-page UI, in navigation order.
    pub sections: Vec<String>,
    /// Section shown when the URL fragment names no known section.
    pub default_section: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
            user_agent: format!("gitpanel/{}", env!("CARGO_PKG_VERSION")),
            sections: vec![
                "overview".to_string(),
                "github".to_string(),
                "gitlab".to_string(),
                "unified".to_string(),
            ],
            default_section: "overview".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SettingsError::InvalidValue(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| SettingsError::InvalidValue(format!("base_url: {}", e)))?;

        if self.request_timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.sections.is_empty() {
            return Err(SettingsError::InvalidValue("sections cannot be empty".to_string()));
        }
        if !self.sections.contains(&self.default_section) {
            return Err(SettingsError::InvalidValue(format!(
                "default_section '{}' is not one of the configured sections",
                self.default_section
            )));
        }
        Ok(())
    }
}
