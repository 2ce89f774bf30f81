use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

fn default_api_base() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_page_size() -> u32 {
    10
}

/// User configuration, read from `config.json` in the state directory.
///
/// Every field has a default so the file is optional. The backend base URL
/// can also be overridden with the `COUNSELDESK_API_BASE` environment
/// variable, which wins over the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base(),
            gemini_model: default_gemini_model(),
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.json` under `dir`.
    ///
    /// A missing file yields defaults; a malformed file is an error naming
    /// the path so the user can fix it.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let path = dir.join("config.json");
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::Internal(format!("Failed to read config: {}", e)))?;
            serde_json::from_str(&content).map_err(|e| {
                AppError::Internal(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Self::default()
        };

        if let Ok(base) = std::env::var("COUNSELDESK_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base_url = base.trim().to_string();
            }
        }

        Ok(config)
    }
}
