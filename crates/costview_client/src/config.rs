//! Client configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "COSTVIEW_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8082/api";

/// Where the cost backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, including the `/api` prefix
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `COSTVIEW_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
