//! Runtime configuration
//!
//! Built once at startup and handed to the transport and pipeline by value.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_FORK_LABEL, DEFAULT_WORKSPACE_NAME};

/// Settings for one resolution run
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Value sent in the `X-API-Key` header. May be empty; the remote API rejects it then.
    pub api_key: String,
    pub base_url: String,
    pub workspace_name: String,
    pub fork_label: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            workspace_name: DEFAULT_WORKSPACE_NAME.to_string(),
            fork_label: DEFAULT_FORK_LABEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_workspace_name(mut self, name: impl Into<String>) -> Self {
        self.workspace_name = name.into();
        self
    }

    pub fn with_fork_label(mut self, label: impl Into<String>) -> Self {
        self.fork_label = label.into();
        self
    }

    /// Join an API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new("")
    }
}
