//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the collection-management API
pub const DEFAULT_BASE_URL: &str = "https://api.getpostman.com";

/// Workspace searched for when none is configured
pub const DEFAULT_WORKSPACE_NAME: &str = "Pay Client";

/// Fork label identifying the collection to read
pub const DEFAULT_FORK_LABEL: &str = "staging";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Query parameter filtering collections by workspace
pub const WORKSPACE_QUERY_KEY: &str = "workspace";
