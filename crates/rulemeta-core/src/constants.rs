//! Application-wide constants
//!
//! Centralized location for endpoint paths, defaults and environment
//! variable names that are used across multiple modules.

/// Default server base URL (a local SonarQube-compatible instance)
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Web API paths, relative to the base URL
pub mod paths {
    /// Rule details (`{ rule: {...} }`)
    pub const RULES_SHOW: &str = "/api/rules/show";
    /// Global tag vocabulary (`{ tags: [...] }`)
    pub const RULES_TAGS: &str = "/api/rules/tags";
    /// Rule update (`{ rule: {...} }`)
    pub const RULES_UPDATE: &str = "/api/rules/update";
    /// Rule browser page; permalinks hang a `#rule_key=` fragment off it
    pub const CODING_RULES_PAGE: &str = "/coding_rules";
}

// Environment variables
pub mod env {
    pub const BASE_URL: &str = "RULEMETA_BASE_URL";
    pub const TOKEN: &str = "RULEMETA_TOKEN";
    /// When set, DEBUG logs are appended to this file
    pub const LOG_FILE: &str = "RULEMETA_LOG_FILE";
}

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "rulemeta";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";
