// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub llms: LlmsConfig,
    pub server: ServerConfig,
    pub build: BuildConfig,
    pub logging: LoggingConfig,
}

/// Source directory settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmsConfig {
    /// Directory holding `llms.txt` and the markdown tree, relative to the working directory
    pub dir: String,
}

/// Dev server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-connection timeout in seconds
    pub read_timeout: u64,
}

/// Production build configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BuildConfig {
    /// Output directory assets are written under
    pub out_dir: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
