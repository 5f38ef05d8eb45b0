// Configuration module entry point
// Layers defaults, an optional TOML file and LLMS_* environment variables

mod types;

use std::net::SocketAddr;

pub use types::{BuildConfig, Config, LlmsConfig, LoggingConfig, ServerConfig};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "llms-routing.toml";

/// Conventional name of the directory holding `llms.txt`
pub const DEFAULT_LLMS_DIR: &str = "llms";

impl Config {
    /// Load configuration from the default file, if present
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file path
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("llms.dir", DEFAULT_LLMS_DIR)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5173)?
            .set_default("server.read_timeout", 30)?
            .set_default("build.out_dir", "dist")?
            .set_default("logging.access_log", true)?
            .add_source(
                config::File::new(config_path, config::FileFormat::Toml).required(false),
            )
            .add_source(
                config::Environment::with_prefix("LLMS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
