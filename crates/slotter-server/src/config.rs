//! Layered application configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, a
//! `slotter.toml` file in the working directory, and `SLOTTER_*`
//! environment variables (double underscore separates nesting, e.g.
//! `SLOTTER_DATABASE__URL`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use slotter_auth::AuthConfig;
use slotter_db::DbConfig;
use slotter_notify::SmtpConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

/// Startup admin provisioning credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Absent means mail dispatch is disabled.
    pub smtp: Option<SmtpConfig>,
    /// Absent means no admin account is provisioned at startup.
    pub admin: Option<AdminConfig>,
}

/// Load configuration from defaults, `slotter.toml`, and `SLOTTER_*`
/// environment variables.
pub fn load_config() -> Result<AppConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file("slotter.toml"))
        .merge(Env::prefixed("SLOTTER_").split("__"))
        .extract()
}

/// Load configuration from a TOML string (tests).
pub fn load_config_from_str(toml_content: &str) -> Result<AppConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}
