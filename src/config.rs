// Environment configuration, read once at startup

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_SSH_HOST: &str = "localhost";
pub const DEFAULT_SSH_KEY: &str = "~/.ssh/id_rsa";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Poll and full-redraw cadence, in whole seconds.
    pub refresh_interval_secs: u64,
    /// Overrides the remote hostname shown in the header and used as the source tag.
    pub active_hostname: Option<String>,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub host: String,
    pub user: String,
    pub key_path: PathBuf,
    pub port: u16,
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable lookup (e.g. a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let refresh_interval_secs = match get("REFRESH_INTERVAL") {
            Some(v) => parse_number("REFRESH_INTERVAL", &v)?,
            None => DEFAULT_REFRESH_INTERVAL_SECS,
        };
        let port = match get("SSH_PORT") {
            Some(v) => parse_number("SSH_PORT", &v)?,
            None => DEFAULT_SSH_PORT,
        };
        let enabled = match get("SSH") {
            Some(v) => parse_toggle("SSH", &v)?,
            None => false,
        };
        let user = get("SSH_USER")
            .or_else(|| get("USER"))
            .unwrap_or_else(|| "root".into());
        let key = get("SSH_KEY").unwrap_or_else(|| DEFAULT_SSH_KEY.into());

        let config = AppConfig {
            refresh_interval_secs,
            active_hostname: get("ACTIVE_HOSTNAME"),
            remote: RemoteConfig {
                enabled,
                host: get("SSH_HOST").unwrap_or_else(|| DEFAULT_SSH_HOST.into()),
                user,
                key_path: expand_home(&key),
                port,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "REFRESH_INTERVAL",
                value: "0".into(),
                reason: "must be > 0".into(),
            });
        }
        if self.remote.port == 0 {
            return Err(ConfigError::Invalid {
                var: "SSH_PORT",
                value: "0".into(),
                reason: "must be between 1 and 65535".into(),
            });
        }
        Ok(())
    }
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_toggle(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_uppercase().as_str() {
        "ON" | "TRUE" | "1" => Ok(true),
        "OFF" | "FALSE" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected ON or OFF".into(),
        }),
    }
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~")
        && (rest.is_empty() || rest.starts_with('/'))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches('/'));
    }
    PathBuf::from(path)
}
