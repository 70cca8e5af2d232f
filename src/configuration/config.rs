use super::types::*;
use crate::error_handling::types::ConfigError;
use clap::Parser;
use log::{debug, info};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Command-line interface of the `sessiongate` binary.
///
/// Every flag can also be given through its environment variable. Flag and environment
/// values take precedence over whatever the configuration file says.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sessiongate")]
#[command(version)]
#[command(about = "Session-gated LOGIN / ACTION / LOGOUT endpoint")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(env = "SESSIONGATE_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// IP address to bind the HTTP server to
    #[arg(long, env = "SESSIONGATE_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// TCP port to listen on (0 picks an ephemeral port)
    #[arg(long, env = "SESSIONGATE_PORT")]
    pub port: Option<u16>,

    /// Provisioned value expected in the X-Api-Key header
    #[arg(long, env = "SESSIONGATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provisioned 32-character session token
    #[arg(long, env = "SESSIONGATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// On-disk shape of the configuration file. Every key is optional here; completeness
/// is checked once file and overrides have been merged.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind_address: Option<String>,
    port: Option<u16>,
    api_key: Option<String>,
    token: Option<String>,
}

/// Validated runtime configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerSettings,
    pub credentials: ProvisionedCredentials,
}

impl Config {
    /// Loads and validates a configuration from a TOML file alone.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let file = read_file_config(path)?;
        Config::resolve(file, &CliArgs::default())
    }

    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        Config::resolve(file, &CliArgs::default())
    }

    /// Builds the configuration from parsed command-line arguments, reading the
    /// configuration file first when one is given.
    pub fn from_args(args: &CliArgs) -> Result<Config, ConfigError> {
        let file = match &args.config_file {
            Some(path) => read_file_config(path)?,
            None => {
                debug!("No configuration file given, relying on flags and environment");
                FileConfig::default()
            }
        };
        Config::resolve(file, args)
    }

    fn resolve(file: FileConfig, overrides: &CliArgs) -> Result<Config, ConfigError> {
        let bind_address = overrides.bind_address.clone().or(file.bind_address);
        let api_key = overrides.api_key.clone().or(file.api_key);
        let token = overrides.token.clone().or(file.token);

        let mut server = ServerSettings::default();
        if let Some(raw) = bind_address {
            server.bind_address = raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::BadIPFormatting(format!("{}: {}", raw, e)))?;
        }
        if let Some(port) = overrides.port.or(file.port) {
            server.port = port;
        }

        let api_key = required("api_key", api_key)?;
        let token = required("token", token)?;
        if token.chars().count() != TOKEN_LENGTH {
            return Err(ConfigError::InvalidToken(format!(
                "expected {} characters, got {}",
                TOKEN_LENGTH,
                token.chars().count()
            )));
        }

        Ok(Config {
            server,
            credentials: ProvisionedCredentials::new(api_key, token),
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let file: FileConfig = toml::from_str(&content)?;
    info!("Configuration read from {}", path.display());
    Ok(file)
}

fn required(name: &str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(name.to_string())),
    }
}
