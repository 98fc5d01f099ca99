//! Configuration resolution
//!
//! Sources are tried in a fixed order and the first one present wins:
//!
//! 1. The environment, as soon as `CALSTATS_CHANNEL_URL` is set. A broken
//!    value in a set environment is an error rather than a reason to fall
//!    through.
//! 2. The first existing file among `config.{json,toml}` and
//!    `calstats.{json,toml}` in the working directory, then `config.*` one and
//!    two levels up, then the same names next to the executable.
//! 3. Built-in defaults pointing at a local analysis service.
//!
//! | variable                        | field                          |
//! |---------------------------------|--------------------------------|
//! | `CALSTATS_CHANNEL_URL`          | `channel.url`                  |
//! | `CALSTATS_CONNECT_TIMEOUT_SECS` | `channel.connect_timeout_secs` |
//! | `CALSTATS_LOG_LEVEL`            | `logging.level`                |
//! | `CALSTATS_LOG_JSON`             | `logging.json`                 |
//!
//! Resolution runs before the tracing subscriber exists, so it reports the
//! winning [`ConfigSource`] instead of logging it.

use std::fmt;
use std::path::{Path, PathBuf};

use calstats_domain::{CalStatsError, ChannelConfig, Config, LoggingConfig, Result};

const ENV_CHANNEL_URL: &str = "CALSTATS_CHANNEL_URL";
const ENV_CONNECT_TIMEOUT: &str = "CALSTATS_CONNECT_TIMEOUT_SECS";
const ENV_LOG_LEVEL: &str = "CALSTATS_LOG_LEVEL";
const ENV_LOG_JSON: &str = "CALSTATS_LOG_JSON";

const FILE_STEMS: [&str; 2] = ["config", "calstats"];
const FILE_FORMATS: [&str; 2] = ["json", "toml"];

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Defaults => f.write_str("defaults"),
        }
    }
}

/// Resolve configuration from the first available source.
///
/// # Errors
/// `CalStatsError::Config` when a set environment is invalid or the probed
/// file does not parse. Finding nothing at all is not an error.
pub fn resolve() -> Result<(Config, ConfigSource)> {
    if std::env::var_os(ENV_CHANNEL_URL).is_some() {
        return Ok((load_from_env()?, ConfigSource::Environment));
    }
    match probe_config_paths() {
        Some(path) => {
            let config = load_from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        None => Ok((Config::default(), ConfigSource::Defaults)),
    }
}

/// [`resolve`] without the source.
///
/// # Errors
/// See [`resolve`].
pub fn load() -> Result<Config> {
    resolve().map(|(config, _)| config)
}

/// Build configuration from `CALSTATS_*` variables.
///
/// # Errors
/// `CalStatsError::Config` if the channel URL is unset or the timeout is not
/// a whole number of seconds.
pub fn load_from_env() -> Result<Config> {
    let url = std::env::var(ENV_CHANNEL_URL).map_err(|_| {
        CalStatsError::Config(format!("Missing required environment variable: {ENV_CHANNEL_URL}"))
    })?;

    let channel_defaults = ChannelConfig::default();
    let connect_timeout_secs = std::env::var(ENV_CONNECT_TIMEOUT)
        .ok()
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|e| {
                CalStatsError::Config(format!("{ENV_CONNECT_TIMEOUT} must be seconds: {e}"))
            })
        })
        .transpose()?
        .unwrap_or(channel_defaults.connect_timeout_secs);

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var(ENV_LOG_LEVEL).unwrap_or(logging_defaults.level),
        json: env_flag(ENV_LOG_JSON).unwrap_or(logging_defaults.json),
    };

    Ok(Config { channel: ChannelConfig { url, connect_timeout_secs }, logging })
}

/// Read one config file, JSON or TOML by extension.
///
/// # Errors
/// `CalStatsError::Config` if the file is missing, unreadable, has another
/// extension or does not parse.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CalStatsError::Config(format!("Config file not found: {}", path.display())));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CalStatsError::Config(format!("Cannot read config file {}: {e}", path.display()))
    })?;
    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| CalStatsError::Config(format!("Invalid JSON in {}: {e}", path.display()))),
        Some("toml") => toml::from_str(contents)
            .map_err(|e| CalStatsError::Config(format!("Invalid TOML in {}: {e}", path.display()))),
        other => Err(CalStatsError::Config(format!(
            "Unsupported config format '{}' for {}",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}

/// First existing config file, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    [cwd, exe_dir]
        .into_iter()
        .flatten()
        .flat_map(|dir| candidates_in(&dir))
        .find(|candidate| candidate.is_file())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = FILE_STEMS
        .iter()
        .flat_map(|stem| FILE_FORMATS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
        .collect();
    for up in [Path::new(".."), Path::new("../..")] {
        candidates.extend(FILE_FORMATS.iter().map(|ext| dir.join(up).join(format!("config.{ext}"))));
    }
    candidates
}

/// `Some` only for a set variable with a recognised spelling.
fn env_flag(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
