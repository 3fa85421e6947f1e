//! Websupport credentials loading
//!
//! Credentials live in an INI file with the keys `api_key`, `secret` and
//! `service`. Files written for the certbot plugin, where every key carries a
//! `dns_websupport_v2_` prefix, are read as well. `WEBSUPPORT_*` environment
//! variables override whatever the file says.

pub mod error;

pub use error::*;

use config::{Config, Environment};
use ini::{Ini, ParseOption};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wsdns_api::Credentials;

pub const CREDENTIALS_ENV: &str = "WEBSUPPORT_CREDENTIALS";
pub const CREDENTIALS_FILE_NAME: &str = "websupport.ini";

const ENV_PREFIX: &str = "WEBSUPPORT";
const CERTBOT_KEY_PREFIX: &str = "dns_websupport_v2_";

/// Per-user config directory (`~/.config/wsdns`)
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("wsdns"))
}

/// Locate the credentials file.
///
/// Search order:
/// 1. `explicit` (the `--credentials` flag); must exist
/// 2. `WEBSUPPORT_CREDENTIALS`
/// 3. `./websupport.ini`
/// 4. `~/.config/wsdns/websupport.ini`
///
/// Returns `Ok(None)` when nothing is found.
pub fn find_credentials_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    if let Ok(env_path) = std::env::var(CREDENTIALS_ENV) {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(ConfigError::FileNotFound(path));
    }

    let local = std::env::current_dir()?.join(CREDENTIALS_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Ok(config_dir) = get_config_dir() {
        let global = config_dir.join(CREDENTIALS_FILE_NAME);
        if global.is_file() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

/// Load credentials from the discovered file and the environment.
pub fn load_credentials(explicit: Option<&Path>) -> Result<Credentials> {
    let path = find_credentials_file(explicit)?;

    let file_values = match &path {
        Some(path) => {
            tracing::debug!("Reading Websupport credentials from {}", path.display());
            warn_if_readable_by_others(path);
            read_ini(path)?
        }
        None => HashMap::new(),
    };
    let env = Config::builder()
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?;

    let source_name = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "environment".to_string());

    let get = |key: &str| -> Result<String> {
        lookup(&env, &file_values, key).ok_or_else(|| {
            if path.is_none() {
                ConfigError::CredentialsNotFound
            } else {
                ConfigError::MissingKey {
                    key: key.to_string(),
                    source_name: source_name.clone(),
                }
            }
        })
    };

    Ok(Credentials::new(get("api_key")?, get("secret")?, get("service")?))
}

/// Top-level keys of an INI file, values taken literally: no escape
/// sequences and no quote stripping.
fn read_ini(path: &Path) -> Result<HashMap<String, String>> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_file_opt(path, options)?;
    Ok(ini
        .general_section()
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
        .collect())
}

fn lookup(env: &Config, file_values: &HashMap<String, String>, key: &str) -> Option<String> {
    let prefixed = format!("{}{}", CERTBOT_KEY_PREFIX, key);
    env.get_string(key)
        .ok()
        .or_else(|| file_values.get(key).cloned())
        .or_else(|| file_values.get(&prefixed).cloned())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether group or other users can access `path`.
#[cfg(unix)]
pub fn is_readable_by_others(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode();
    Ok(mode & 0o077 != 0)
}

#[cfg(not(unix))]
pub fn is_readable_by_others(_path: &Path) -> Result<bool> {
    Ok(false)
}

fn warn_if_readable_by_others(path: &Path) {
    if let Ok(true) = is_readable_by_others(path) {
        tracing::warn!(
            "Unsafe permissions on credentials file {}: accessible by group or others",
            path.display()
        );
    }
}
