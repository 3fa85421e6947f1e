use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Credentials file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(
        "Websupport credentials not found. Looked in:\n\
        - --credentials / WEBSUPPORT_CREDENTIALS\n\
        - ./websupport.ini\n\
        - ~/.config/wsdns/websupport.ini\n\
        Alternatively set WEBSUPPORT_API_KEY, WEBSUPPORT_SECRET and WEBSUPPORT_SERVICE"
    )]
    CredentialsNotFound,

    #[error("Missing credential '{key}' in {source_name}")]
    MissingKey { key: String, source_name: String },

    #[error("Failed to read credentials: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to parse credentials file: {0}")]
    Ini(#[from] ini::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
