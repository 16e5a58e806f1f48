use std::path::PathBuf;
use thiserror::Error;

use crate::subprocess::ProcessError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No git installation named '{0}' is registered")]
    ToolNotFound(String),

    #[error("No git installations are registered")]
    NoToolsRegistered,

    #[error("Failed to remove {path}: {source}")]
    DirectoryReset {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid build variable '{0}': expected KEY=VALUE")]
    InvalidVariable(String),

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
