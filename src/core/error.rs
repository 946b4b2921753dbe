use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarrenError {
    #[error("Enemy not found: {0:?}")]
    EnemyNotFound(crate::core::types::EnemyId),

    #[error("Invalid enemy config: {0}")]
    InvalidEnemyConfig(String),

    #[error("Invalid simulation config: {0}")]
    InvalidSimConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WarrenError>;
