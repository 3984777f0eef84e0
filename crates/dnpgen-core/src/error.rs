use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnpGenError {
    #[error("Config file not found (searched: {searched:?})")]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidConfigValue { key: String, message: String },

    #[error("Resource directory not found: {path}")]
    ResourceNotFound { path: PathBuf },

    #[error("Signal file not found: {path}")]
    SignalFileNotFound { path: PathBuf },

    #[error("SIGEXT executable not found: {path}")]
    SigExtNotFound { path: PathBuf },

    #[error("SIGEXT failed: {message}")]
    SigExtFailed { message: String },

    #[error("Failed to write list file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DnpGenError>;

impl DnpGenError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => 2,
            Self::ResourceNotFound { .. } | Self::SignalFileNotFound { .. } => 3,
            Self::OutputWrite { .. } => 4,
            Self::ConfigKeyNotFound { .. } | Self::InvalidConfigValue { .. } => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = DnpGenError::ConfigNotFound {
            searched: Vec::new(),
        };
        assert_eq!(err.exit_code(), 2);

        let err = DnpGenError::SignalFileNotFound {
            path: PathBuf::from("NODE.SIG"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = DnpGenError::SigExtFailed {
            message: "boom".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
