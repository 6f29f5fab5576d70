use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize {document} document: {source}")]
    Serialize {
        document: &'static str,
        #[source]
        source: toml::ser::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
