//! # Tessera Core Configuration Errors
//!
//! Defines [`ConfigError`], raised while locating, reading or parsing a
//! framework configuration file.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub fn io(source: std::io::Error, path: PathBuf) -> Self {
        ConfigError::Io { source, path }
    }

    pub(crate) fn deserialization<E>(format: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::Deserialization {
            format: format.to_string(),
            source: Box::new(source),
        }
    }
}
