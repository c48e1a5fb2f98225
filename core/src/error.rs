//! Error type for hanpin-core.
//!
//! Conversion itself never fails. Errors surface only where a caller asked
//! for something explicit: loading a single dictionary resource, or reading a
//! configuration file. The tier loader turns `ResourceUnavailable` into an
//! empty tier and keeps going.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dictionary resource could not be opened or read to the end.
    #[error("dictionary resource '{id}' unavailable: {source}")]
    ResourceUnavailable {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// Configuration parsed but is not usable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn unavailable(id: impl Into<String>, source: std::io::Error) -> Self {
        Error::ResourceUnavailable {
            id: id.into(),
            source,
        }
    }
}
