use std::io;
use std::path::PathBuf;
use thiserror::Error;
use toml;

/// Everything that can go wrong around the detectors: they themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't find the config directory: {0}")]
    ConfigDir(String),

    #[error("couldn't read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid trace entry {index}: {message}")]
    Trace { index: usize, message: String },

    #[error("couldn't open the touch device")]
    Device,

    #[error("couldn't read from the touch device: {0}")]
    Dispatch(#[source] io::Error),

    #[error("{0}")]
    Unsupported(&'static str),
}

pub type Result<T> = ::std::result::Result<T, Error>;
