//! Error types.
//!
//! Extraction itself never fails: unreadable text just yields fewer
//! attributes. Errors only come from configuration and from the CLI's I/O.

use thiserror::Error;

/// Errors raised while building options/dictionaries or reading batch input.
#[derive(Error, Debug)]
pub enum Error {
    /// Options file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Stone names must hold one or more alphabetic words.
    #[error("invalid stone name '{0}'")]
    InvalidStone(String),

    /// Compiling the extra-stone matcher failed.
    #[error("invalid stone pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A batch input line was not a valid product object.
    #[error("invalid product on line {line}: {source}")]
    Product {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
