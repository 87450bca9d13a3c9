// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fatal conditions raised while building the qstr table

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QstrError {
    /// Strings were declared but no `QCFG` line was seen, which means the
    /// preprocessor step upstream failed.
    #[error("Empty preprocessor output - check for errors above")]
    EmptyPreprocessorOutput,

    #[error("missing configuration value {0}")]
    MissingConfig(String),

    #[error("invalid configuration value for {name}: {value:?}")]
    InvalidConfig { name: String, value: String },

    /// The input may ask for any width; this generator hashes in 64 bits.
    #[error("BYTES_IN_HASH of {width} is wider than the {max} bytes this generator's 64-bit hash supports")]
    UnsupportedHashWidth { width: u32, max: u32 },

    #[error("qstr is too long: {text:?} ({len} bytes, limit {max})")]
    QstrTooLong { text: String, len: usize, max: u64 },

    #[error("malformed translation catalog: {0}")]
    Catalog(String),

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QstrError>;
