// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for qstr-forge
//!
//! Everything here is built once per run from the preprocessed inputs and
//! the translation catalog, and is not mutated afterwards.

use crate::error::QstrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Config key for the width of the length field, in bytes
pub const BYTES_IN_LEN: &str = "BYTES_IN_LEN";
/// Config key for the width of the hash field, in bytes
pub const BYTES_IN_HASH: &str = "BYTES_IN_HASH";

/// One interned string, keyed by its sanitized identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringEntry {
    /// Sort key for the emitted table; not part of the output
    pub order: i64,
    /// Sanitized identifier, unique across the table
    pub identifier: String,
    /// Original string content
    pub text: String,
}

/// Fixed field widths of the emitted encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QstrConfig {
    pub bytes_in_len: u32,
    pub bytes_in_hash: u32,
}

impl QstrConfig {
    /// Largest supported hash width; the hash runs in 64-bit wrapping arithmetic.
    pub const MAX_HASH_BYTES: u32 = 8;

    /// Resolve the two widths from raw `QCFG` values.
    pub fn from_raw(raw: &HashMap<String, String>) -> Result<Self, QstrError> {
        let bytes_in_len = parse_width(raw, BYTES_IN_LEN)?;
        let bytes_in_hash = parse_width(raw, BYTES_IN_HASH)?;
        if bytes_in_hash > Self::MAX_HASH_BYTES {
            return Err(QstrError::UnsupportedHashWidth {
                width: bytes_in_hash,
                max: Self::MAX_HASH_BYTES,
            });
        }
        Ok(Self {
            bytes_in_len,
            bytes_in_hash,
        })
    }

    /// Exclusive upper bound on a string's byte length, `None` when unbounded in practice.
    pub fn max_len(&self) -> Option<u64> {
        1u64.checked_shl(8 * self.bytes_in_len)
    }
}

fn parse_width(raw: &HashMap<String, String>, name: &str) -> Result<u32, QstrError> {
    let value = raw
        .get(name)
        .ok_or_else(|| QstrError::MissingConfig(name.to_string()))?;
    value.trim().parse().map_err(|_| QstrError::InvalidConfig {
        name: name.to_string(),
        value: value.clone(),
    })
}

/// A translatable message and its localized text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationPair {
    /// Message exactly as written inside `TRANSLATE("...")`, still C-escaped
    pub original: String,
    /// Catalog result with line feeds rewritten to CR+LF
    pub translated: String,
}

impl TranslationPair {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }

    /// True when the catalog returned the message unchanged
    pub fn is_untranslated(&self) -> bool {
        self.original == self.translated
    }
}

/// One evaluated point of the compression search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionCandidate {
    pub reversed: bool,
    pub cutoff: usize,
    pub compressed: Vec<u8>,
    pub pairs: Vec<TranslationPair>,
}

impl CompressionCandidate {
    pub fn compressed_size(&self) -> usize {
        self.compressed.len()
    }

    /// Comment line describing how the blob was produced
    pub fn describe(&self) -> String {
        format!(
            "// Compressed to {} bytes using cutoff {} {}",
            self.compressed_size(),
            self.cutoff,
            if self.reversed { "reversed " } else { "" }
        )
    }
}

/// Which header variant a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Identifier-only `QENUM` listing
    Enum,
    /// Full `QDEF` table plus compressed translations
    Data,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn config_parses_both_widths() {
        let config = QstrConfig::from_raw(&raw(&[("BYTES_IN_LEN", "1"), ("BYTES_IN_HASH", "2")]))
            .expect("valid config");
        assert_eq!(config.bytes_in_len, 1);
        assert_eq!(config.bytes_in_hash, 2);
        assert_eq!(config.max_len(), Some(256));
    }

    #[test]
    fn config_missing_key_is_reported_by_name() {
        let err = QstrConfig::from_raw(&raw(&[("BYTES_IN_LEN", "1")])).unwrap_err();
        assert!(matches!(err, QstrError::MissingConfig(ref name) if name == "BYTES_IN_HASH"));
    }

    #[test]
    fn config_rejects_non_numeric_and_oversized_hash() {
        let err = QstrConfig::from_raw(&raw(&[("BYTES_IN_LEN", "x"), ("BYTES_IN_HASH", "1")]))
            .unwrap_err();
        assert!(matches!(err, QstrError::InvalidConfig { .. }));

        let err = QstrConfig::from_raw(&raw(&[("BYTES_IN_LEN", "1"), ("BYTES_IN_HASH", "9")]))
            .unwrap_err();
        assert!(matches!(err, QstrError::UnsupportedHashWidth { width: 9, max: 8 }));
        assert!(err.to_string().contains("64-bit hash"));
    }

    #[test]
    fn wide_length_field_is_unbounded() {
        let config = QstrConfig {
            bytes_in_len: 8,
            bytes_in_hash: 1,
        };
        assert_eq!(config.max_len(), None);
    }

    #[test]
    fn candidate_description_mentions_reversal() {
        let candidate = CompressionCandidate {
            reversed: true,
            cutoff: 5,
            compressed: vec![1, 2, 3],
            pairs: Vec::new(),
        };
        assert_eq!(
            candidate.describe(),
            "// Compressed to 3 bytes using cutoff 5 reversed "
        );
    }
}
