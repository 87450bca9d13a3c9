// SPDX-License-Identifier: PMPL-1.0-or-later

//! Byte-level rendering of qstrs for the generated header

use super::hash::compute_hash;
use crate::error::{QstrError, Result};
use crate::types::QstrConfig;

/// Render `text` as the body of a C string literal.
///
/// Printable ASCII without `\` or `"` is kept as-is so the header stays
/// readable. Anything else turns the whole string into `\xNN` escapes of
/// its UTF-8 bytes; the two forms are never mixed.
pub fn escape_bytes(text: &str) -> String {
    if text
        .chars()
        .all(|c| (' '..='~').contains(&c) && c != '\\' && c != '"')
    {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() * 4);
    for b in text.bytes() {
        out.push_str(&format!("\\x{:02x}", b));
    }
    out
}

/// Hash, byte length and literal of one qstr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QstrBytes {
    pub hash: u64,
    pub len: usize,
    pub literal: String,
}

/// Compute the encoded form of `text`, checking it fits the length field.
pub fn make_bytes(config: &QstrConfig, text: &str) -> Result<QstrBytes> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    if let Some(max) = config.max_len() {
        if len as u64 >= max {
            return Err(QstrError::QstrTooLong {
                text: text.to_string(),
                len,
                max,
            });
        }
    }
    Ok(QstrBytes {
        hash: compute_hash(bytes, config.bytes_in_hash),
        len,
        literal: escape_bytes(text),
    })
}
