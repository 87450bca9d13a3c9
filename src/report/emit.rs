// SPDX-License-Identifier: PMPL-1.0-or-later

//! Header emitters.
//!
//! Two mutually exclusive renderings of the same sorted table:
//! - enum mode: `QENUM(...)` per entry, identifiers only
//! - data mode: `QDEF(...)` per entry with hash, length and literal, then
//!   the winning translation compression
//!
//! Both start with the null qstr, which always takes id 0.

use crate::collect::QstrTable;
use crate::compress::max_message_len;
use crate::error::Result;
use crate::qstr::make_bytes;
use crate::types::{CompressionCandidate, QstrConfig};

pub const GENERATED_BY: &str = "// This file was automatically generated by qstr-forge";
pub const NULL_IDENTIFIER: &str = "MP_QSTRnull";
pub const IDENTIFIER_PREFIX: &str = "MP_QSTR_";

fn prefixed(identifier: &str) -> String {
    format!("{}{}", IDENTIFIER_PREFIX, identifier)
}

/// Identifier-only enumeration.
pub fn render_enums(table: &QstrTable) -> String {
    let mut lines = vec![GENERATED_BY.to_string(), String::new()];
    lines.push(format!("QENUM({})", NULL_IDENTIFIER));
    for entry in table.sorted() {
        lines.push(format!("QENUM({})", prefixed(&entry.identifier)));
    }
    finish(lines)
}

/// Full qstr data plus the compressed translation table.
///
/// Fails if any string does not fit the configured length field; nothing
/// is returned in that case.
pub fn render_data(
    config: &QstrConfig,
    table: &QstrTable,
    best: &CompressionCandidate,
) -> Result<String> {
    let mut lines = vec![GENERATED_BY.to_string(), String::new()];
    lines.push(format!("QDEF({}, 0, 0, \"\")", NULL_IDENTIFIER));

    for entry in table.sorted() {
        let encoded = make_bytes(config, &entry.text)?;
        lines.push(format!(
            "QDEF({}, {}, {}, \"{}\")",
            prefixed(&entry.identifier),
            encoded.hash,
            encoded.len,
            encoded.literal
        ));
    }

    lines.push(best.describe());
    for (index, pair) in best.pairs.iter().enumerate() {
        lines.push(format!("TRANSLATION(\"{}\", {})", pair.original, index));
    }
    lines.push(String::new());

    let data: Vec<String> = best.compressed.iter().map(u8::to_string).collect();
    lines.push(format!(
        "TRANSLATION_DATA({}, {{ {} }})",
        max_message_len(&best.pairs),
        data.join(", ")
    ));
    Ok(finish(lines))
}

/// Companion header for the build step that sizes the message table.
pub fn render_compression_header(message_count: usize, cutoff: usize) -> String {
    format!(
        "#define NUM_MESSAGES {}\n#define TRANSLATION_QSTR_CUTOFF {}\n",
        message_count, cutoff
    )
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
