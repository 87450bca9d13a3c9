// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qstr substitution dictionary.
//!
//! Translated messages often repeat text that already lives in the qstr
//! table. Every qstr longer than the cutoff is given a private-use
//! codepoint `U+E000 + rank`, where `rank` counts qualifying entries from 1
//! in emission order. The decoder rebuilds the same dictionary from the
//! shipped table and the cutoff recorded next to the blob.

use crate::types::StringEntry;
use tracing::warn;

/// First private-use codepoint; rank 1 maps to the one after it.
pub const PRIVATE_USE_BASE: u32 = 0xE000;

/// Last codepoint of the BMP private-use area.
pub const PRIVATE_USE_LAST: u32 = 0xF8FF;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionDictionary {
    /// Longest text first; ties keep emission order.
    entries: Vec<(char, String)>,
}

impl SubstitutionDictionary {
    /// Build from the table in emission order, keeping texts longer than `cutoff` characters.
    pub fn build<'a, I>(table: I, cutoff: usize) -> Self
    where
        I: IntoIterator<Item = &'a StringEntry>,
    {
        let mut entries: Vec<(char, String)> = table
            .into_iter()
            .filter(|entry| entry.text.chars().count() > cutoff)
            .enumerate()
            .filter_map(|(i, entry)| {
                let codepoint = char::from_u32(PRIVATE_USE_BASE + i as u32 + 1)?;
                Some((codepoint, entry.text.clone()))
            })
            .collect();
        // longest first so a long match is never split by a shorter one
        entries.sort_by_key(|(_, text)| std::cmp::Reverse(text.chars().count()));
        let dictionary = Self { entries };
        if dictionary.exceeds_private_use() {
            warn!(
                entries = dictionary.len(),
                cutoff,
                "substitution codepoints run past U+F8FF and may collide with translated text"
            );
        }
        dictionary
    }

    /// Whether the highest assigned codepoint lies outside the private-use area.
    pub fn exceeds_private_use(&self) -> bool {
        self.entries
            .iter()
            .any(|(codepoint, _)| u32::from(*codepoint) > PRIVATE_USE_LAST)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codepoint standing in for `text`, if it qualified.
    pub fn codepoint_for(&self, text: &str) -> Option<char> {
        self.entries
            .iter()
            .find(|(_, candidate)| candidate == text)
            .map(|(c, _)| *c)
    }

    /// Replace every dictionary text in `message` with its codepoint.
    pub fn apply(&self, message: &str) -> String {
        let mut out = message.to_string();
        let mut buf = [0u8; 4];
        for (codepoint, text) in &self.entries {
            if out.contains(text.as_str()) {
                out = out.replace(text.as_str(), codepoint.encode_utf8(&mut buf));
            }
        }
        out
    }

    /// Inverse of [`apply`](Self::apply), as the runtime decoder performs it.
    pub fn expand(&self, message: &str) -> String {
        let mut out = String::with_capacity(message.len());
        for c in message.chars() {
            match self.entries.iter().find(|(codepoint, _)| *codepoint == c) {
                Some((_, text)) => out.push_str(text),
                None => out.push(c),
            }
        }
        out
    }
}
