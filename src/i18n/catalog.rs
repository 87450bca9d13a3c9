// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for qstr-forge.
//!
//! Reads compiled GNU gettext catalogs (`.mo`) and pairs every
//! `TRANSLATE("...")` message with its localized text.
//!
//! ## Lookup rules
//!
//! 1. The message is C-unescaped first (`\n`, `\t`, `\"` and friends), since
//!    the catalog is keyed by the runtime string, not its source spelling.
//! 2. Missing messages translate to themselves, as `gettext()` does.
//! 3. Every `\n` in the result becomes `\r\n` so serial terminals render it.

use crate::error::{QstrError, Result};
use crate::types::TranslationPair;
use encoding_rs::{Encoding, UTF_8};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MO_MAGIC: u32 = 0x9504_12de;
const MO_HEADER_LEN: usize = 20;

/// C escapes reversed before lookup, in application order.
const C_ESCAPES: &[(&str, &str)] = &[
    ("\\a", "\x07"),
    ("\\b", "\x08"),
    ("\\f", "\x0c"),
    ("\\n", "\n"),
    ("\\r", "\r"),
    ("\\t", "\t"),
    ("\\v", "\x0b"),
    ("\\'", "'"),
    ("\\\"", "\""),
];

/// Source of localized messages.
pub trait Catalog {
    /// Translation of `message`, if the catalog has one.
    fn lookup(&self, message: &str) -> Option<&str>;

    /// Translation of `message`, or `message` itself when missing.
    fn gettext(&self, message: &str) -> String {
        self.lookup(message).unwrap_or(message).to_string()
    }
}

impl Catalog for HashMap<String, String> {
    fn lookup(&self, message: &str) -> Option<&str> {
        self.get(message).map(String::as_str)
    }
}

/// An in-memory `.mo` catalog
#[derive(Debug, Clone, Default)]
pub struct MoCatalog {
    messages: HashMap<String, String>,
    charset: Option<String>,
}

impl MoCatalog {
    /// Load a catalog from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| QstrError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        let catalog = Self::parse(&data)?;
        debug!(
            path = %path.display(),
            messages = catalog.len(),
            charset = catalog.charset().unwrap_or("utf-8"),
            "loaded translation catalog"
        );
        Ok(catalog)
    }

    /// Parse the binary `.mo` layout in either byte order.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < MO_HEADER_LEN {
            return Err(QstrError::Catalog("file too short for a .mo header".into()));
        }
        let big_endian = match u32::from_le_bytes([data[0], data[1], data[2], data[3]]) {
            MO_MAGIC => false,
            magic if magic.swap_bytes() == MO_MAGIC => true,
            magic => {
                return Err(QstrError::Catalog(format!("bad magic number {:#010x}", magic)))
            }
        };
        let reader = Reader { data, big_endian };

        let revision = reader.u32_at(4)?;
        if revision >> 16 > 1 {
            return Err(QstrError::Catalog(format!(
                "unsupported revision {}",
                revision
            )));
        }
        let count = reader.u32_at(8)? as usize;
        let originals = reader.u32_at(12)? as usize;
        let translations = reader.u32_at(16)? as usize;

        for (name, table) in [("original", originals), ("translation", translations)] {
            let end = count
                .checked_mul(8)
                .and_then(|len| len.checked_add(table))
                .filter(|end| *end <= data.len());
            if end.is_none() {
                return Err(QstrError::Catalog(format!(
                    "{} table of {} entries at {} runs past the end of the file",
                    name, count, table
                )));
            }
        }

        let mut raw = Vec::with_capacity(count);
        for i in 0..count {
            let msgid = reader.string_at(originals + 8 * i)?;
            let msgstr = reader.string_at(translations + 8 * i)?;
            raw.push((msgid, msgstr));
        }

        let charset = raw
            .iter()
            .find(|(msgid, _)| msgid.is_empty())
            .and_then(|(_, header)| charset_from_header(&String::from_utf8_lossy(header)));
        let encoding = charset
            .as_deref()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);

        let mut messages = HashMap::with_capacity(raw.len());
        for (msgid, msgstr) in raw {
            // plural entries are not reachable through a singular lookup
            if msgid.contains(&0) {
                continue;
            }
            let (key, _, _) = encoding.decode(msgid);
            let (value, _, _) = encoding.decode(msgstr);
            messages.insert(key.into_owned(), value.into_owned());
        }

        Ok(Self { messages, charset })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Charset declared in the catalog header, if any
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

impl Catalog for MoCatalog {
    fn lookup(&self, message: &str) -> Option<&str> {
        self.messages.get(message).map(String::as_str)
    }
}

struct Reader<'a> {
    data: &'a [u8],
    big_endian: bool,
}

impl<'a> Reader<'a> {
    fn u32_at(&self, offset: usize) -> Result<u32> {
        let bytes: [u8; 4] = self
            .data
            .get(offset..offset + 4)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| QstrError::Catalog(format!("offset {} out of range", offset)))?;
        Ok(if self.big_endian {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        })
    }

    /// Read a `(length, offset)` descriptor and return the bytes it names.
    fn string_at(&self, descriptor: usize) -> Result<&'a [u8]> {
        let len = self.u32_at(descriptor)? as usize;
        let offset = self.u32_at(descriptor + 4)? as usize;
        self.data
            .get(offset..offset + len)
            .ok_or_else(|| QstrError::Catalog(format!("string at {} out of range", offset)))
    }
}

fn charset_from_header(header: &str) -> Option<String> {
    header
        .lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-type:"))
        .and_then(|line| line.split("charset=").nth(1))
        .map(|charset| charset.trim().to_string())
        .filter(|charset| !charset.is_empty())
}

/// Reverse the C escapes of a `TRANSLATE` message.
pub fn unescape_c(message: &str) -> String {
    C_ESCAPES
        .iter()
        .fold(message.to_string(), |text, (escaped, raw)| {
            text.replace(escaped, raw)
        })
}

/// Pair every message with its translation.
pub fn translate<'m, C, I>(catalog: &C, messages: I) -> Vec<TranslationPair>
where
    C: Catalog + ?Sized,
    I: IntoIterator<Item = &'m String>,
{
    messages
        .into_iter()
        .map(|original| {
            let translated = catalog.gettext(&unescape_c(original)).replace('\n', "\r\n");
            TranslationPair::new(original.clone(), translated)
        })
        .collect()
}
