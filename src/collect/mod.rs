// SPDX-License-Identifier: PMPL-1.0-or-later

//! Collection & ordering of qstr declarations
//!
//! Scans preprocessed sources for `QCFG`, `TRANSLATE` and `Q` lines, seeds
//! the table with the static preamble, and assigns every string a sort
//! order so that the empty string, `__dir__` and the dunder names get the
//! smallest identifiers.

pub mod line;

use crate::error::{QstrError, Result};
use crate::qstr::{sanitize, STATIC_QSTRS};
use crate::types::{QstrConfig, StringEntry};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use line::{parse_line, Line};

const STATIC_ORDER_BASE: i64 = -300_000;
const EMPTY_ORDER: i64 = -200_000;
const DIR_ORDER: i64 = -190_000;
const DUNDER_OFFSET: i64 = 100_000;

/// Identifier-keyed qstr table. Insertion order is kept; the first
/// occurrence of an identifier wins.
#[derive(Debug, Clone, Default)]
pub struct QstrTable {
    entries: IndexMap<String, StringEntry>,
}

impl QstrTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with [`STATIC_QSTRS`], ordered ahead of everything else.
    pub fn with_statics() -> Self {
        let mut table = Self::new();
        for text in STATIC_QSTRS {
            let order = STATIC_ORDER_BASE + table.len() as i64;
            table.insert_with_order(text, order);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&StringEntry> {
        self.entries.get(identifier)
    }

    /// Add a declared string. Returns false if its identifier is already present.
    pub fn insert(&mut self, text: &str) -> bool {
        let identifier = sanitize(text);
        let order = declared_order(&identifier, self.len() as i64);
        self.insert_entry(identifier, text, order)
    }

    fn insert_with_order(&mut self, text: &str, order: i64) -> bool {
        self.insert_entry(sanitize(text), text, order)
    }

    fn insert_entry(&mut self, identifier: String, text: &str, order: i64) -> bool {
        if self.entries.contains_key(&identifier) {
            return false;
        }
        self.entries.insert(
            identifier.clone(),
            StringEntry {
                order,
                identifier,
                text: text.to_string(),
            },
        );
        true
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.values()
    }

    /// Entries in emission order; position `i` here is qstr id `i + 1`.
    pub fn sorted(&self) -> Vec<&StringEntry> {
        let mut view: Vec<&StringEntry> = self.entries.values().collect();
        view.sort_by_key(|entry| entry.order);
        view
    }
}

fn declared_order(identifier: &str, sequence: i64) -> i64 {
    if identifier.is_empty() {
        EMPTY_ORDER
    } else if identifier == "__dir__" {
        DIR_ORDER
    } else if identifier.starts_with("__") {
        // keeps special method ids small enough to fit in a byte
        sequence - DUNDER_OFFSET
    } else {
        sequence
    }
}

/// Everything gathered from the preprocessed inputs
#[derive(Debug, Clone)]
pub struct Collection {
    /// Raw `QCFG` values by name
    pub config: HashMap<String, String>,
    pub table: QstrTable,
    /// Distinct `TRANSLATE` texts in first-seen order
    pub translations: IndexSet<String>,
}

impl Collection {
    /// Resolve the field widths needed for data mode.
    pub fn qstr_config(&self) -> Result<QstrConfig> {
        QstrConfig::from_raw(&self.config)
    }
}

/// Collect from in-memory sources.
pub fn collect_sources<S: AsRef<str>>(sources: &[S]) -> Result<Collection> {
    let mut config = HashMap::new();
    let mut table = QstrTable::with_statics();
    let mut translations = IndexSet::new();

    for source in sources {
        for raw in source.as_ref().lines() {
            match parse_line(raw) {
                Some(Line::Config { name, value }) => {
                    config.insert(name.to_string(), value.to_string());
                }
                Some(Line::Translate(text)) => {
                    translations.insert(text.to_string());
                }
                Some(Line::Qstr(text)) => {
                    table.insert(&text);
                }
                None => {}
            }
        }
    }

    if config.is_empty() && !table.is_empty() {
        return Err(QstrError::EmptyPreprocessorOutput);
    }

    debug!(
        qstrs = table.len(),
        config = config.len(),
        translations = translations.len(),
        "collected declarations"
    );

    Ok(Collection {
        config,
        table,
        translations,
    })
}

/// Read and collect preprocessed files.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Collection> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        sources.push(read_source(path.as_ref())?);
    }
    collect_sources(&sources)
}

/// Read a text file, falling back to Windows-1252 when it is not UTF-8.
fn read_source(path: &Path) -> Result<String> {
    let raw_bytes = fs::read(path).map_err(|source| QstrError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw_bytes.len(), "reading input");

    match String::from_utf8(raw_bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let bytes = err.into_bytes();
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            warn!(path = %path.display(), "input is not UTF-8, decoded as Windows-1252");
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "QCFG(BYTES_IN_LEN, (1))\nQCFG(BYTES_IN_HASH, (1))\n";

    fn ids(table: &QstrTable) -> Vec<String> {
        table
            .sorted()
            .into_iter()
            .map(|e| e.identifier.clone())
            .collect()
    }

    #[test]
    fn statics_are_seeded_in_order() {
        let table = QstrTable::with_statics();
        assert_eq!(table.len(), STATIC_QSTRS.len());
        let sorted = ids(&table);
        assert_eq!(sorted[0], "");
        assert_eq!(sorted[1], "__dir__");
        assert_eq!(sorted[2], "_0x0a_");
    }

    #[test]
    fn duplicates_by_identifier_keep_first() {
        let mut table = QstrTable::new();
        assert!(table.insert("a-b"));
        // "a_hyphen_b" sanitizes to the same identifier
        assert!(!table.insert("a_hyphen_b"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a_hyphen_b").map(|e| e.text.as_str()), Some("a-b"));
    }

    #[test]
    fn dunders_move_ahead_of_plain_names() {
        let source = format!("{}Q(zeta)\nQ(__zap__)\nQ(alpha)\nQ(__zip__)\n", CONFIG);
        let collection = collect_sources(&[source]).expect("collects");
        let sorted = ids(&collection.table);

        let pos = |id: &str| sorted.iter().position(|s| s == id).expect("present");
        assert!(pos("__zap__") < pos("zeta"));
        assert!(pos("__zip__") < pos("zeta"));
        assert!(pos("__zap__") < pos("__zip__"));
        assert!(pos("zeta") < pos("alpha"));
        assert_eq!(pos(""), 0);
        assert_eq!(pos("__dir__"), 1);
    }

    #[test]
    fn translations_are_deduplicated() {
        let source = format!(
            "{}TRANSLATE(\"a\")\nTRANSLATE(\"b\")\nTRANSLATE(\"a\")\n",
            CONFIG
        );
        let collection = collect_sources(&[source]).expect("collects");
        let keys: Vec<&str> = collection.translations.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn missing_config_is_fatal() {
        let err = collect_sources(&["Q(hello)\n"]).unwrap_err();
        assert!(matches!(err, QstrError::EmptyPreprocessorOutput));
    }

    #[test]
    fn later_files_override_config_values() {
        let collection =
            collect_sources(&[CONFIG, "QCFG(BYTES_IN_HASH, 2)\n"]).expect("collects");
        let config = collection.qstr_config().expect("config");
        assert_eq!(config.bytes_in_len, 1);
        assert_eq!(config.bytes_in_hash, 2);
    }
}
