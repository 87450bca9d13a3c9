// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the translation compression search

use flate2::read::DeflateDecoder;
use qstr_forge::collect::{collect_sources, QstrTable};
use qstr_forge::compress::{
    self, deflate_raw, join_messages, sort_pairs, SubstitutionDictionary, CUTOFFS,
};
use qstr_forge::types::TranslationPair;
use std::io::Read;

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .expect("valid raw deflate");
    out
}

fn table_with(texts: &[&str]) -> QstrTable {
    let mut table = QstrTable::with_statics();
    for text in texts {
        table.insert(text);
    }
    table
}

/// Decode a blob the way the runtime does: inflate, split, expand.
fn decode(table: &QstrTable, cutoff: usize, blob: &[u8]) -> Vec<String> {
    let dictionary = SubstitutionDictionary::build(table.sorted(), cutoff);
    let raw = String::from_utf8(inflate(blob)).expect("utf-8 payload");
    raw.split('\0')
        .map(|message| dictionary.expand(message))
        .collect()
}

#[test]
fn test_chat_is_substituted_before_compression() {
    let table = table_with(&["chat"]);
    let pairs = vec![
        TranslationPair::new("cat", "chat"),
        TranslationPair::new("dog", "chien"),
    ];
    let sorted_table = table.sorted();
    let dictionary = SubstitutionDictionary::build(sorted_table.iter().copied(), 3);
    let codepoint = dictionary
        .codepoint_for("chat")
        .expect("chat is longer than the cutoff");

    let candidate = compress::evaluate(&sorted_table, &pairs, false, 3).expect("evaluates");
    let payload = String::from_utf8(inflate(&candidate.compressed)).expect("utf-8");
    let messages: Vec<&str> = payload.split('\0').collect();

    assert!(messages.contains(&codepoint.to_string().as_str()));
    assert!(!payload.contains("chat"));
    assert!(messages.contains(&"chien"));
}

#[test]
fn test_search_never_loses_to_plain_compression() {
    let table = table_with(&[
        "NotImplementedError",
        "ZeroDivisionError",
        "argument",
        "must be",
    ]);
    let pairs: Vec<TranslationPair> = [
        ("a", "argument must be an int, not ZeroDivisionError"),
        ("b", "NotImplementedError: argument must be a str"),
        ("c", "ZeroDivisionError raised while dividing"),
        ("d", "the argument must be positive"),
        ("e", "NotImplementedError for this argument"),
    ]
    .iter()
    .map(|(o, t)| TranslationPair::new(*o, *t))
    .collect();

    let outcome = compress::search(&table, &pairs).expect("search succeeds");
    let plain = deflate_raw(&join_messages(
        &sort_pairs(&pairs, false),
        &SubstitutionDictionary::default(),
    ))
    .expect("compresses");

    assert!(outcome.best.compressed_size() <= plain.len());
    let smallest = outcome
        .points
        .iter()
        .map(|p| p.compressed_size)
        .min()
        .expect("points");
    assert_eq!(outcome.best.compressed_size(), smallest);
}

#[test]
fn test_winner_decodes_back_to_translations() {
    let table = table_with(&["Invalid argument", "argument", "pin"]);
    let pairs = vec![
        TranslationPair::new("Invalid argument", "Argument invalide"),
        TranslationPair::new("Invalid pin", "Invalid pin"),
        TranslationPair::new("%q in use", "%q en cours d'utilisation\r\n"),
    ];

    let outcome = compress::search(&table, &pairs).expect("search succeeds");
    let decoded = decode(&table, outcome.best.cutoff, &outcome.best.compressed);
    let expected: Vec<String> = outcome
        .best
        .pairs
        .iter()
        .map(|p| p.translated.clone())
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_search_covers_every_point_once() {
    let table = table_with(&[]);
    let pairs = vec![TranslationPair::new("x", "y")];
    let outcome = compress::search(&table, &pairs).expect("search succeeds");

    let mut seen: Vec<(bool, usize)> = outcome
        .points
        .iter()
        .map(|p| (p.reversed, p.cutoff))
        .collect();
    seen.sort();
    let expected: Vec<(bool, usize)> = [false, true]
        .into_iter()
        .flat_map(|r| CUTOFFS.map(move |c| (r, c)))
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_ties_prefer_earliest_point() {
    // no table text occurs in the messages, so every cutoff compresses identically
    let table = QstrTable::new();
    let pairs = vec![TranslationPair::new("q", "qqqq")];
    let outcome = compress::search(&table, &pairs).expect("search succeeds");
    assert!(!outcome.best.reversed);
    assert_eq!(outcome.best.cutoff, 3);
}

#[test]
fn test_pipeline_translations_follow_winning_order() {
    let source = "QCFG(BYTES_IN_LEN, (1))\nQCFG(BYTES_IN_HASH, (2))\nQ(chat)\nTRANSLATE(\"dog\")\nTRANSLATE(\"cat\")\n";
    let collection = collect_sources(&[source]).expect("collects");
    let mut catalog = std::collections::HashMap::new();
    catalog.insert("cat".to_string(), "chat".to_string());
    catalog.insert("dog".to_string(), "chien".to_string());

    let generated = qstr_forge::generate::generate_data(&collection, &catalog).expect("generates");
    let translations: Vec<&str> = generated
        .header
        .lines()
        .filter(|l| l.starts_with("TRANSLATION(\""))
        .collect();
    assert_eq!(translations.len(), 2);
    assert!(translations[0].ends_with(", 0)"));
    assert!(translations[1].ends_with(", 1)"));
}
