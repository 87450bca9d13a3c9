// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation compression search
//!
//! Tries every combination of message sort direction and substitution
//! cutoff, compresses the NUL-joined translations of each with raw
//! deflate, and keeps the smallest result.

pub mod dictionary;

use crate::collect::QstrTable;
use crate::error::{QstrError, Result};
use crate::types::{CompressionCandidate, StringEntry, TranslationPair};
use flate2::{Compress, Compression, FlushCompress, Status};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, info};

pub use dictionary::{SubstitutionDictionary, PRIVATE_USE_BASE};

/// Minimum qstr lengths tried for substitution
pub const CUTOFFS: Range<usize> = 3..8;

/// Deflate window the runtime decoder is built for (1 KiB)
pub const WINDOW_BITS: u8 = 10;

/// Size of one evaluated search point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPoint {
    pub reversed: bool,
    pub cutoff: usize,
    pub compressed_size: usize,
}

/// Winner of the search plus the size of every point tried
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: CompressionCandidate,
    pub points: Vec<SearchPoint>,
}

/// Order messages: translated ones first, then untranslated, each block by
/// translated text. `reversed` flips the whole order. The sort is stable.
pub fn sort_pairs(pairs: &[TranslationPair], reversed: bool) -> Vec<TranslationPair> {
    let mut sorted = pairs.to_vec();
    let key = |pair: &TranslationPair| (pair.is_untranslated(), pair.translated.clone());
    if reversed {
        sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    } else {
        sorted.sort_by(|a, b| key(a).cmp(&key(b)));
    }
    sorted
}

/// Substitute and NUL-join the translated texts.
pub fn join_messages(pairs: &[TranslationPair], dictionary: &SubstitutionDictionary) -> Vec<u8> {
    let encoded: Vec<String> = pairs
        .iter()
        .map(|pair| dictionary.apply(&pair.translated))
        .collect();
    encoded.join("\0").into_bytes()
}

/// Raw deflate (no zlib header or trailer) at the best level.
pub fn deflate_raw(data: &[u8]) -> Result<Vec<u8>> {
    let mut compressor = Compress::new_with_window_bits(Compression::best(), false, WINDOW_BITS);
    let mut out = Vec::with_capacity(data.len() / 2 + 64);
    loop {
        let consumed = compressor.total_in() as usize;
        let status = compressor
            .compress_vec(&data[consumed..], &mut out, FlushCompress::Finish)
            .map_err(|err| QstrError::Compression(err.to_string()))?;
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => out.reserve(out.capacity().max(64)),
        }
    }
}

/// Longest translated message in UTF-8 bytes, before substitution; 0 when empty.
pub fn max_message_len(pairs: &[TranslationPair]) -> usize {
    pairs
        .iter()
        .map(|pair| pair.translated.len())
        .max()
        .unwrap_or(0)
}

/// Evaluate one point of the search space.
pub fn evaluate(
    table: &[&StringEntry],
    pairs: &[TranslationPair],
    reversed: bool,
    cutoff: usize,
) -> Result<CompressionCandidate> {
    let sorted = sort_pairs(pairs, reversed);
    let dictionary = SubstitutionDictionary::build(table.iter().copied(), cutoff);
    let compressed = deflate_raw(&join_messages(&sorted, &dictionary))?;
    debug!(
        reversed,
        cutoff,
        dictionary = dictionary.len(),
        size = compressed.len(),
        "evaluated compression candidate"
    );
    Ok(CompressionCandidate {
        reversed,
        cutoff,
        compressed,
        pairs: sorted,
    })
}

/// Run the full search and return the smallest candidate.
///
/// Points are evaluated in parallel. Ties go to the earliest point in
/// search order (ascending before reversed, smaller cutoff first).
pub fn search(table: &QstrTable, pairs: &[TranslationPair]) -> Result<SearchOutcome> {
    let sorted_table = table.sorted();
    let grid: Vec<(bool, usize)> = [false, true]
        .into_iter()
        .flat_map(|reversed| CUTOFFS.map(move |cutoff| (reversed, cutoff)))
        .collect();

    let mut candidates: Vec<CompressionCandidate> = grid
        .par_iter()
        .map(|&(reversed, cutoff)| evaluate(&sorted_table, pairs, reversed, cutoff))
        .collect::<Result<Vec<_>>>()?;

    let points = candidates
        .iter()
        .map(|candidate| SearchPoint {
            reversed: candidate.reversed,
            cutoff: candidate.cutoff,
            compressed_size: candidate.compressed_size(),
        })
        .collect();

    let winner = candidates
        .iter()
        .enumerate()
        .min_by_key(|(position, candidate)| (candidate.compressed_size(), *position))
        .map(|(position, _)| position)
        .ok_or_else(|| QstrError::Compression("empty search space".into()))?;
    let best = candidates.swap_remove(winner);

    info!(
        size = best.compressed_size(),
        cutoff = best.cutoff,
        reversed = best.reversed,
        messages = best.pairs.len(),
        "selected translation compression"
    );

    Ok(SearchOutcome { best, points })
}
