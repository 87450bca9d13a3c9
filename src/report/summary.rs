// SPDX-License-Identifier: PMPL-1.0-or-later

//! Build summary: what went into the header and how well it compressed

use crate::collect::QstrTable;
use crate::compress::{SearchOutcome, SearchPoint};
use crate::types::OutputMode;
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Winning compression settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionSummary {
    pub messages: usize,
    pub uncompressed_bytes: usize,
    pub compressed_bytes: usize,
    pub cutoff: usize,
    pub reversed: bool,
    pub candidates: Vec<SearchPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub mode: OutputMode,
    pub qstr_count: usize,
    /// UTF-8 bytes of all qstr texts
    pub total_qstr_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<CompressionSummary>,
}

impl BuildSummary {
    pub fn new(mode: OutputMode, table: &QstrTable, search: Option<&SearchOutcome>) -> Self {
        let compression = search.map(|outcome| {
            let best = &outcome.best;
            let pairs = &best.pairs;
            CompressionSummary {
                messages: pairs.len(),
                // NUL separators included
                uncompressed_bytes: pairs.iter().map(|p| p.translated.len()).sum::<usize>()
                    + pairs.len().saturating_sub(1),
                compressed_bytes: best.compressed_size(),
                cutoff: best.cutoff,
                reversed: best.reversed,
                candidates: outcome.points.clone(),
            }
        });
        Self {
            mode,
            qstr_count: table.len(),
            total_qstr_bytes: table.iter().map(|entry| entry.text.len()).sum(),
            compression,
        }
    }
}

/// Write the summary as JSON
pub fn write_summary(summary: &BuildSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

/// Print a short summary to stderr; stdout carries the header.
pub fn print_summary(summary: &BuildSummary) {
    eprintln!("{}", "QSTR SUMMARY".bold());
    eprintln!("  Mode: {:?}", summary.mode);
    eprintln!(
        "  Qstrs: {}  |  Text bytes: {}",
        summary.qstr_count, summary.total_qstr_bytes
    );

    let Some(compression) = &summary.compression else {
        return;
    };

    let ratio = if compression.uncompressed_bytes == 0 {
        0.0
    } else {
        100.0 * compression.compressed_bytes as f64 / compression.uncompressed_bytes as f64
    };
    eprintln!(
        "  Messages: {}  |  {} -> {} bytes ({})",
        compression.messages,
        compression.uncompressed_bytes,
        compression.compressed_bytes,
        format!("{:.1}%", ratio).green()
    );
    eprintln!(
        "  Winner: cutoff {}{}",
        compression.cutoff,
        if compression.reversed { ", reversed" } else { "" }
    );
    for point in &compression.candidates {
        let marker = if point.cutoff == compression.cutoff && point.reversed == compression.reversed
        {
            "*".yellow().bold()
        } else {
            " ".normal()
        };
        eprintln!(
            "   {} cutoff {} {:<9} {:>8}",
            marker,
            point.cutoff,
            if point.reversed { "reversed" } else { "" },
            point.compressed_size
        );
    }
}
