// SPDX-License-Identifier: PMPL-1.0-or-later

//! Header rendering and build summaries

pub mod emit;
pub mod summary;

pub use emit::{render_compression_header, render_data, render_enums};
pub use summary::{print_summary, write_summary, BuildSummary};
