// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end generation: collected declarations in, header text out
//!
//! Nothing is written here; callers get every artifact back at once and
//! decide where it goes.

use crate::collect::Collection;
use crate::compress;
use crate::error::Result;
use crate::i18n::{translate, Catalog};
use crate::report::{render_compression_header, render_data, render_enums, BuildSummary};
use crate::types::OutputMode;
use tracing::info;

/// All artifacts of one run
#[derive(Debug, Clone)]
pub struct Generated {
    /// The generated C header
    pub header: String,
    /// Side header for the message table, data mode only
    pub compression_header: Option<String>,
    pub summary: BuildSummary,
}

/// Identifier-only header.
pub fn generate_enums(collection: &Collection) -> Generated {
    info!(qstrs = collection.table.len(), "rendering qstr enums");
    Generated {
        header: render_enums(&collection.table),
        compression_header: None,
        summary: BuildSummary::new(OutputMode::Enum, &collection.table, None),
    }
}

/// Full data header with translations compressed against the table.
pub fn generate_data<C: Catalog + ?Sized>(
    collection: &Collection,
    catalog: &C,
) -> Result<Generated> {
    let config = collection.qstr_config()?;
    let pairs = translate(catalog, &collection.translations);
    let outcome = compress::search(&collection.table, &pairs)?;

    info!(
        qstrs = collection.table.len(),
        messages = pairs.len(),
        "rendering qstr data"
    );
    let header = render_data(&config, &collection.table, &outcome.best)?;
    let compression_header =
        render_compression_header(collection.translations.len(), outcome.best.cutoff);

    Ok(Generated {
        header,
        compression_header: Some(compression_header),
        summary: BuildSummary::new(OutputMode::Data, &collection.table, Some(&outcome)),
    })
}
