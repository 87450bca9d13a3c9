// SPDX-License-Identifier: PMPL-1.0-or-later

//! qstr-forge — interned-string tables for embedded interpreters.
//!
//! Turns the `Q(...)`, `QCFG(...)` and `TRANSLATE("...")` lines left in
//! preprocessed C sources into the generated header an embedded runtime
//! compiles in.
//!
//! PIPELINE:
//! 1. **Collect**: gather declarations, deduplicate by identifier, and
//!    order them so special names get small ids.
//! 2. **Encode**: identifier, hash, byte length and literal per string.
//! 3. **Compress**: search substitution cutoffs and message orders for the
//!    smallest raw-deflate blob of translated messages, with long qstrs
//!    replaced by private-use codepoints.
//! 4. **Emit**: `QENUM` or `QDEF`/`TRANSLATION` headers.

pub mod collect;
pub mod compress;
pub mod error;
pub mod generate;
pub mod i18n;
pub mod logging;
pub mod qstr;
pub mod report;
pub mod types;

pub use error::{QstrError, Result};
