// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-string encoding: identifier, hash, length and literal

pub mod bytes;
pub mod escape;
pub mod hash;
pub mod statics;

pub use bytes::{escape_bytes, make_bytes, QstrBytes};
pub use escape::sanitize;
pub use hash::compute_hash;
pub use statics::STATIC_QSTRS;
