// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation support for qstr-forge.
//!
//! Messages marked with `TRANSLATE("...")` are looked up in a compiled
//! gettext catalog. The [`Catalog`] trait is the seam: [`MoCatalog`] reads
//! `.mo` files, and a plain `HashMap<String, String>` works for tests and
//! embedding.

mod catalog;

pub use catalog::{translate, unescape_c, Catalog, MoCatalog};
