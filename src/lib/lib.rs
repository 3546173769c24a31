#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Mail composition library
//!
//! Builds outgoing email messages out of a configured sender identity,
//! rendered template sections, and per-message overrides, then hands the
//! assembled message to a mail transport.

pub mod domain;
pub mod infrastructure;
