//! Reporting utilities: plain-text rendering of results, theme lookups,
//! the calculator catalogue and batch runs.

pub mod format;

pub use format::*;
