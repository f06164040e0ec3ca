//! Input/output helpers.
//!
//! - batch CSV ingest + validation (`ingest`)
//! - batch result export (`export`)
//! - theme table JSON read/write (`theme`)

pub mod export;
pub mod ingest;
pub mod theme;

pub use export::*;
pub use ingest::*;
pub use theme::*;
