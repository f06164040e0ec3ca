//! `vitals-calc` library crate.
//!
//! The binary (`vitals`) is a thin wrapper around this library so that:
//!
//! - formulas and the theme resolver are testable without spawning processes
//! - the CLI and the TUI share one evaluation path (`app::pipeline`)
//! - code stays easy to navigate as the calculator list grows

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod site;
pub mod theme;
pub mod tui;
