//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - input enums (`UnitSystem`, `Sex`, `ActivityLevel`, `BmrFormula`, `MaxHrFormula`)
//! - the calculator catalogue key (`CalculatorKind`)
//! - the uniform output record (`CalculatorResult`)

pub mod types;

pub use types::*;
