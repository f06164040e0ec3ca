//! Health and fitness calculators.
//!
//! Each submodule is an independent pure function `compute(&Input) -> Result<Output, CalcError>`.
//! Inputs are range-checked; the typed outputs convert into the uniform
//! `domain::CalculatorResult` for reporting.

pub mod bmi;
pub mod bmr;
pub mod body_fat;
pub mod calories;
pub mod due_date;
pub mod heart_rate;
pub mod ideal_weight;
pub mod sleep;
pub mod units;
pub mod validate;
pub mod water;
pub mod whr;

/// Accepted body height, centimetres.
pub const HEIGHT_CM_RANGE: (f64, f64) = (50.0, 272.0);
/// Accepted body weight, kilograms.
pub const WEIGHT_KG_RANGE: (f64, f64) = (2.0, 650.0);
/// Accepted age (years) for metabolic formulas.
pub const AGE_RANGE: (f64, f64) = (15.0, 100.0);
/// Accepted neck/waist/hip circumference, centimetres.
pub const CIRCUMFERENCE_CM_RANGE: (f64, f64) = (10.0, 300.0);
