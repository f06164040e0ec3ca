//! Body-mass index.
//!
//! ```text
//! bmi = weight_kg / height_m^2
//! ```
//!
//! The value is rounded to one decimal and the category is read off the
//! rounded value, so what is displayed and what is classified never disagree.

use serde::Serialize;

use crate::calc::units::{kg_to_weight, length_to_cm, round_to, weight_to_kg};
use crate::calc::validate::ensure_range;
use crate::calc::{HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
use crate::domain::{CalculatorKind, CalculatorResult, Detail, UnitSystem};
use crate::error::CalcError;

/// Lower bound of the "Normal weight" band (inclusive).
pub const NORMAL_MIN: f64 = 18.5;
/// Upper bound of the "Normal weight" band as published (inclusive).
pub const NORMAL_MAX: f64 = 24.9;
pub const OVERWEIGHT_MIN: f64 = 25.0;
pub const OBESE_MIN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiInput {
    pub height: f64,
    pub weight: f64,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_MIN {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_MIN {
            BmiCategory::Normal
        } else if bmi < OBESE_MIN {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    /// Weight range (in the caller's units) that keeps BMI within the normal band.
    pub healthy_weight: (f64, f64),
    pub units: UnitSystem,
}

pub fn compute(input: &BmiInput) -> Result<BmiResult, CalcError> {
    let height_cm = ensure_range(
        "height",
        length_to_cm(input.height, input.units),
        HEIGHT_CM_RANGE.0,
        HEIGHT_CM_RANGE.1,
    )?;
    let weight_kg = ensure_range(
        "weight",
        weight_to_kg(input.weight, input.units),
        WEIGHT_KG_RANGE.0,
        WEIGHT_KG_RANGE.1,
    )?;

    let bmi = round_to(bmi_value(height_cm, weight_kg), 1);
    let (lo, hi) = healthy_weight_kg(height_cm);

    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        healthy_weight: (kg_to_weight(lo, input.units), kg_to_weight(hi, input.units)),
        units: input.units,
    })
}

/// Unrounded BMI for a metric height and weight.
pub fn bmi_value(height_cm: f64, weight_kg: f64) -> f64 {
    let m = height_cm / 100.0;
    weight_kg / (m * m)
}

/// Weight range (kg) giving a BMI in `[18.5, 24.9]` at this height.
pub fn healthy_weight_kg(height_cm: f64) -> (f64, f64) {
    let m2 = (height_cm / 100.0).powi(2);
    (NORMAL_MIN * m2, NORMAL_MAX * m2)
}

impl From<&BmiResult> for CalculatorResult {
    fn from(r: &BmiResult) -> Self {
        let unit = r.units.weight_label();
        CalculatorResult {
            calculator: CalculatorKind::Bmi,
            value: r.bmi,
            unit: "kg/m²".to_string(),
            category: Some(r.category.label().to_string()),
            details: vec![Detail::new(
                "Healthy weight",
                format!("{:.1} - {:.1} {unit}", r.healthy_weight.0, r.healthy_weight.1),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(height: f64, weight: f64) -> BmiInput {
        BmiInput {
            height,
            weight,
            units: UnitSystem::Metric,
        }
    }

    #[test]
    fn typical_adult_is_normal_weight() {
        let r = compute(&metric(180.0, 70.0)).unwrap();
        assert_eq!(r.bmi, 21.6);
        assert_eq!(r.category.label(), "Normal weight");
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn imperial_matches_703_rule() {
        let r = compute(&BmiInput {
            height: 70.0,
            weight: 150.0,
            units: UnitSystem::Imperial,
        })
        .unwrap();
        let classic = 703.0 * 150.0 / (70.0 * 70.0);
        assert!((r.bmi - classic).abs() < 0.05);
        assert_eq!(r.bmi, 21.5);
    }

    #[test]
    fn healthy_range_brackets_normal_band() {
        let r = compute(&metric(180.0, 70.0)).unwrap();
        assert!((r.healthy_weight.0 - 59.94).abs() < 1e-9);
        assert!((r.healthy_weight.1 - 80.676).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_height_is_invalid() {
        let err = compute(&metric(0.0, 70.0)).unwrap_err();
        assert_eq!(err.field(), "height");
        assert!(compute(&metric(180.0, f64::NAN)).is_err());
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let input = metric(165.0, 82.5);
        assert_eq!(compute(&input).unwrap(), compute(&input).unwrap());
    }

    #[test]
    fn converts_to_uniform_result() {
        let r = compute(&metric(180.0, 70.0)).unwrap();
        let out = CalculatorResult::from(&r);
        assert_eq!(out.calculator, CalculatorKind::Bmi);
        assert_eq!(out.category.as_deref(), Some("Normal weight"));
        assert_eq!(out.details[0].value, "59.9 - 80.7 kg");
    }
}
