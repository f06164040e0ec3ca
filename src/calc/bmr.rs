//! Basal metabolic rate (kcal/day).

use crate::calc::units::{length_to_cm, weight_to_kg};
use crate::calc::validate::ensure_range;
use crate::calc::{AGE_RANGE, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
use crate::domain::{BmrFormula, CalculatorKind, CalculatorResult, Detail, Sex, UnitSystem};
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmrInput {
    pub sex: Sex,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub units: UnitSystem,
    pub formula: BmrFormula,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmrResult {
    /// Rounded to whole kilocalories.
    pub kcal_per_day: f64,
    pub formula: BmrFormula,
}

/// Validated metric body measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Body {
    pub age: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
}

pub(crate) fn validated_body(input: &BmrInput) -> Result<Body, CalcError> {
    Ok(Body {
        age: ensure_range("age", input.age, AGE_RANGE.0, AGE_RANGE.1)?,
        height_cm: ensure_range(
            "height",
            length_to_cm(input.height, input.units),
            HEIGHT_CM_RANGE.0,
            HEIGHT_CM_RANGE.1,
        )?,
        weight_kg: ensure_range(
            "weight",
            weight_to_kg(input.weight, input.units),
            WEIGHT_KG_RANGE.0,
            WEIGHT_KG_RANGE.1,
        )?,
    })
}

pub fn compute(input: &BmrInput) -> Result<BmrResult, CalcError> {
    let body = validated_body(input)?;
    Ok(BmrResult {
        kcal_per_day: raw_bmr(input.formula, input.sex, &body).round(),
        formula: input.formula,
    })
}

/// Unrounded BMR.
pub(crate) fn raw_bmr(formula: BmrFormula, sex: Sex, body: &Body) -> f64 {
    let (w, h, a) = (body.weight_kg, body.height_cm, body.age);
    match (formula, sex) {
        (BmrFormula::MifflinStJeor, Sex::Male) => 10.0 * w + 6.25 * h - 5.0 * a + 5.0,
        (BmrFormula::MifflinStJeor, Sex::Female) => 10.0 * w + 6.25 * h - 5.0 * a - 161.0,
        (BmrFormula::HarrisBenedict, Sex::Male) => 88.362 + 13.397 * w + 4.799 * h - 5.677 * a,
        (BmrFormula::HarrisBenedict, Sex::Female) => 447.593 + 9.247 * w + 3.098 * h - 4.330 * a,
    }
}

impl From<&BmrResult> for CalculatorResult {
    fn from(r: &BmrResult) -> Self {
        CalculatorResult {
            calculator: CalculatorKind::Bmr,
            value: r.kcal_per_day,
            unit: "kcal/day".to_string(),
            category: None,
            details: vec![Detail::new("Formula", r.formula.display_name())],
        }
    }
}
