//! Ideal body weight estimates.
//!
//! The classic formulas share one shape, `base + k * (inches over 5 ft)`,
//! with per-sex constants (kg). Devine is reported as the headline value.

use serde::Serialize;

use crate::calc::bmi::healthy_weight_kg;
use crate::calc::units::{cm_to_inches, kg_to_weight, length_to_cm, round_to};
use crate::calc::validate::ensure_range;
use crate::calc::HEIGHT_CM_RANGE;
use crate::domain::{CalculatorKind, CalculatorResult, Detail, Sex, UnitSystem};
use crate::error::CalcError;

const BASE_INCHES: f64 = 60.0;
/// Shortest height (54 in) where every formula still gives a positive weight.
const MIN_HEIGHT_CM: f64 = 137.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdealWeightFormula {
    Devine,
    Robinson,
    Miller,
    Hamwi,
}

impl IdealWeightFormula {
    pub const ALL: [IdealWeightFormula; 4] = [
        IdealWeightFormula::Devine,
        IdealWeightFormula::Robinson,
        IdealWeightFormula::Miller,
        IdealWeightFormula::Hamwi,
    ];

    /// `(base_kg, kg_per_inch)` for the given sex.
    fn constants(self, sex: Sex) -> (f64, f64) {
        match (self, sex) {
            (IdealWeightFormula::Devine, Sex::Male) => (50.0, 2.3),
            (IdealWeightFormula::Devine, Sex::Female) => (45.5, 2.3),
            (IdealWeightFormula::Robinson, Sex::Male) => (52.0, 1.9),
            (IdealWeightFormula::Robinson, Sex::Female) => (49.0, 1.7),
            (IdealWeightFormula::Miller, Sex::Male) => (56.2, 1.41),
            (IdealWeightFormula::Miller, Sex::Female) => (53.1, 1.36),
            (IdealWeightFormula::Hamwi, Sex::Male) => (48.0, 2.7),
            (IdealWeightFormula::Hamwi, Sex::Female) => (45.5, 2.2),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IdealWeightFormula::Devine => "Devine (1974)",
            IdealWeightFormula::Robinson => "Robinson (1983)",
            IdealWeightFormula::Miller => "Miller (1983)",
            IdealWeightFormula::Hamwi => "Hamwi (1964)",
        }
    }

    pub fn ideal_kg(self, sex: Sex, height_cm: f64) -> f64 {
        let (base, per_inch) = self.constants(sex);
        base + per_inch * (cm_to_inches(height_cm) - BASE_INCHES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealWeightInput {
    pub sex: Sex,
    pub height: f64,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdealWeightResult {
    /// One entry per formula, weight in the caller's units (one decimal).
    pub estimates: Vec<(IdealWeightFormula, f64)>,
    /// BMI 18.5-24.9 weight range in the caller's units.
    pub healthy_range: (f64, f64),
    pub units: UnitSystem,
}

impl IdealWeightResult {
    pub fn estimate(&self, formula: IdealWeightFormula) -> Option<f64> {
        self.estimates.iter().find(|(f, _)| *f == formula).map(|(_, w)| *w)
    }
}

pub fn compute(input: &IdealWeightInput) -> Result<IdealWeightResult, CalcError> {
    let height_cm = ensure_range(
        "height",
        length_to_cm(input.height, input.units),
        MIN_HEIGHT_CM,
        HEIGHT_CM_RANGE.1,
    )?;

    let estimates = IdealWeightFormula::ALL
        .iter()
        .map(|&f| (f, round_to(kg_to_weight(f.ideal_kg(input.sex, height_cm), input.units), 1)))
        .collect();

    let (lo, hi) = healthy_weight_kg(height_cm);
    Ok(IdealWeightResult {
        estimates,
        healthy_range: (kg_to_weight(lo, input.units), kg_to_weight(hi, input.units)),
        units: input.units,
    })
}

impl From<&IdealWeightResult> for CalculatorResult {
    fn from(r: &IdealWeightResult) -> Self {
        let unit = r.units.weight_label();
        let mut details: Vec<Detail> = r
            .estimates
            .iter()
            .map(|(f, w)| Detail::new(f.display_name(), format!("{w:.1} {unit}")))
            .collect();
        details.push(Detail::new(
            "Healthy BMI range",
            format!("{:.1} - {:.1} {unit}", r.healthy_range.0, r.healthy_range.1),
        ));
        CalculatorResult {
            calculator: CalculatorKind::IdealWeight,
            value: r.estimate(IdealWeightFormula::Devine).unwrap_or(0.0),
            unit: unit.to_string(),
            category: None,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_estimates_at_180_cm() {
        let r = compute(&IdealWeightInput {
            sex: Sex::Male,
            height: 180.0,
            units: UnitSystem::Metric,
        })
        .unwrap();
        assert_eq!(r.estimate(IdealWeightFormula::Devine), Some(75.0));
        assert_eq!(r.estimate(IdealWeightFormula::Robinson), Some(72.6));
        assert_eq!(r.estimate(IdealWeightFormula::Miller), Some(71.5));
        assert_eq!(r.estimate(IdealWeightFormula::Hamwi), Some(77.3));
    }

    #[test]
    fn female_estimates_in_pounds() {
        let r = compute(&IdealWeightInput {
            sex: Sex::Female,
            height: 65.0,
            units: UnitSystem::Imperial,
        })
        .unwrap();
        assert_eq!(r.estimate(IdealWeightFormula::Devine), Some(125.7));
        let out = CalculatorResult::from(&r);
        assert_eq!(out.unit, "lb");
        assert_eq!(out.details.len(), 5);
    }

    #[test]
    fn short_heights_are_rejected() {
        let err = compute(&IdealWeightInput {
            sex: Sex::Male,
            height: 50.0,
            units: UnitSystem::Metric,
        })
        .unwrap_err();
        assert_eq!(err.field(), "height");

        let r = compute(&IdealWeightInput {
            sex: Sex::Male,
            height: MIN_HEIGHT_CM,
            units: UnitSystem::Metric,
        })
        .unwrap();
        assert!(r.estimates.iter().all(|(_, w)| *w > 0.0));
    }
}
