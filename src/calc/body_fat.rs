//! Body-fat percentage by the U.S. Navy circumference method.
//!
//! All circumferences and height in centimetres:
//!
//! ```text
//! male:   495 / (1.0324  - 0.19077 log10(waist - neck)       + 0.15456 log10(height)) - 450
//! female: 495 / (1.29579 - 0.35004 log10(waist + hip - neck) + 0.22100 log10(height)) - 450
//! ```
//!
//! Categories follow the American Council on Exercise chart.

use serde::Serialize;

use crate::calc::units::{kg_to_weight, length_to_cm, round_to, weight_to_kg};
use crate::calc::validate::ensure_range;
use crate::calc::{CIRCUMFERENCE_CM_RANGE, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
use crate::domain::{CalculatorKind, CalculatorResult, Detail, Sex, UnitSystem};
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatInput {
    pub sex: Sex,
    pub height: f64,
    pub neck: f64,
    pub waist: f64,
    /// Required for women.
    pub hip: Option<f64>,
    /// Enables the fat/lean mass split.
    pub weight: Option<f64>,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyFatCategory {
    BelowEssential,
    Essential,
    Athletes,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    /// Lower bounds (percent) of Essential, Athletes, Fitness, Average, Obese.
    fn bounds(sex: Sex) -> [f64; 5] {
        match sex {
            Sex::Male => [2.0, 6.0, 14.0, 18.0, 25.0],
            Sex::Female => [10.0, 14.0, 21.0, 25.0, 32.0],
        }
    }

    pub fn classify(sex: Sex, percent: f64) -> Self {
        let [essential, athletes, fitness, average, obese] = Self::bounds(sex);
        if percent < essential {
            BodyFatCategory::BelowEssential
        } else if percent < athletes {
            BodyFatCategory::Essential
        } else if percent < fitness {
            BodyFatCategory::Athletes
        } else if percent < average {
            BodyFatCategory::Fitness
        } else if percent < obese {
            BodyFatCategory::Average
        } else {
            BodyFatCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BodyFatCategory::BelowEssential => "Below essential fat",
            BodyFatCategory::Essential => "Essential fat",
            BodyFatCategory::Athletes => "Athletes",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Average => "Average",
            BodyFatCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatResult {
    /// Percent, one decimal.
    pub percent: f64,
    pub category: BodyFatCategory,
    /// `(fat, lean)` mass in the caller's units when weight was supplied.
    pub mass_split: Option<(f64, f64)>,
    pub units: UnitSystem,
}

pub fn compute(input: &BodyFatInput) -> Result<BodyFatResult, CalcError> {
    let cm = |field: &'static str, v: f64| {
        ensure_range(
            field,
            length_to_cm(v, input.units),
            CIRCUMFERENCE_CM_RANGE.0,
            CIRCUMFERENCE_CM_RANGE.1,
        )
    };

    let height = ensure_range(
        "height",
        length_to_cm(input.height, input.units),
        HEIGHT_CM_RANGE.0,
        HEIGHT_CM_RANGE.1,
    )?;
    let neck = cm("neck", input.neck)?;
    let waist = cm("waist", input.waist)?;

    let raw = match input.sex {
        Sex::Male => {
            if waist <= neck {
                return Err(CalcError::invalid("waist", "must be larger than the neck"));
            }
            495.0 / (1.0324 - 0.19077 * (waist - neck).log10() + 0.15456 * height.log10()) - 450.0
        }
        Sex::Female => {
            let hip = input
                .hip
                .ok_or_else(|| CalcError::invalid("hip", "required for women"))?;
            let hip = cm("hip", hip)?;
            if waist + hip <= neck {
                return Err(CalcError::invalid("waist", "waist plus hip must exceed the neck"));
            }
            495.0 / (1.29579 - 0.35004 * (waist + hip - neck).log10() + 0.22100 * height.log10()) - 450.0
        }
    };

    if !raw.is_finite() || raw <= 0.0 || raw >= 100.0 {
        return Err(CalcError::invalid(
            "waist",
            "measurements do not describe a plausible body",
        ));
    }

    let percent = round_to(raw, 1);
    let mass_split = match input.weight {
        Some(w) => {
            let kg = ensure_range(
                "weight",
                weight_to_kg(w, input.units),
                WEIGHT_KG_RANGE.0,
                WEIGHT_KG_RANGE.1,
            )?;
            let fat = kg * percent / 100.0;
            Some((kg_to_weight(fat, input.units), kg_to_weight(kg - fat, input.units)))
        }
        None => None,
    };

    Ok(BodyFatResult {
        percent,
        category: BodyFatCategory::classify(input.sex, percent),
        mass_split,
        units: input.units,
    })
}

impl From<&BodyFatResult> for CalculatorResult {
    fn from(r: &BodyFatResult) -> Self {
        let mut details = Vec::new();
        if let Some((fat, lean)) = r.mass_split {
            let unit = r.units.weight_label();
            details.push(Detail::new("Fat mass", format!("{fat:.1} {unit}")));
            details.push(Detail::new("Lean mass", format!("{lean:.1} {unit}")));
        }
        CalculatorResult {
            calculator: CalculatorKind::BodyFat,
            value: r.percent,
            unit: "%".to_string(),
            category: Some(r.category.label().to_string()),
            details,
        }
    }
}
