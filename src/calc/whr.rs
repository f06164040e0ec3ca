//! Waist-to-hip ratio with WHO health-risk bands.

use serde::Serialize;

use crate::calc::units::{length_to_cm, round_to};
use crate::calc::validate::ensure_range;
use crate::calc::CIRCUMFERENCE_CM_RANGE;
use crate::domain::{CalculatorKind, CalculatorResult, Sex, UnitSystem};
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WhrRisk {
    Low,
    Moderate,
    High,
}

impl WhrRisk {
    /// Upper bounds (inclusive) of the low and moderate bands.
    pub(crate) fn limits(sex: Sex) -> (f64, f64) {
        match sex {
            Sex::Male => (0.95, 1.00),
            Sex::Female => (0.80, 0.85),
        }
    }

    pub fn classify(sex: Sex, ratio: f64) -> Self {
        let (low, moderate) = Self::limits(sex);
        if ratio <= low {
            WhrRisk::Low
        } else if ratio <= moderate {
            WhrRisk::Moderate
        } else {
            WhrRisk::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WhrRisk::Low => "Low health risk",
            WhrRisk::Moderate => "Moderate health risk",
            WhrRisk::High => "High health risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhrInput {
    pub sex: Sex,
    pub waist: f64,
    pub hip: f64,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhrResult {
    /// Two decimals; the risk band is read off this value.
    pub ratio: f64,
    pub risk: WhrRisk,
}

pub fn compute(input: &WhrInput) -> Result<WhrResult, CalcError> {
    let (lo, hi) = CIRCUMFERENCE_CM_RANGE;
    let waist = ensure_range("waist", length_to_cm(input.waist, input.units), lo, hi)?;
    let hip = ensure_range("hip", length_to_cm(input.hip, input.units), lo, hi)?;

    let ratio = round_to(waist / hip, 2);
    Ok(WhrResult {
        ratio,
        risk: WhrRisk::classify(input.sex, ratio),
    })
}

impl From<&WhrResult> for CalculatorResult {
    fn from(r: &WhrResult) -> Self {
        CalculatorResult {
            calculator: CalculatorKind::WaistToHip,
            value: r.ratio,
            unit: String::new(),
            category: Some(r.risk.label().to_string()),
            details: Vec::new(),
        }
    }
}
