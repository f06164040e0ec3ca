//! Daily water intake.
//!
//! ```text
//! ml = 35 * weight_kg + 12 * exercise_minutes (+ 500 in a hot climate)
//! ```

use crate::calc::units::{ml_to_fl_oz, round_to, weight_to_kg};
use crate::calc::validate::ensure_range;
use crate::calc::WEIGHT_KG_RANGE;
use crate::domain::{CalculatorKind, CalculatorResult, Detail, UnitSystem};
use crate::error::CalcError;

pub const ML_PER_KG: f64 = 35.0;
pub const ML_PER_EXERCISE_MINUTE: f64 = 12.0;
pub const HOT_CLIMATE_ML: f64 = 500.0;
pub const GLASS_ML: f64 = 250.0;
const MAX_EXERCISE_MINUTES: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterInput {
    pub weight: f64,
    pub exercise_minutes: f64,
    pub hot_climate: bool,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterResult {
    pub litres: f64,
    pub glasses: u32,
    pub fl_oz: f64,
    pub units: UnitSystem,
}

pub fn compute(input: &WaterInput) -> Result<WaterResult, CalcError> {
    let kg = ensure_range(
        "weight",
        weight_to_kg(input.weight, input.units),
        WEIGHT_KG_RANGE.0,
        WEIGHT_KG_RANGE.1,
    )?;
    let minutes = ensure_range("exercise_minutes", input.exercise_minutes, 0.0, MAX_EXERCISE_MINUTES)?;

    let mut ml = ML_PER_KG * kg + ML_PER_EXERCISE_MINUTE * minutes;
    if input.hot_climate {
        ml += HOT_CLIMATE_ML;
    }

    Ok(WaterResult {
        litres: round_to(ml / 1000.0, 2),
        glasses: (ml / GLASS_ML).ceil() as u32,
        fl_oz: round_to(ml_to_fl_oz(ml), 0),
        units: input.units,
    })
}

impl From<&WaterResult> for CalculatorResult {
    fn from(r: &WaterResult) -> Self {
        let mut details = vec![Detail::new("Glasses (250 ml)", r.glasses.to_string())];
        if r.units == UnitSystem::Imperial {
            details.push(Detail::new("Fluid ounces", format!("{:.0} fl oz", r.fl_oz)));
        }
        CalculatorResult {
            calculator: CalculatorKind::Water,
            value: r.litres,
            unit: "L/day".to_string(),
            category: None,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(weight: f64, exercise_minutes: f64, hot_climate: bool) -> WaterInput {
        WaterInput {
            weight,
            exercise_minutes,
            hot_climate,
            units: UnitSystem::Metric,
        }
    }

    #[test]
    fn base_plus_exercise() {
        let r = compute(&input(70.0, 30.0, false)).unwrap();
        assert_eq!(r.litres, 2.81);
        assert_eq!(r.glasses, 12);
    }

    #[test]
    fn hot_climate_adds_half_litre() {
        let r = compute(&input(70.0, 30.0, true)).unwrap();
        assert_eq!(r.litres, 3.31);
        assert_eq!(r.glasses, 14);
    }

    #[test]
    fn negative_exercise_is_invalid() {
        assert_eq!(compute(&input(70.0, -5.0, false)).unwrap_err().field(), "exercise_minutes");
    }
}
