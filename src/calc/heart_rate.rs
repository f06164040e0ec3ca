//! Maximum heart rate and training zones.
//!
//! Zones are percentages of maximum heart rate, or of heart-rate reserve
//! (Karvonen) when a resting heart rate is known:
//!
//! ```text
//! target = resting + pct * (max - resting)
//! ```

use serde::Serialize;

use crate::calc::validate::ensure_range;
use crate::domain::{CalculatorKind, CalculatorResult, Detail, MaxHrFormula};
use crate::error::CalcError;

const HR_AGE_RANGE: (f64, f64) = (10.0, 100.0);
const RESTING_RANGE: (f64, f64) = (30.0, 120.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zone {
    Recovery,
    Endurance,
    Aerobic,
    Threshold,
    Maximum,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Recovery,
        Zone::Endurance,
        Zone::Aerobic,
        Zone::Threshold,
        Zone::Maximum,
    ];

    /// Intensity band as fractions.
    pub fn band(self) -> (f64, f64) {
        match self {
            Zone::Recovery => (0.5, 0.6),
            Zone::Endurance => (0.6, 0.7),
            Zone::Aerobic => (0.7, 0.8),
            Zone::Threshold => (0.8, 0.9),
            Zone::Maximum => (0.9, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Recovery => "Zone 1 - Recovery",
            Zone::Endurance => "Zone 2 - Endurance",
            Zone::Aerobic => "Zone 3 - Aerobic",
            Zone::Threshold => "Zone 4 - Threshold",
            Zone::Maximum => "Zone 5 - Maximum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateInput {
    pub age: f64,
    pub resting: Option<f64>,
    pub formula: MaxHrFormula,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRange {
    pub zone: Zone,
    pub low_bpm: f64,
    pub high_bpm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeartRateResult {
    pub max_bpm: f64,
    pub resting_bpm: Option<f64>,
    pub zones: Vec<ZoneRange>,
}

pub fn max_heart_rate(formula: MaxHrFormula, age: f64) -> f64 {
    match formula {
        MaxHrFormula::Classic => 220.0 - age,
        MaxHrFormula::Tanaka => 208.0 - 0.7 * age,
    }
}

pub fn compute(input: &HeartRateInput) -> Result<HeartRateResult, CalcError> {
    let age = ensure_range("age", input.age, HR_AGE_RANGE.0, HR_AGE_RANGE.1)?;
    let max = max_heart_rate(input.formula, age).round();

    let resting = match input.resting {
        Some(r) => {
            let r = ensure_range("resting", r, RESTING_RANGE.0, RESTING_RANGE.1)?;
            if r >= max {
                return Err(CalcError::invalid("resting", "must be below the maximum heart rate"));
            }
            Some(r)
        }
        None => None,
    };

    let target = |pct: f64| match resting {
        Some(r) => (r + pct * (max - r)).round(),
        None => (pct * max).round(),
    };

    let zones = Zone::ALL
        .iter()
        .map(|&zone| {
            let (lo, hi) = zone.band();
            ZoneRange {
                zone,
                low_bpm: target(lo),
                high_bpm: target(hi),
            }
        })
        .collect();

    Ok(HeartRateResult {
        max_bpm: max,
        resting_bpm: resting,
        zones,
    })
}

impl From<&HeartRateResult> for CalculatorResult {
    fn from(r: &HeartRateResult) -> Self {
        let method = if r.resting_bpm.is_some() { "Karvonen (heart-rate reserve)" } else { "Percent of maximum" };
        let mut details = vec![Detail::new("Method", method)];
        details.extend(
            r.zones
                .iter()
                .map(|z| Detail::new(z.zone.label(), format!("{:.0} - {:.0} bpm", z.low_bpm, z.high_bpm))),
        );
        CalculatorResult {
            calculator: CalculatorKind::HeartRate,
            value: r.max_bpm,
            unit: "bpm".to_string(),
            category: None,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_max_zones() {
        let r = compute(&HeartRateInput {
            age: 30.0,
            resting: None,
            formula: MaxHrFormula::Classic,
        })
        .unwrap();
        assert_eq!(r.max_bpm, 190.0);
        assert_eq!((r.zones[0].low_bpm, r.zones[0].high_bpm), (95.0, 114.0));
        assert_eq!((r.zones[4].low_bpm, r.zones[4].high_bpm), (171.0, 190.0));
    }

    #[test]
    fn karvonen_uses_reserve() {
        let r = compute(&HeartRateInput {
            age: 30.0,
            resting: Some(60.0),
            formula: MaxHrFormula::Classic,
        })
        .unwrap();
        assert_eq!((r.zones[0].low_bpm, r.zones[0].high_bpm), (125.0, 138.0));
        assert_eq!(r.zones[4].high_bpm, 190.0);
    }

    #[test]
    fn tanaka_estimate() {
        let r = compute(&HeartRateInput {
            age: 40.0,
            resting: None,
            formula: MaxHrFormula::Tanaka,
        })
        .unwrap();
        assert_eq!(r.max_bpm, 180.0);
    }

    #[test]
    fn resting_above_max_is_invalid() {
        let err = compute(&HeartRateInput {
            age: 100.0,
            resting: Some(120.0),
            formula: MaxHrFormula::Classic,
        })
        .unwrap_err();
        assert_eq!(err.field(), "resting");
    }

    #[test]
    fn accepts_ages_below_the_adult_minimum() {
        let young = HeartRateInput {
            age: 12.0,
            resting: None,
            formula: MaxHrFormula::Classic,
        };
        assert_eq!(compute(&young).unwrap().max_bpm, 208.0);
        let err = compute(&HeartRateInput { age: 9.0, ..young }).unwrap_err();
        assert_eq!(err.field(), "age");
    }
}
