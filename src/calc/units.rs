//! Unit conversion between the metric and imperial systems.
//!
//! Formulas work in centimetres and kilograms; these helpers move user input
//! into that space and results back out.

use crate::domain::UnitSystem;

/// Centimetres per inch (exact).
pub const CM_PER_INCH: f64 = 2.54;

/// Kilograms per avoirdupois pound (exact).
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Millilitres per US fluid ounce.
pub const ML_PER_FL_OZ: f64 = 29.573_529_6;

/// Convert a length given in `units` to centimetres.
pub fn length_to_cm(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * CM_PER_INCH,
    }
}

/// Convert a weight given in `units` to kilograms.
pub fn weight_to_kg(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * KG_PER_LB,
    }
}

/// Convert centimetres back into `units`.
pub fn cm_to_length(cm: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => cm,
        UnitSystem::Imperial => cm / CM_PER_INCH,
    }
}

/// Convert kilograms back into `units`.
pub fn kg_to_weight(kg: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => kg,
        UnitSystem::Imperial => kg / KG_PER_LB,
    }
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

pub fn ml_to_fl_oz(ml: f64) -> f64 {
    ml / ML_PER_FL_OZ
}

/// Round to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imperial_lengths_and_weights_convert_to_metric() {
        assert!((length_to_cm(70.0, UnitSystem::Imperial) - 177.8).abs() < 1e-9);
        assert!((weight_to_kg(150.0, UnitSystem::Imperial) - 68.0388555).abs() < 1e-6);
        assert_eq!(length_to_cm(180.0, UnitSystem::Metric), 180.0);
    }

    #[test]
    fn conversions_invert() {
        let cm = length_to_cm(65.0, UnitSystem::Imperial);
        assert!((cm_to_length(cm, UnitSystem::Imperial) - 65.0).abs() < 1e-12);
        let kg = weight_to_kg(200.0, UnitSystem::Imperial);
        assert!((kg_to_weight(kg, UnitSystem::Imperial) - 200.0).abs() < 1e-12);
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round_to(21.604938, 1), 21.6);
        assert_eq!(round_to(24.95, 1), 25.0);
        assert_eq!(round_to(0.8449, 2), 0.84);
    }
}
