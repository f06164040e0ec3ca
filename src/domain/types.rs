//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the formulas
//! - printed as JSON or CSV
//! - selected directly from CLI flags (`ValueEnum`)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Measurement system used for user-facing lengths and weights.
///
/// - `Metric`: centimetres and kilograms.
/// - `Imperial`: inches and pounds.
///
/// Formulas always work in metric internally; conversion happens at the edge
/// (see `calc::units`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn length_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }

    pub fn weight_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Habitual activity level, used to scale BMR into daily energy expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Light exercise 1-3 days/week.
    Light,
    /// Moderate exercise 3-5 days/week.
    Moderate,
    /// Hard exercise 6-7 days/week.
    Active,
    /// Very hard exercise or a physical job.
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// TDEE multiplier applied to BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly active",
            ActivityLevel::Moderate => "Moderately active",
            ActivityLevel::Active => "Very active",
            ActivityLevel::VeryActive => "Extra active",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which BMR equation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor (1990).
    #[default]
    #[value(name = "mifflin")]
    MifflinStJeor,
    /// Harris-Benedict, revised by Roza & Shizgal (1984).
    #[value(name = "harris")]
    HarrisBenedict,
}

impl BmrFormula {
    pub fn display_name(self) -> &'static str {
        match self {
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
            BmrFormula::HarrisBenedict => "Harris-Benedict",
        }
    }
}

/// Which maximum heart rate estimate to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MaxHrFormula {
    /// `220 - age`.
    #[default]
    Classic,
    /// `208 - 0.7 * age` (Tanaka, 2001).
    Tanaka,
}

/// Every calculator the suite offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Bmi,
    Bmr,
    Calories,
    Sleep,
    BodyFat,
    IdealWeight,
    Water,
    HeartRate,
    DueDate,
    WaistToHip,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::Bmi,
        CalculatorKind::Bmr,
        CalculatorKind::Calories,
        CalculatorKind::Sleep,
        CalculatorKind::BodyFat,
        CalculatorKind::IdealWeight,
        CalculatorKind::Water,
        CalculatorKind::HeartRate,
        CalculatorKind::DueDate,
        CalculatorKind::WaistToHip,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CalculatorKind::Bmi => "BMI",
            CalculatorKind::Bmr => "BMR",
            CalculatorKind::Calories => "Calories",
            CalculatorKind::Sleep => "Sleep cycles",
            CalculatorKind::BodyFat => "Body fat",
            CalculatorKind::IdealWeight => "Ideal weight",
            CalculatorKind::Water => "Water intake",
            CalculatorKind::HeartRate => "Heart rate zones",
            CalculatorKind::DueDate => "Due date",
            CalculatorKind::WaistToHip => "Waist-to-hip ratio",
        }
    }
}

/// A labelled secondary output (e.g. "Healthy range" -> "59.9 - 80.7 kg").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

impl Detail {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Uniform view of any calculator's output.
///
/// Each calculator returns its own typed result; this record is what the
/// reports, JSON output and the TUI consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub calculator: CalculatorKind,
    pub value: f64,
    pub unit: String,
    pub category: Option<String>,
    pub details: Vec<Detail>,
}
