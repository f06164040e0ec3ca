//! Static site configuration: name, base URL and the calculator catalogue.
//!
//! The catalogue is the single list of calculator routes. The built-in theme
//! table and both front ends read it; nothing here renders pages.

use crate::domain::CalculatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorEntry {
    pub kind: CalculatorKind,
    pub slug: &'static str,
    /// Route path, also the theme table key.
    pub path: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SiteConfig {
    pub name: &'static str,
    pub base_url: &'static str,
    pub calculators: &'static [CalculatorEntry],
}

pub const SITE: SiteConfig = SiteConfig {
    name: "Vitals Calculators",
    base_url: "https://vitals.example",
    calculators: &CALCULATORS,
};

const CALCULATORS: [CalculatorEntry; 10] = [
    CalculatorEntry {
        kind: CalculatorKind::Bmi,
        slug: "bmi-calculator",
        path: "/bmi-calculator",
        title: "BMI Calculator",
        summary: "Body-mass index with category and healthy weight range.",
    },
    CalculatorEntry {
        kind: CalculatorKind::Bmr,
        slug: "bmr-calculator",
        path: "/bmr-calculator",
        title: "BMR Calculator",
        summary: "Calories burned at rest (Mifflin-St Jeor or Harris-Benedict).",
    },
    CalculatorEntry {
        kind: CalculatorKind::Calories,
        slug: "calorie-calculator",
        path: "/calorie-calculator",
        title: "Calorie Calculator",
        summary: "Daily energy expenditure and weight-goal targets.",
    },
    CalculatorEntry {
        kind: CalculatorKind::Sleep,
        slug: "sleep-calculator",
        path: "/sleep-calculator",
        title: "Sleep Cycle Calculator",
        summary: "Bedtimes and wake-up times aligned to 90-minute cycles.",
    },
    CalculatorEntry {
        kind: CalculatorKind::BodyFat,
        slug: "body-fat-calculator",
        path: "/body-fat-calculator",
        title: "Body Fat Calculator",
        summary: "Body-fat percentage by the U.S. Navy tape method.",
    },
    CalculatorEntry {
        kind: CalculatorKind::IdealWeight,
        slug: "ideal-weight-calculator",
        path: "/ideal-weight-calculator",
        title: "Ideal Weight Calculator",
        summary: "Devine, Robinson, Miller and Hamwi estimates.",
    },
    CalculatorEntry {
        kind: CalculatorKind::Water,
        slug: "water-intake-calculator",
        path: "/water-intake-calculator",
        title: "Water Intake Calculator",
        summary: "Daily hydration target from weight and activity.",
    },
    CalculatorEntry {
        kind: CalculatorKind::HeartRate,
        slug: "heart-rate-calculator",
        path: "/heart-rate-calculator",
        title: "Heart Rate Zone Calculator",
        summary: "Maximum heart rate and five training zones.",
    },
    CalculatorEntry {
        kind: CalculatorKind::DueDate,
        slug: "due-date-calculator",
        path: "/due-date-calculator",
        title: "Due Date Calculator",
        summary: "Estimated delivery date and gestational age.",
    },
    CalculatorEntry {
        kind: CalculatorKind::WaistToHip,
        slug: "waist-to-hip-calculator",
        path: "/waist-to-hip-calculator",
        title: "Waist-to-Hip Ratio Calculator",
        summary: "Waist-to-hip ratio with health-risk band.",
    },
];

impl SiteConfig {
    pub fn entry(&self, kind: CalculatorKind) -> Option<&'static CalculatorEntry> {
        self.calculators.iter().find(|e| e.kind == kind)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&'static CalculatorEntry> {
        let slug = slug.trim_matches('/');
        self.calculators.iter().find(|e| e.slug == slug)
    }

    /// Absolute URL of a calculator page.
    pub fn url(&self, entry: &CalculatorEntry) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), entry.path)
    }
}
