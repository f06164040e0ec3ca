//! ASCII/Unicode gauge for terminal output.
//!
//! This is intentionally "dumb" (fixed-width strip), optimized for:
//! - quick visual reading of where a value sits among category bands
//! - deterministic output (helpful for golden tests)
//!
//! Gauge elements:
//! - one shade character per band: `░ ▒ ▓ █`, repeating
//! - a `^` marker under the value's column
//! - a legend line with the band limits

use crate::calc::{bmi, body_fat, whr};
use crate::domain::Sex;

const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

/// A category band `[lo, hi)` on the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub label: &'static str,
    pub lo: f64,
    pub hi: f64,
}

/// BMI bands, drawn over 15-40.
pub fn bmi_bands() -> Vec<Band> {
    vec![
        Band { label: bmi::BmiCategory::Underweight.label(), lo: 15.0, hi: bmi::NORMAL_MIN },
        Band { label: bmi::BmiCategory::Normal.label(), lo: bmi::NORMAL_MIN, hi: bmi::OVERWEIGHT_MIN },
        Band { label: bmi::BmiCategory::Overweight.label(), lo: bmi::OVERWEIGHT_MIN, hi: bmi::OBESE_MIN },
        Band { label: bmi::BmiCategory::Obese.label(), lo: bmi::OBESE_MIN, hi: 40.0 },
    ]
}

/// Body-fat bands for `sex`, drawn from 0% to obese + 10.
pub fn body_fat_bands(sex: Sex) -> Vec<Band> {
    use body_fat::BodyFatCategory as C;

    // Find band edges by probing the classifier on a 0.5% grid.
    let mut bands: Vec<Band> = Vec::with_capacity(6);
    let mut pct = 0.0;
    while pct < 60.0 {
        let cat = C::classify(sex, pct);
        match bands.last_mut() {
            Some(b) if b.label == cat.label() => b.hi = pct + 0.5,
            _ => bands.push(Band { label: cat.label(), lo: pct, hi: pct + 0.5 }),
        }
        pct += 0.5;
    }
    if let Some(last) = bands.last_mut() {
        last.hi = last.lo + 10.0;
    }
    bands
}

/// Waist-to-hip risk bands for `sex`.
pub fn whr_bands(sex: Sex) -> Vec<Band> {
    let (low, moderate) = whr::WhrRisk::limits(sex);
    vec![
        Band { label: whr::WhrRisk::Low.label(), lo: low - 0.25, hi: low },
        Band { label: whr::WhrRisk::Moderate.label(), lo: low, hi: moderate },
        Band { label: whr::WhrRisk::High.label(), lo: moderate, hi: moderate + 0.2 },
    ]
}

/// Render a gauge `width` columns wide.
///
/// Values outside the drawn range are pinned to the nearest end.
pub fn render_gauge(bands: &[Band], value: f64, width: usize) -> String {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return String::new();
    };
    let width = width.max(bands.len());
    let (lo, hi) = (first.lo, last.hi);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let step = span / width as f64;

    let mut strip = String::with_capacity(width * 3);
    for col in 0..width {
        let center = lo + (col as f64 + 0.5) * step;
        let idx = bands.iter().position(|b| center < b.hi).unwrap_or(bands.len() - 1);
        strip.push(SHADES[idx % SHADES.len()]);
    }

    let marker_col = if value.is_finite() {
        (((value - lo) / span) * width as f64).floor().clamp(0.0, (width - 1) as f64) as usize
    } else {
        0
    };

    let legend: Vec<String> = bands
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let shade = SHADES[i % SHADES.len()];
            if i == 0 {
                format!("{shade} {} < {}", b.label, fmt_limit(b.hi))
            } else if i == bands.len() - 1 {
                format!("{shade} {} >= {}", b.label, fmt_limit(b.lo))
            } else {
                format!("{shade} {} {}-{}", b.label, fmt_limit(b.lo), fmt_limit(b.hi))
            }
        })
        .collect();

    let mut out = String::new();
    out.push_str(&strip);
    out.push('\n');
    out.push_str(&" ".repeat(marker_col));
    out.push_str("^\n");
    out.push_str(&legend.join("  "));
    out.push('\n');
    out
}

fn fmt_limit(v: f64) -> String {
    if v < 5.0 { format!("{v:.2}") } else { format!("{v:.1}") }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bmi_gauge_golden_snapshot_small() {
        let txt = render_gauge(&bmi_bands(), 21.6, 10);
        let expected = concat!(
            "░▒▒▒▓▓████\n",
            "  ^\n",
            "░ Underweight < 18.5  ▒ Normal weight 18.5-25.0  ▓ Overweight 25.0-30.0  █ Obese >= 30.0\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn marker_is_pinned_to_the_ends() {
        let low = render_gauge(&bmi_bands(), 5.0, 20);
        assert!(low.lines().nth(1).unwrap().starts_with('^'));
        let high = render_gauge(&bmi_bands(), 80.0, 20);
        assert_eq!(high.lines().nth(1).unwrap().len(), 20);
    }

    #[test]
    fn body_fat_bands_follow_the_classifier() {
        let bands = body_fat_bands(Sex::Male);
        let labels: Vec<&str> = bands.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec!["Below essential fat", "Essential fat", "Athletes", "Fitness", "Average", "Obese"]
        );
        assert_eq!(bands[3].lo, 14.0);
        assert_eq!(bands[3].hi, 18.0);
    }

    #[test]
    fn whr_bands_are_contiguous() {
        let bands = whr_bands(Sex::Female);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].hi, pair[1].lo);
        }
    }

    #[test]
    fn whr_band_edges_match_the_classifier() {
        for sex in [Sex::Male, Sex::Female] {
            let bands = whr_bands(sex);
            assert_eq!(whr::WhrRisk::classify(sex, bands[0].hi).label(), bands[0].label);
            assert_eq!(whr::WhrRisk::classify(sex, bands[1].hi).label(), bands[1].label);
            assert_eq!(whr::WhrRisk::classify(sex, bands[1].hi + 0.01).label(), bands[2].label);
        }
    }

    #[test]
    fn empty_bands_render_nothing() {
        assert_eq!(render_gauge(&[], 1.0, 10), "");
    }
}
