//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the formulas stay free of presentation concerns
//! - output changes are localized (and covered by snapshot-style tests)

use crate::app::pipeline::BatchOutcome;
use crate::domain::{CalculatorKind, CalculatorResult};
use crate::site::SiteConfig;
use crate::theme::{ThemeConfig, ThemeMatch};

/// Decimal places used when printing a calculator's headline value.
pub fn value_precision(kind: CalculatorKind) -> usize {
    match kind {
        CalculatorKind::Bmr | CalculatorKind::Calories | CalculatorKind::HeartRate | CalculatorKind::DueDate => 0,
        CalculatorKind::Water | CalculatorKind::WaistToHip => 2,
        _ => 1,
    }
}

pub fn format_value(result: &CalculatorResult) -> String {
    let places = value_precision(result.calculator);
    let value = format!("{:.places$}", result.value);
    if result.unit.is_empty() {
        value
    } else {
        format!("{value} {}", result.unit)
    }
}

/// Format a single calculator result.
pub fn format_result(result: &CalculatorResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", result.calculator.display_name()));
    out.push_str(&format!("Result: {}\n", format_value(result)));
    if let Some(category) = &result.category {
        out.push_str(&format!("Category: {category}\n"));
    }

    if !result.details.is_empty() {
        let width = result.details.iter().map(|d| d.label.chars().count()).max().unwrap_or(0);
        out.push('\n');
        for d in &result.details {
            out.push_str(&format!("- {:<width$}  {}\n", d.label, d.value));
        }
    }

    out
}

/// Format a theme lookup: which rule matched and the tokens it resolved to.
pub fn format_theme(path: &str, rule: ThemeMatch<'_>, theme: &ThemeConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("Path: {path}\n"));
    let rule = match rule {
        ThemeMatch::Exact(key) => format!("exact \"{key}\""),
        ThemeMatch::Prefix(key) => format!("prefix \"{key}\""),
        ThemeMatch::Default => "default".to_string(),
    };
    out.push_str(&format!("Match: {rule}\n"));
    out.push_str(&format!("background:   {}\n", theme.background));
    out.push_str(&format!("logoGradient: {}\n", theme.logo_gradient));
    out.push_str(&format!("logoShadow:   {}\n", theme.logo_shadow));

    let colors: Vec<String> = theme.logo_gradient.colors().iter().map(ToString::to_string).collect();
    if !colors.is_empty() {
        out.push_str(&format!("accent: {}\n", colors.join(" -> ")));
    }

    out
}

/// Format the calculator catalogue.
pub fn format_catalogue(site: &SiteConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n\n", site.name, site.base_url));

    out.push_str(format!("{:<30} {:<26} {}", "calculator", "path", "summary").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<30} {:-<26} {:-<7}", "", "", "").trim_end());
    out.push('\n');

    for e in site.calculators {
        out.push_str(
            format!("{:<30} {:<26} {}", truncate(e.title, 30), e.path, e.summary).trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format batch outcomes as a table followed by a one-line summary.
pub fn format_batch(outcomes: &[BatchOutcome]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>5} {:<16} {:>6} {:<14} {}", "line", "id", "bmi", "category", "error").trim_end());
    out.push('\n');
    out.push_str(format!("{:->5} {:-<16} {:->6} {:-<14} {:-<5}", "", "", "", "", "").trim_end());
    out.push('\n');

    for o in outcomes {
        let row = match &o.result {
            Ok(r) => format!(
                "{:>5} {:<16} {:>6.1} {:<14}",
                o.line,
                truncate(&o.id, 16),
                r.bmi,
                r.category.label()
            ),
            Err(msg) => format!("{:>5} {:<16} {:>6} {:<14} {msg}", o.line, truncate(&o.id, 16), "-", "-"),
        };
        out.push_str(row.trim_end());
        out.push('\n');
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    out.push_str(&format!("\nRows: {} | ok: {} | errors: {failed}\n", outcomes.len(), outcomes.len() - failed));
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calc::bmi::{self, BmiInput};
    use crate::domain::UnitSystem;
    use crate::theme::builtin;

    #[test]
    fn bmi_result_text() {
        let r = bmi::compute(&BmiInput {
            height: 180.0,
            weight: 70.0,
            units: UnitSystem::Metric,
        })
        .unwrap();
        let txt = format_result(&CalculatorResult::from(&r));
        let expected = concat!(
            "=== BMI ===\n",
            "Result: 21.6 kg/m²\n",
            "Category: Normal weight\n",
            "\n",
            "- Healthy weight  59.9 - 80.7 kg\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn unitless_values_have_no_trailing_space() {
        let r = CalculatorResult {
            calculator: CalculatorKind::WaistToHip,
            value: 0.9,
            unit: String::new(),
            category: None,
            details: Vec::new(),
        };
        assert_eq!(format_value(&r), "0.90");
    }

    #[test]
    fn theme_lookup_text() {
        let resolver = builtin::shared();
        let (rule, theme) = resolver.resolve_match("/blog/post");
        let txt = format_theme("/blog/post", rule, theme);
        assert!(txt.contains("Match: prefix \"/blog\"\n"));
        assert!(txt.contains("accent: violet-600 -> purple-600\n"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
