//! The built-in route table.
//!
//! One entry per calculator page plus the content sections. The home page
//! uses the default theme.

use std::sync::LazyLock;

use crate::domain::CalculatorKind;
use crate::site::SITE;
use crate::theme::{ThemeConfig, ThemeResolver};

static BUILTIN: LazyLock<ThemeResolver> = LazyLock::new(resolver);

/// Shared instance of the built-in resolver.
pub fn shared() -> &'static ThemeResolver {
    &BUILTIN
}

pub fn default_theme() -> ThemeConfig {
    ThemeConfig::new(
        "bg-gradient-to-br from-slate-50 via-white to-blue-50",
        "bg-gradient-to-r from-blue-600 to-indigo-600",
        "shadow-lg shadow-blue-500/25",
    )
}

/// Theme for a calculator page, as `(from, to)` color families.
fn calculator_families(kind: CalculatorKind) -> (&'static str, &'static str) {
    match kind {
        CalculatorKind::Bmi => ("blue", "cyan"),
        CalculatorKind::Bmr => ("amber", "orange"),
        CalculatorKind::Calories => ("orange", "red"),
        CalculatorKind::Sleep => ("indigo", "purple"),
        CalculatorKind::BodyFat => ("emerald", "teal"),
        CalculatorKind::IdealWeight => ("teal", "green"),
        CalculatorKind::Water => ("sky", "cyan"),
        CalculatorKind::HeartRate => ("rose", "red"),
        CalculatorKind::DueDate => ("pink", "fuchsia"),
        CalculatorKind::WaistToHip => ("lime", "green"),
    }
}

fn gradient_theme(from: &str, to: &str) -> ThemeConfig {
    ThemeConfig::new(
        format!("bg-gradient-to-br from-{from}-50 via-white to-{to}-50").as_str(),
        format!("bg-gradient-to-r from-{from}-600 to-{to}-600").as_str(),
        format!("shadow-lg shadow-{from}-500/25").as_str(),
    )
}

/// Build the built-in resolver: calculator routes in catalogue order, then sections.
pub fn resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new(default_theme());
    for entry in SITE.calculators {
        let (from, to) = calculator_families(entry.kind);
        resolver.push(entry.path, gradient_theme(from, to));
    }
    resolver.push("/blog", gradient_theme("violet", "purple"));
    resolver.push("/about", gradient_theme("slate", "gray"));
    resolver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMatch;

    #[test]
    fn every_calculator_route_is_themed() {
        let r = resolver();
        for entry in SITE.calculators {
            let (rule, _) = r.resolve_match(entry.path);
            assert_eq!(rule, ThemeMatch::Exact(entry.path));
        }
    }

    #[test]
    fn blog_posts_inherit_blog_theme() {
        let r = shared();
        let theme = r.resolve("/blog/how-much-sleep-do-you-need");
        assert_eq!(theme.logo_gradient.as_str(), "bg-gradient-to-r from-violet-600 to-purple-600");
    }

    #[test]
    fn home_page_uses_default() {
        assert_eq!(shared().resolve("/"), &default_theme());
    }

    #[test]
    fn sleep_page_colors() {
        let theme = shared().resolve("/sleep-calculator");
        let colors: Vec<String> = theme.logo_gradient.colors().iter().map(ToString::to_string).collect();
        assert_eq!(colors, vec!["indigo-600", "purple-600"]);
    }
}
