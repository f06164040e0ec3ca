//! Runtime settings from the environment (and an optional `.env` file).
//!
//! | variable            | meaning                                  | default  |
//! |---------------------|------------------------------------------|----------|
//! | `VITALS_UNITS`      | default unit system (`metric`/`imperial`) | `metric` |
//! | `VITALS_THEME_FILE` | JSON theme table replacing the built-in  | unset    |
//! | `VITALS_LOG`        | log filter when `RUST_LOG` is unset      | unset    |

use std::path::PathBuf;

use clap::ValueEnum;

use crate::domain::UnitSystem;
use crate::error::AppError;

pub const ENV_UNITS: &str = "VITALS_UNITS";
pub const ENV_THEME_FILE: &str = "VITALS_THEME_FILE";
pub const ENV_LOG: &str = "VITALS_LOG";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub units: UnitSystem,
    pub theme_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (testable without touching the environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let units = match non_empty(ENV_UNITS) {
            Some(raw) => UnitSystem::from_str(&raw, true).map_err(|_| {
                AppError::new(2, format!("Invalid {ENV_UNITS}='{raw}' (expected metric or imperial)."))
            })?,
            None => UnitSystem::default(),
        };

        Ok(Self {
            units,
            theme_file: non_empty(ENV_THEME_FILE).map(PathBuf::from),
            log_filter: non_empty(ENV_LOG),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.units, UnitSystem::Metric);
    }

    #[test]
    fn reads_all_variables() {
        let s = Settings::from_lookup(lookup(&[
            (ENV_UNITS, "Imperial"),
            (ENV_THEME_FILE, "themes.json"),
            (ENV_LOG, "vitals_calc=debug"),
        ]))
        .unwrap();
        assert_eq!(s.units, UnitSystem::Imperial);
        assert_eq!(s.theme_file, Some(PathBuf::from("themes.json")));
        assert_eq!(s.log_filter.as_deref(), Some("vitals_calc=debug"));
    }

    #[test]
    fn invalid_units_are_rejected() {
        let err = Settings::from_lookup(lookup(&[(ENV_UNITS, "furlongs")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = Settings::from_lookup(lookup(&[(ENV_THEME_FILE, "  ")])).unwrap();
        assert!(s.theme_file.is_none());
    }
}
