//! Read/write theme table JSON files.
//!
//! ```json
//! {
//!   "default": { "background": "...", "logoGradient": "...", "logoShadow": "..." },
//!   "routes": [ { "prefix": "/blog", "theme": { ... } } ]
//! }
//! ```
//!
//! `routes` is an array so that declaration order, which decides overlapping
//! prefixes, survives the round trip.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::theme::{ThemeConfig, ThemeResolver};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFile {
    pub default: ThemeConfig,
    #[serde(default)]
    pub routes: Vec<RouteTheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTheme {
    pub prefix: String,
    pub theme: ThemeConfig,
}

impl ThemeFile {
    pub fn from_resolver(resolver: &ThemeResolver) -> Self {
        Self {
            default: resolver.default_theme().clone(),
            routes: resolver
                .routes()
                .map(|(prefix, theme)| RouteTheme {
                    prefix: prefix.to_string(),
                    theme: theme.clone(),
                })
                .collect(),
        }
    }

    pub fn into_resolver(self) -> Result<ThemeResolver, AppError> {
        let mut resolver = ThemeResolver::new(self.default);
        for (idx, route) in self.routes.into_iter().enumerate() {
            if !route.prefix.starts_with('/') {
                return Err(AppError::new(
                    2,
                    format!("Theme route #{} has prefix '{}'; prefixes must start with '/'.", idx + 1, route.prefix),
                ));
            }
            resolver.push(route.prefix, route.theme);
        }
        Ok(resolver)
    }
}

/// Read a theme table file into a resolver.
pub fn read_theme_file(path: &Path) -> Result<ThemeResolver, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open theme file '{}': {e}", path.display())))?;
    let table: ThemeFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid theme file '{}': {e}", path.display())))?;
    table.into_resolver()
}

/// Write a resolver's table as JSON.
pub fn write_theme_file(path: &Path, resolver: &ThemeResolver) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create theme file '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &ThemeFile::from_resolver(resolver))
        .map_err(|e| AppError::new(2, format!("Failed to write theme file: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::theme::{ThemeMatch, builtin};

    #[test]
    fn file_order_decides_overlapping_prefixes() {
        let json = r#"{
            "default": { "background": "from-gray-50", "logoGradient": "from-gray-600", "logoShadow": "shadow-gray-500/25" },
            "routes": [
                { "prefix": "/sleep", "theme": { "background": "from-indigo-50", "logoGradient": "from-indigo-600", "logoShadow": "shadow-indigo-500/25" } },
                { "prefix": "/sleep-calculator", "theme": { "background": "from-purple-50", "logoGradient": "from-purple-600", "logoShadow": "shadow-purple-500/25" } }
            ]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let resolver = read_theme_file(file.path()).unwrap();
        let (rule, theme) = resolver.resolve_match("/sleep-calculator/results");
        assert_eq!(rule, ThemeMatch::Prefix("/sleep"));
        assert_eq!(theme.background.as_str(), "from-indigo-50");
        assert_eq!(resolver.resolve("/sleep-calculator").background.as_str(), "from-purple-50");
    }

    #[test]
    fn builtin_table_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("themes.json");
        write_theme_file(&path, builtin::shared()).unwrap();

        let loaded = read_theme_file(&path).unwrap();
        let original: Vec<&str> = builtin::shared().routes().map(|(k, _)| k).collect();
        let reloaded: Vec<&str> = loaded.routes().map(|(k, _)| k).collect();
        assert_eq!(original, reloaded);
        assert_eq!(loaded.default_theme(), builtin::shared().default_theme());
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let table = ThemeFile {
            default: builtin::default_theme(),
            routes: vec![RouteTheme {
                prefix: "blog".to_string(),
                theme: builtin::default_theme(),
            }],
        };
        assert_eq!(table.into_resolver().unwrap_err().exit_code(), 2);
    }
}
