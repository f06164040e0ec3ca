//! Route-based theming for navigation chrome.
//!
//! - `ThemeConfig` / `StyleToken`: the style tokens a route is drawn with
//! - `ThemeResolver`: exact match, then first-declared prefix, then default
//! - `builtin`: the route table for the calculator site

pub mod builtin;
pub mod resolver;
pub mod token;

pub use resolver::{ThemeConfig, ThemeMatch, ThemeResolver};
pub use token::{ColorRef, StyleToken};

/// Resolve a path against the built-in table.
pub fn resolve(path: &str) -> &'static ThemeConfig {
    builtin::shared().resolve(path)
}
