//! Route -> theme resolution.
//!
//! Lookup order:
//!
//! 1. exact match on a route key
//! 2. first declared key that is a prefix of the path
//! 3. the default theme
//!
//! Routes are an explicit ordered list, so when two keys both prefix-match a
//! path the one declared first wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::theme::StyleToken;

/// Visual style tokens applied to the layout chrome of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub background: StyleToken,
    pub logo_gradient: StyleToken,
    pub logo_shadow: StyleToken,
}

impl ThemeConfig {
    pub fn new(
        background: impl Into<StyleToken>,
        logo_gradient: impl Into<StyleToken>,
        logo_shadow: impl Into<StyleToken>,
    ) -> Self {
        Self {
            background: background.into(),
            logo_gradient: logo_gradient.into(),
            logo_shadow: logo_shadow.into(),
        }
    }
}

/// Which rule produced a resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMatch<'a> {
    Exact(&'a str),
    Prefix(&'a str),
    Default,
}

#[derive(Debug, Clone)]
pub struct ThemeResolver {
    routes: Vec<(String, ThemeConfig)>,
    /// Route key -> index of its first declaration in `routes`.
    exact: HashMap<String, usize>,
    default: ThemeConfig,
}

impl ThemeResolver {
    pub fn new(default: ThemeConfig) -> Self {
        Self {
            routes: Vec::new(),
            exact: HashMap::new(),
            default,
        }
    }

    /// Builder-style `push`.
    pub fn with_route(mut self, prefix: impl Into<String>, theme: ThemeConfig) -> Self {
        self.push(prefix, theme);
        self
    }

    /// Append a route. A repeated key never shadows the earlier declaration.
    pub fn push(&mut self, prefix: impl Into<String>, theme: ThemeConfig) {
        let prefix = prefix.into();
        self.exact.entry(prefix.clone()).or_insert(self.routes.len());
        self.routes.push((prefix, theme));
    }

    pub fn resolve(&self, path: &str) -> &ThemeConfig {
        self.resolve_match(path).1
    }

    pub fn resolve_match(&self, path: &str) -> (ThemeMatch<'_>, &ThemeConfig) {
        if let Some(&idx) = self.exact.get(path) {
            let (key, theme) = &self.routes[idx];
            return (ThemeMatch::Exact(key), theme);
        }

        self.routes
            .iter()
            .find(|(key, _)| path.starts_with(key.as_str()))
            .map(|(key, theme)| (ThemeMatch::Prefix(key.as_str()), theme))
            .unwrap_or((ThemeMatch::Default, &self.default))
    }

    pub fn routes(&self) -> impl Iterator<Item = (&str, &ThemeConfig)> {
        self.routes.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn default_theme(&self) -> &ThemeConfig {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
