//! Style tokens: utility-class strings such as `from-blue-600 to-indigo-600`.
//!
//! A token is kept verbatim (it is what a web layout applies), but renderers
//! that need concrete colors can ask for the color references it mentions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Utility prefixes that introduce a color reference.
const COLOR_PREFIXES: [&str; 9] = [
    "from-", "via-", "to-", "shadow-", "bg-", "text-", "border-", "ring-", "fill-",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleToken(String);

/// A palette reference like `blue-600` or `blue-500/25`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorRef {
    pub family: String,
    /// `None` for shadeless colors (`white`, `black`).
    pub shade: Option<u16>,
    /// Opacity percentage from a `/NN` suffix.
    pub opacity: Option<u8>,
}

impl StyleToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Color references in the order they appear.
    pub fn colors(&self) -> Vec<ColorRef> {
        self.0.split_whitespace().filter_map(parse_color_word).collect()
    }

    /// First color reference, if any.
    pub fn primary_color(&self) -> Option<ColorRef> {
        self.colors().into_iter().next()
    }
}

impl From<&str> for StyleToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family)?;
        if let Some(shade) = self.shade {
            write!(f, "-{shade}")?;
        }
        if let Some(opacity) = self.opacity {
            write!(f, "/{opacity}")?;
        }
        Ok(())
    }
}

fn parse_color_word(word: &str) -> Option<ColorRef> {
    let body = COLOR_PREFIXES
        .iter()
        .find_map(|p| word.strip_prefix(p))?;

    let (color, opacity) = match body.split_once('/') {
        Some((color, op)) => (color, Some(op.parse::<u8>().ok()?)),
        None => (body, None),
    };

    if matches!(color, "white" | "black") {
        return Some(ColorRef {
            family: color.to_string(),
            shade: None,
            opacity,
        });
    }

    let (family, shade) = color.rsplit_once('-')?;
    if family.is_empty() || !family.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    let shade = shade.parse::<u16>().ok()?;

    Some(ColorRef {
        family: family.to_string(),
        shade: Some(shade),
        opacity,
    })
}
