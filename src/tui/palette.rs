//! Map theme style tokens onto terminal colors.

use ratatui::style::Color;
use ratatui::style::palette::tailwind::{self, Palette};

use crate::theme::{ColorRef, ThemeConfig};

/// Colors used to draw the chrome of one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    /// Borders and titles (gradient start).
    pub accent: Color,
    /// Highlights (gradient end).
    pub highlight: Color,
    /// Secondary text (shadow color).
    pub muted: Color,
}

impl Chrome {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let gradient = theme.logo_gradient.colors();
        let accent = gradient.first().and_then(to_color).unwrap_or(Color::Cyan);
        let highlight = gradient.last().and_then(to_color).unwrap_or(accent);
        let muted = theme
            .logo_shadow
            .primary_color()
            .as_ref()
            .and_then(to_color)
            .unwrap_or(Color::Gray);
        Self {
            accent,
            highlight,
            muted,
        }
    }
}

fn family(name: &str) -> Option<Palette> {
    let palette = match name {
        "slate" => tailwind::SLATE,
        "gray" => tailwind::GRAY,
        "zinc" => tailwind::ZINC,
        "neutral" => tailwind::NEUTRAL,
        "stone" => tailwind::STONE,
        "red" => tailwind::RED,
        "orange" => tailwind::ORANGE,
        "amber" => tailwind::AMBER,
        "yellow" => tailwind::YELLOW,
        "lime" => tailwind::LIME,
        "green" => tailwind::GREEN,
        "emerald" => tailwind::EMERALD,
        "teal" => tailwind::TEAL,
        "cyan" => tailwind::CYAN,
        "sky" => tailwind::SKY,
        "blue" => tailwind::BLUE,
        "indigo" => tailwind::INDIGO,
        "violet" => tailwind::VIOLET,
        "purple" => tailwind::PURPLE,
        "fuchsia" => tailwind::FUCHSIA,
        "pink" => tailwind::PINK,
        "rose" => tailwind::ROSE,
        _ => return None,
    };
    Some(palette)
}

/// Resolve a color reference to a terminal color. Opacity is ignored.
pub fn to_color(color: &ColorRef) -> Option<Color> {
    match (color.family.as_str(), color.shade) {
        ("white", None) => return Some(Color::White),
        ("black", None) => return Some(Color::Black),
        _ => {}
    }
    let p = family(&color.family)?;
    let c = match color.shade? {
        50 => p.c50,
        100 => p.c100,
        200 => p.c200,
        300 => p.c300,
        400 => p.c400,
        500 => p.c500,
        600 => p.c600,
        700 => p.c700,
        800 => p.c800,
        900 => p.c900,
        950 => p.c950,
        _ => return None,
    };
    Some(c)
}
