// crates/tui/src/theme.rs
//! Terminal colors and card accents

use mentorscroll_config::ColorScheme;
use mentorscroll_core::ColorTheme;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeType {
    pub fn all() -> Vec<ThemeType> {
        vec![ThemeType::Dark, ThemeType::Light, ThemeType::HighContrast]
    }

    pub fn name(&self) -> &str {
        match self {
            ThemeType::Dark => "Dark",
            ThemeType::Light => "Light",
            ThemeType::HighContrast => "High Contrast",
        }
    }

    pub fn next(&self) -> ThemeType {
        match self {
            ThemeType::Dark => ThemeType::Light,
            ThemeType::Light => ThemeType::HighContrast,
            ThemeType::HighContrast => ThemeType::Dark,
        }
    }
}

impl From<ColorScheme> for ThemeType {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Auto | ColorScheme::Dark => ThemeType::Dark,
            ColorScheme::Light => ThemeType::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    pub text: Color,
    pub text_secondary: Color,
    pub highlight: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::HighContrast => Self::high_contrast(),
        }
    }

    fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            text: Color::White,
            text_secondary: Color::Gray,
            highlight: Color::Yellow,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::Gray,
        }
    }

    fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            text: Color::Black,
            text_secondary: Color::DarkGray,
            highlight: Color::Blue,
            accent: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
        }
    }

    fn high_contrast() -> Self {
        Self {
            theme_type: ThemeType::HighContrast,
            text: Color::White,
            text_secondary: Color::LightYellow,
            highlight: Color::LightYellow,
            accent: Color::LightCyan,
            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,
            border: Color::White,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_color(&self) -> Color {
        self.border
    }

    /// Border color for a card, taken from the first stop of its gradient
    ///
    /// High contrast ignores card palettes.
    pub fn card_accent(&self, gradient: &ColorTheme) -> Color {
        if self.theme_type == ThemeType::HighContrast {
            return self.accent;
        }
        palette_color(&gradient.from).unwrap_or(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Approximates a `hue-shade` palette name such as `purple-600`
///
/// Shades of 500 and up map to the normal color, lighter shades to the
/// light variant. Unknown hues return `None`.
pub fn palette_color(name: &str) -> Option<Color> {
    let (hue, shade) = match name.rsplit_once('-') {
        Some((hue, shade)) => (hue, shade.parse::<u16>().ok()?),
        None => (name, 500),
    };
    let light = shade < 500;

    let color = match (hue, light) {
        ("red" | "rose", false) => Color::Red,
        ("red" | "rose", true) => Color::LightRed,
        ("orange" | "amber" | "yellow", false) => Color::Yellow,
        ("orange" | "amber" | "yellow", true) => Color::LightYellow,
        ("green" | "emerald" | "lime", false) => Color::Green,
        ("green" | "emerald" | "lime", true) => Color::LightGreen,
        ("teal" | "cyan" | "sky", false) => Color::Cyan,
        ("teal" | "cyan" | "sky", true) => Color::LightCyan,
        ("blue" | "indigo", false) => Color::Blue,
        ("blue" | "indigo", true) => Color::LightBlue,
        ("purple" | "violet" | "pink" | "fuchsia", false) => Color::Magenta,
        ("purple" | "violet" | "pink" | "fuchsia", true) => Color::LightMagenta,
        ("gray" | "slate" | "zinc", false) => Color::DarkGray,
        ("gray" | "slate" | "zinc", true) => Color::Gray,
        _ => return None,
    };
    Some(color)
}
