//! Color palette with light and dark theme support.

use email365_core::{EmailCategory, NoticeLevel, ThemePreference};
use iced::Color;

/// Complete color palette for the application.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    // Brand
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Surfaces
    pub surface: Color,
    pub surface_elevated: Color,
    pub surface_sunken: Color,
    pub background: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    // Accents
    pub accent_green: Color,
    pub accent_yellow: Color,
    pub accent_red: Color,
    pub accent_blue: Color,
    pub accent_purple: Color,
    pub accent_orange: Color,

    // States
    pub selected: Color,
    pub selected_border: Color,
    pub hover: Color,
    pub unread: Color,

    // Borders
    pub border_subtle: Color,
    pub border_medium: Color,

    // Shadows
    pub shadow: Color,
    pub shadow_medium: Color,
}

impl Palette {
    /// Light palette: white surfaces with an indigo brand color.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.31, 0.27, 0.90),
            primary_light: Color::from_rgb(0.45, 0.42, 0.96),
            primary_dark: Color::from_rgb(0.22, 0.19, 0.72),

            surface: Color::WHITE,
            surface_elevated: Color::WHITE,
            surface_sunken: Color::from_rgb(0.96, 0.96, 0.98),
            background: Color::from_rgb(0.975, 0.975, 0.985),

            text_primary: Color::from_rgb(0.07, 0.09, 0.15),
            text_secondary: Color::from_rgb(0.39, 0.43, 0.51),
            text_muted: Color::from_rgb(0.58, 0.62, 0.69),
            text_on_primary: Color::WHITE,

            accent_green: Color::from_rgb(0.06, 0.62, 0.35),
            accent_yellow: Color::from_rgb(0.85, 0.62, 0.02),
            accent_red: Color::from_rgb(0.86, 0.15, 0.15),
            accent_blue: Color::from_rgb(0.15, 0.39, 0.92),
            accent_purple: Color::from_rgb(0.58, 0.20, 0.92),
            accent_orange: Color::from_rgb(0.92, 0.35, 0.05),

            selected: Color::from_rgb(0.93, 0.93, 1.0),
            selected_border: Color::from_rgb(0.31, 0.27, 0.90),
            hover: Color::from_rgb(0.97, 0.97, 0.99),
            unread: Color::from_rgb(0.31, 0.27, 0.90),

            border_subtle: Color::from_rgb(0.90, 0.91, 0.93),
            border_medium: Color::from_rgb(0.82, 0.84, 0.87),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.10),
        }
    }

    /// Dark palette: slate surfaces with a lighter indigo.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(0.51, 0.55, 0.97),
            primary_light: Color::from_rgb(0.65, 0.69, 0.99),
            primary_dark: Color::from_rgb(0.39, 0.40, 0.95),

            surface: Color::from_rgb(0.12, 0.16, 0.23),
            surface_elevated: Color::from_rgb(0.15, 0.19, 0.27),
            surface_sunken: Color::from_rgb(0.09, 0.12, 0.18),
            background: Color::from_rgb(0.06, 0.09, 0.16),

            text_primary: Color::from_rgb(0.95, 0.96, 0.98),
            text_secondary: Color::from_rgb(0.69, 0.73, 0.80),
            text_muted: Color::from_rgb(0.49, 0.54, 0.62),
            text_on_primary: Color::from_rgb(0.06, 0.09, 0.16),

            accent_green: Color::from_rgb(0.20, 0.83, 0.60),
            accent_yellow: Color::from_rgb(0.98, 0.80, 0.08),
            accent_red: Color::from_rgb(0.97, 0.44, 0.44),
            accent_blue: Color::from_rgb(0.38, 0.65, 0.98),
            accent_purple: Color::from_rgb(0.75, 0.52, 0.99),
            accent_orange: Color::from_rgb(0.98, 0.57, 0.24),

            selected: Color::from_rgb(0.19, 0.20, 0.36),
            selected_border: Color::from_rgb(0.51, 0.55, 0.97),
            hover: Color::from_rgb(0.16, 0.20, 0.29),
            unread: Color::from_rgb(0.51, 0.55, 0.97),

            border_subtle: Color::from_rgb(0.20, 0.25, 0.33),
            border_medium: Color::from_rgb(0.28, 0.33, 0.41),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
        }
    }

    /// Palette for a theme preference.
    #[must_use]
    pub const fn for_mode(mode: ThemePreference) -> Self {
        match mode {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    /// Accent used for a category's badge and sidebar dot.
    #[must_use]
    pub const fn category(&self, category: EmailCategory) -> Color {
        match category {
            EmailCategory::Inbox => self.primary,
            EmailCategory::Priority => self.accent_red,
            EmailCategory::Social => self.accent_blue,
            EmailCategory::Promotions => self.accent_orange,
            EmailCategory::Updates => self.accent_green,
            EmailCategory::Forums => self.accent_purple,
            EmailCategory::Spam => self.accent_yellow,
            EmailCategory::Archive => self.text_muted,
        }
    }

    /// Accent for a toast.
    #[must_use]
    pub const fn notice(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Success => self.accent_green,
            NoticeLevel::Error => self.accent_red,
            NoticeLevel::Info => self.accent_blue,
        }
    }
}

/// Active palette. Style closures read it at draw time.
static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::dark()));

/// Switch the active palette.
pub fn set_theme(mode: ThemePreference) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// A copy of the active palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::dark(), |p| *p)
}

/// Same color with a different alpha.
#[must_use]
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::from_rgba(color.r, color.g, color.b, alpha)
}
