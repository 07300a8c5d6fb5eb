//! Shadow presets and corner radii.

use iced::{Color, Shadow, Vector};

use super::palette;

/// Corner radii.
pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SMALL: f32 = 4.0;
    pub const MEDIUM: f32 = 8.0;
    pub const LARGE: f32 = 12.0;
    pub const PILL: f32 = 9999.0;
}

pub fn none() -> Shadow {
    Shadow::default()
}

pub fn subtle() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 1.0),
        blur_radius: 3.0,
    }
}

pub fn raised() -> Shadow {
    Shadow {
        color: palette::current().shadow_medium,
        offset: Vector::new(0.0, 6.0),
        blur_radius: 18.0,
    }
}

/// Colored halo behind primary buttons.
pub const fn glow(color: Color) -> Shadow {
    Shadow {
        color: palette::with_alpha(color, 0.3),
        offset: Vector::new(0.0, 2.0),
        blur_radius: 10.0,
    }
}
