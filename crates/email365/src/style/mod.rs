//! Styling and theming for the application.

pub mod widgets;

use iced::Font;
use iced::font::Weight;

/// Default font at the given weight.
pub const fn weight(weight: Weight) -> Font {
    Font {
        weight,
        ..Font::DEFAULT
    }
}

/// Bold default font.
pub const fn bold() -> Font {
    weight(Weight::Bold)
}

/// Semibold default font.
pub const fn semibold() -> Font {
    weight(Weight::Semibold)
}
