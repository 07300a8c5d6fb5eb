//! Button style functions.

use iced::widget::button;
use iced::{Background, Border, Color};

use super::palette::{self, Palette};
use super::shadows::{self, radius};

/// Filled brand button.
pub fn primary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(p.primary)),
        text_color: p.text_on_primary,
        border: Border {
            color: p.primary_dark,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::glow(p.primary),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.primary_light)),
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.primary_dark)),
            shadow: shadows::subtle(),
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(p.text_muted)),
            text_color: p.surface,
            shadow: shadows::none(),
            ..base
        },
    }
}

/// Outlined button for secondary actions.
pub fn secondary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_primary,
        border: Border {
            color: p.border_medium,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    hover_states(&p, base, status)
}

/// Borderless button for icons and inline links.
pub fn ghost_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_secondary,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    hover_states(&p, base, status)
}

/// Sidebar category entry.
pub fn category_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_primary,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    hover_states(&p, base, status)
}

/// Sidebar category entry that is currently open.
pub fn category_button_selected_style(
    _theme: &iced::Theme,
    status: button::Status,
) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(p.selected)),
        text_color: p.primary,
        border: Border {
            color: p.selected_border,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            ..base
        },
        _ => base,
    }
}

/// Row in the message list.
pub fn message_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_primary,
        border: Border::default(),
        shadow: shadows::none(),
        snap: false,
    };

    hover_states(&p, base, status)
}

/// Rounded chip, filled when `active`.
pub fn chip_style(active: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let p = palette::current();

        let base = if active {
            button::Style {
                background: Some(Background::Color(palette::with_alpha(p.primary, 0.15))),
                text_color: p.primary,
                border: Border {
                    color: p.primary,
                    width: 1.0,
                    radius: radius::PILL.into(),
                },
                shadow: shadows::none(),
                snap: false,
            }
        } else {
            button::Style {
                background: Some(Background::Color(p.surface_sunken)),
                text_color: p.text_secondary,
                border: Border {
                    color: p.border_subtle,
                    width: 1.0,
                    radius: radius::PILL.into(),
                },
                shadow: shadows::none(),
                snap: false,
            }
        };

        match status {
            button::Status::Hovered if !active => button::Style {
                background: Some(Background::Color(p.hover)),
                ..base
            },
            button::Status::Disabled => button::Style {
                text_color: p.text_muted,
                ..base
            },
            _ => base,
        }
    }
}

/// Destructive action, e.g. removing a category.
pub fn danger_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.accent_red,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::SMALL.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::with_alpha(p.accent_red, 0.12))),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: p.text_muted,
            ..base
        },
        button::Status::Active => base,
    }
}

fn hover_states(p: &Palette, base: button::Style, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.selected)),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: p.text_muted,
            ..base
        },
    }
}
