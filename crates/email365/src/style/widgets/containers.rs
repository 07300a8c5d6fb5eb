//! Container style functions.

use email365_core::{EmailCategory, NoticeLevel};
use iced::widget::container;
use iced::{Background, Border};

use super::palette;
use super::shadows::{self, radius};

/// Whole-window background.
pub fn page_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.background)),
        text_color: Some(p.text_primary),
        ..Default::default()
    }
}

/// Top bar.
pub fn header_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Category sidebar.
pub fn sidebar_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Message list and preview panes.
pub fn pane_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Bordered card on the page background.
pub fn card_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface_elevated)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::LARGE.into(),
        },
        shadow: shadows::subtle(),
        ..Default::default()
    }
}

/// Highlighted row in the message list.
pub fn message_row_selected_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.selected)),
        border: Border {
            color: p.selected_border,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Divider under each message row.
pub fn divider_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.border_subtle)),
        ..Default::default()
    }
}

/// Small colored pill showing a category.
pub fn category_badge_style(
    category: EmailCategory,
) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let p = palette::current();
        let accent = p.category(category);

        container::Style {
            background: Some(Background::Color(palette::with_alpha(accent, 0.15))),
            text_color: Some(accent),
            border: Border {
                color: palette::with_alpha(accent, 0.4),
                width: 1.0,
                radius: radius::PILL.into(),
            },
            ..Default::default()
        }
    }
}

/// Counter badge in the sidebar.
pub fn count_badge_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.primary)),
        text_color: Some(p.text_on_primary),
        border: Border {
            radius: radius::PILL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Floating toast with a colored edge.
pub fn toast_style(level: NoticeLevel) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let p = palette::current();

        container::Style {
            background: Some(Background::Color(p.surface_elevated)),
            text_color: Some(p.text_primary),
            border: Border {
                color: p.notice(level),
                width: 1.5,
                radius: radius::MEDIUM.into(),
            },
            shadow: shadows::raised(),
            ..Default::default()
        }
    }
}

/// Banner on the home view announcing the sorting state.
pub fn banner_style(active: bool) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let p = palette::current();
        let accent = if active { p.accent_green } else { p.text_muted };

        container::Style {
            background: Some(Background::Color(palette::with_alpha(accent, 0.10))),
            border: Border {
                color: palette::with_alpha(accent, 0.5),
                width: 1.0,
                radius: radius::LARGE.into(),
            },
            ..Default::default()
        }
    }
}
