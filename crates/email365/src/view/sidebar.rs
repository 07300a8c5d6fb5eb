//! Category sidebar.

use email365_core::EmailCategory;
use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::message::Message;
use crate::style;
use crate::style::widgets::{
    category_button_selected_style, category_button_style, count_badge_style, palette,
    scrollable_style, sidebar_style,
};

/// Renders the category list with unread counts.
pub fn view_sidebar(
    selected: EmailCategory,
    unread: &[(EmailCategory, usize)],
) -> Element<'static, Message> {
    let p = palette::current();

    let header = container(
        text("CATEGORIES")
            .size(11)
            .font(style::bold())
            .color(p.text_muted),
    )
    .padding([12, 16]);

    let items = Column::with_children(EmailCategory::ALL.iter().map(|&category| {
        let count = unread
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n);
        view_category_item(category, count, category == selected)
    }))
    .spacing(2)
    .padding([0, 8]);

    container(
        column![
            header,
            scrollable(items)
                .height(Length::Fill)
                .style(scrollable_style),
        ],
    )
    .width(Length::Fixed(210.0))
    .height(Length::Fill)
    .style(sidebar_style)
    .into()
}

fn view_category_item(
    category: EmailCategory,
    unread: usize,
    is_selected: bool,
) -> Element<'static, Message> {
    let p = palette::current();

    let dot = container(
        Space::new()
            .width(Length::Fixed(8.0))
            .height(Length::Fixed(8.0)),
    )
    .style(move |_theme| container::Style {
        background: Some(palette::current().category(category).into()),
        border: iced::Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    });

    let name = text(category.display_name())
        .size(14)
        .font(if unread > 0 {
            style::semibold()
        } else {
            iced::Font::DEFAULT
        })
        .color(if is_selected { p.primary } else { p.text_primary });

    let mut content = row![dot, name].spacing(10).align_y(Alignment::Center);

    if unread > 0 {
        content = content.push(Space::new().width(Length::Fill));
        content = content.push(
            container(text(unread.to_string()).size(11).font(style::bold()))
                .padding([1, 7])
                .style(count_badge_style),
        );
    }

    button(content.width(Length::Fill))
        .width(Length::Fill)
        .padding([9, 12])
        .style(if is_selected {
            category_button_selected_style
        } else {
            category_button_style
        })
        .on_press(Message::SelectCategory(category))
        .into()
}
