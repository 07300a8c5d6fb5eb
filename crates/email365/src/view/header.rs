//! Top bar: branding, search, list options and account actions.

use email365_core::{InboxFilter, SortKey};
use iced::widget::{Row, Space, button, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::message::{Message, Page};
use crate::style;
use crate::style::widgets::{
    chip_style, ghost_button_style, header_style, input_style, palette, secondary_button_style,
};

/// Who the header is rendered for.
pub enum HeaderMode<'a> {
    /// Signed-in shell; carries the principal.
    Signed(&'a str),
    /// Anonymous demo inbox.
    Demo,
}

/// Renders the header.
pub fn view_header(filter: &InboxFilter, mode: &HeaderMode<'_>) -> Element<'static, Message> {
    let p = palette::current();

    let title = text("Email365").size(22).font(style::bold()).color(p.primary);

    let search = text_input("Search subject or sender...", &filter.search)
        .width(Length::Fixed(280.0))
        .padding([8, 14])
        .style(input_style)
        .on_input(Message::SearchChanged);

    let unread_chip = button(text("Unread").size(12))
        .padding([6, 12])
        .style(chip_style(filter.unread_only))
        .on_press(Message::ToggleUnreadOnly);

    let sort_chips = Row::with_children(SortKey::ALL.iter().map(|&key| {
        button(text(key.display_name()).size(12))
            .padding([6, 12])
            .style(chip_style(filter.sort == key))
            .on_press(Message::SortChanged(key))
            .into()
    }))
    .spacing(4);

    let actions: Element<'static, Message> = match mode {
        HeaderMode::Signed(principal) => row![
            text(principal.to_string()).size(12).color(p.text_muted),
            icon_button("?", Message::NavigateTo(Page::Help)),
            icon_button("\u{2699}", Message::NavigateTo(Page::Settings)),
            button(text("Sign out").size(13))
                .padding([6, 14])
                .style(secondary_button_style)
                .on_press(Message::Logout),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into(),
        HeaderMode::Demo => row![
            text("Demo").size(12).font(style::semibold()).color(p.accent_orange),
            button(text("Exit demo").size(13))
                .padding([6, 14])
                .style(secondary_button_style)
                .on_press(Message::CloseDemo),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into(),
    };

    container(
        row![
            title,
            Space::new().width(Length::Fixed(24.0)),
            search,
            unread_chip,
            text("Sort").size(12).color(p.text_muted),
            sort_chips,
            Space::new().width(Length::Fill),
            actions,
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(header_style)
    .into()
}

fn icon_button(icon: &'static str, message: Message) -> Element<'static, Message> {
    button(text(icon).size(18))
        .padding([4, 10])
        .style(ghost_button_style)
        .on_press(message)
        .into()
}
