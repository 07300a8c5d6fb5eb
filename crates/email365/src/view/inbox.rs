//! Message list and preview panes.

use chrono::{DateTime, Local};
use email365_core::{EmailCategory, InboxFilter, InboxSnapshot, Message as Email};
use iced::widget::{Column, Row, Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::message::Message;
use crate::model::{PreviewAction, format_full, format_received};
use crate::style;
use crate::style::widgets::{
    category_badge_style, chip_style, divider_style, ghost_button_style, message_button_style,
    message_row_selected_style, palette, pane_style, scrollable_style, secondary_button_style,
};

/// Width of the message list pane.
const LIST_WIDTH: f32 = 380.0;

/// Renders the message list for the current filter.
pub fn view_message_list(
    snapshot: &InboxSnapshot,
    filter: &InboxFilter,
    now: &DateTime<Local>,
) -> Element<'static, Message> {
    if snapshot.is_loading() {
        return placeholder("\u{23F3}", "Loading messages...".to_string());
    }

    let messages = snapshot.messages();
    if messages.is_empty() {
        let reason = if filter.search.is_empty() && !filter.unread_only {
            format!("No messages in {}", filter.category.display_name())
        } else {
            "No messages match your filters".to_string()
        };
        return placeholder("\u{1F4ED}", reason);
    }

    let selected = snapshot.selected().map(|m| &m.id);
    let rows = Column::with_children(messages.iter().map(|message| {
        column![
            view_message_row(message, selected == Some(&message.id), now),
            container(Space::new().height(Length::Fixed(1.0)))
                .width(Length::Fill)
                .style(divider_style),
        ]
        .into()
    }));

    container(scrollable(rows).height(Length::Fill).style(scrollable_style))
        .width(Length::Fixed(LIST_WIDTH))
        .height(Length::Fill)
        .style(pane_style)
        .into()
}

fn view_message_row(
    message: &Email,
    is_selected: bool,
    now: &DateTime<Local>,
) -> Element<'static, Message> {
    let p = palette::current();
    let unread = !message.is_read;

    let sender = text(message.sender.clone())
        .size(14)
        .font(if unread {
            style::bold()
        } else {
            iced::Font::DEFAULT
        })
        .color(p.text_primary);

    let mut marks = String::new();
    if message.is_starred {
        marks.push('\u{2605}');
    }
    if message.has_attachments {
        marks.push('\u{1F4CE}');
    }

    let top = row![
        sender,
        Space::new().width(Length::Fill),
        text(marks).size(12).color(p.accent_yellow),
        text(format_received(message.timestamp, now))
            .size(12)
            .color(p.text_muted),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let subject = text(message.subject.clone())
        .size(13)
        .font(if unread {
            style::semibold()
        } else {
            iced::Font::DEFAULT
        })
        .color(if unread { p.text_primary } else { p.text_secondary });

    let snippet = text(message.snippet.clone()).size(12).color(p.text_muted);

    let body = column![top, subject, snippet].spacing(3);

    let indicator = container(Space::new().width(Length::Fixed(3.0)).height(Length::Fill))
        .height(Length::Fixed(52.0))
        .style(move |_theme| {
            let p = palette::current();
            container::Style {
                background: unread.then(|| p.unread.into()),
                ..Default::default()
            }
        });

    let content = row![indicator, body.width(Length::Fill)].spacing(10);

    let entry = button(content)
        .width(Length::Fill)
        .padding([10, 12])
        .style(message_button_style)
        .on_press(Message::SelectMessage(message.id.clone()));

    if is_selected {
        container(entry)
            .width(Length::Fill)
            .style(message_row_selected_style)
            .into()
    } else {
        entry.into()
    }
}

/// Renders the preview of the selected message.
///
/// With `can_move`, the message can be refiled into another category.
pub fn view_preview(selected: Option<&Email>, can_move: bool) -> Element<'static, Message> {
    let Some(message) = selected else {
        return container(
            text("Select a message to read it")
                .size(14)
                .color(palette::current().text_muted),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(pane_style)
        .into();
    };

    let p = palette::current();

    let close = button(text("\u{2715}").size(14))
        .padding([4, 8])
        .style(ghost_button_style)
        .on_press(Message::ClearSelection);

    let header = column![
        row![
            text(message.subject.clone())
                .size(22)
                .font(style::semibold())
                .color(p.text_primary)
                .width(Length::Fill),
            close,
        ]
        .align_y(Alignment::Center),
        row![
            text(message.sender.clone()).size(14).color(p.text_secondary),
            category_badge(message.category),
            Space::new().width(Length::Fill),
            text(format_full(message.timestamp, &Local))
                .size(12)
                .color(p.text_muted),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    ]
    .spacing(8);

    let mut content =
        column![header, action_bar(), text(message.snippet.clone()).size(15)].spacing(20);

    if can_move {
        content = content.push(move_bar(message));
    }

    container(scrollable(content.padding(24)).style(scrollable_style))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(pane_style)
        .into()
}

fn action_bar() -> Element<'static, Message> {
    row![
        Row::with_children(
            PreviewAction::TOOLBAR
                .iter()
                .map(|&a| action_button(a, secondary_button_style))
        )
        .spacing(6),
        Space::new().width(Length::Fill),
        Row::with_children(
            PreviewAction::MORE
                .iter()
                .map(|&a| action_button(a, ghost_button_style))
        )
        .spacing(4),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn action_button(
    action: PreviewAction,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> Element<'static, Message> {
    button(text(action.label()).size(12))
        .padding([5, 10])
        .style(style)
        .on_press(Message::PreviewAction(action))
        .into()
}

fn move_bar(message: &Email) -> Element<'static, Message> {
    let p = palette::current();

    let targets = Row::with_children(
        EmailCategory::ALL
            .iter()
            .filter(|&&c| c != message.category)
            .map(|&category| {
                button(text(category.display_name()).size(12))
                    .padding([5, 11])
                    .style(chip_style(false))
                    .on_press(Message::MoveMessage(message.id.clone(), category))
                    .into()
            }),
    )
    .spacing(6)
    .wrap();

    column![text("Move to").size(12).color(p.text_muted), targets]
        .spacing(8)
        .into()
}

fn category_badge(category: EmailCategory) -> Element<'static, Message> {
    container(text(category.display_name()).size(11).font(style::semibold()))
        .padding([2, 8])
        .style(category_badge_style(category))
        .into()
}

fn placeholder(icon: &'static str, label: String) -> Element<'static, Message> {
    let p = palette::current();

    container(
        column![
            text(icon).size(40),
            text(label).size(15).color(p.text_secondary)
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fixed(LIST_WIDTH))
    .height(Length::Fill)
    .center_x(Length::Fixed(LIST_WIDTH))
    .center_y(Length::Fill)
    .style(pane_style)
    .into()
}
