//! Toast overlay in the bottom-right corner.

use iced::widget::{Column, button, container, row, text};
use iced::{Alignment, Element, Length};

use crate::message::Message;
use crate::model::Toasts;
use crate::style::widgets::{ghost_button_style, palette, toast_style};

/// Renders the visible toasts, newest at the bottom.
pub fn view_toasts(toasts: &Toasts) -> Element<'static, Message> {
    let items = Column::with_children(toasts.iter().enumerate().map(|(index, toast)| {
        let p = palette::current();
        let level = toast.notice.level;

        container(
            row![
                text(toast.notice.text.clone())
                    .size(13)
                    .color(p.notice(level))
                    .width(Length::Fill),
                button(text("\u{2715}").size(11))
                    .padding([2, 6])
                    .style(ghost_button_style)
                    .on_press(Message::DismissToast(index)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .padding([10, 14])
        .width(Length::Fixed(340.0))
        .style(toast_style(level))
        .into()
    }))
    .spacing(8);

    container(items)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_right(Length::Fill)
        .align_bottom(Length::Fill)
        .padding(20)
        .into()
}
