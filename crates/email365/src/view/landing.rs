//! Public landing page shown before sign-in.

use iced::widget::{Row, Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::message::Message;
use crate::style;
use crate::style::widgets::{
    card_style, page_style, palette, primary_button_style, secondary_button_style,
};

const FEATURES: [(&str, &str); 3] = [
    (
        "Automatic sorting",
        "Incoming mail is filed into Priority, Social, Promotions and more.",
    ),
    (
        "Your categories",
        "Pick the categories you care about and add your own.",
    ),
    (
        "Quiet by default",
        "Choose which notifications reach you, and where.",
    ),
];

/// Renders the landing page.
pub fn view_landing() -> Element<'static, Message> {
    let p = palette::current();

    let title = text("Email365").size(44).font(style::bold()).color(p.primary);
    let tagline = text("Your inbox, sorted before you open it.")
        .size(20)
        .color(p.text_secondary);

    let sign_in = button(text("Sign in").size(16).font(style::semibold()))
        .padding([12, 28])
        .style(primary_button_style)
        .on_press(Message::Login);

    let demo = button(text("Try the demo").size(16))
        .padding([12, 28])
        .style(secondary_button_style)
        .on_press(Message::OpenDemo);

    let features =
        Row::with_children(FEATURES.iter().map(|(heading, body)| feature_card(heading, body)))
            .spacing(16);

    let content = column![
        title,
        tagline,
        Space::new().height(Length::Fixed(24.0)),
        row![sign_in, demo].spacing(12),
        Space::new().height(Length::Fixed(40.0)),
        features,
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .max_width(900);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(32)
        .style(page_style)
        .into()
}

fn feature_card(heading: &'static str, body: &'static str) -> Element<'static, Message> {
    let p = palette::current();

    container(
        column![
            text(heading).size(16).font(style::semibold()).color(p.text_primary),
            text(body).size(13).color(p.text_secondary),
        ]
        .spacing(6),
    )
    .padding(20)
    .width(Length::Fill)
    .style(card_style)
    .into()
}
