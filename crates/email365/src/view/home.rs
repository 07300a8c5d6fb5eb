//! Signed-in home surfaces: the sorting banner and the first-run profile form.

use email365_core::QueryState;
use iced::widget::{Space, button, column, container, row, text, text_input, toggler};
use iced::{Alignment, Element, Length};

use crate::message::{Message, ProfileSetupMessage};
use crate::model::ProfileSetupState;
use crate::style;
use crate::style::widgets::{
    banner_style, card_style, input_style, page_style, palette, primary_button_style,
};

/// Banner above the inbox with the automatic sorting switch.
///
/// The switch shows the optimistic value and is disabled while a flip is
/// outstanding.
pub fn view_sorting_banner(
    active: &QueryState<bool>,
    pending: bool,
) -> Element<'static, Message> {
    let p = palette::current();

    let (is_on, headline, detail) = match active {
        QueryState::Loading => (false, "Checking sorting status...", ""),
        QueryState::Ready(true) => (
            true,
            "Automatic sorting is on",
            "New mail is filed into categories as it arrives.",
        ),
        QueryState::Ready(false) => (
            false,
            "Automatic sorting is off",
            "Turn it on to let Email365 organize incoming mail.",
        ),
    };

    let mut switch = toggler(is_on).size(22);
    if !pending && !active.is_loading() {
        switch = switch.on_toggle(|_| Message::ToggleSorting);
    }

    container(
        row![
            column![
                text(headline).size(15).font(style::semibold()).color(p.text_primary),
                text(detail).size(12).color(p.text_secondary),
            ]
            .spacing(2)
            .width(Length::Fill),
            switch,
        ]
        .align_y(Alignment::Center),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(banner_style(is_on))
    .into()
}

/// First-run form shown when no profile exists yet.
pub fn view_profile_setup(state: &ProfileSetupState) -> Element<'static, Message> {
    let p = palette::current();

    let name = text_input("Your name", &state.name)
        .padding([10, 14])
        .style(input_style)
        .on_input(|s| Message::ProfileSetup(ProfileSetupMessage::NameChanged(s)));

    let email = text_input("you@example.com", &state.email)
        .padding([10, 14])
        .style(input_style)
        .on_input(|s| Message::ProfileSetup(ProfileSetupMessage::EmailChanged(s)))
        .on_submit(Message::ProfileSetup(ProfileSetupMessage::Submit));

    let label = if state.is_saving { "Saving..." } else { "Continue" };
    let mut submit = button(text(label).size(15).font(style::semibold()))
        .padding([10, 24])
        .style(primary_button_style);
    if !state.is_saving {
        submit = submit.on_press(Message::ProfileSetup(ProfileSetupMessage::Submit));
    }

    let mut form = column![
        text("Welcome to Email365").size(26).font(style::bold()).color(p.text_primary),
        text("Tell us who you are to finish setting up.")
            .size(14)
            .color(p.text_secondary),
        Space::new().height(Length::Fixed(12.0)),
        text("Name").size(13).color(p.text_secondary),
        name,
        text("Email").size(13).color(p.text_secondary),
        email,
    ]
    .spacing(8);

    if let Some(error) = &state.error {
        form = form.push(text(error.clone()).size(13).color(p.accent_red));
    }

    form = form.push(Space::new().height(Length::Fixed(8.0)));
    form = form.push(submit);

    container(
        container(form)
            .padding(32)
            .max_width(440)
            .style(card_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(page_style)
    .into()
}
