//! Settings screen with General, Categories, Notifications and Appearance tabs.

use email365_core::{ProfileDraft, QueryState, SuggestedCategory, ThemePreference};
use iced::widget::{
    Column, Row, Space, button, column, container, row, scrollable, text, text_input, toggler,
};
use iced::{Alignment, Element, Length};

use crate::message::{Message, SettingsMessage};
use crate::model::{SettingsState, SettingsTab};
use crate::style;
use crate::style::widgets::{
    card_style, chip_style, danger_button_style, input_style, palette, primary_button_style,
    scrollable_style, secondary_button_style,
};

/// Everything the settings screen shows besides its own tab state.
pub struct SettingsContext {
    /// Local values of the profile form.
    pub draft: ProfileDraft,
    pub saving_name: bool,
    pub saving_email: bool,
    /// Whether a profile has been loaded; the form is read-only until then.
    pub has_profile: bool,
    /// Local preferred category set.
    pub preferred: Vec<String>,
    pub categories_saving: bool,
    pub suggested: QueryState<Vec<SuggestedCategory>>,
    pub theme: ThemePreference,
    /// Optimistic link state.
    pub account_linked: QueryState<bool>,
    pub link_pending: bool,
}

/// Renders the settings view.
pub fn view_settings(state: &SettingsState, ctx: &SettingsContext) -> Element<'static, Message> {
    let p = palette::current();

    let tabs = Row::with_children(SettingsTab::ALL.iter().map(|&tab| {
        button(text(tab.label()).size(14))
            .padding([8, 16])
            .style(if tab == state.tab {
                primary_button_style
            } else {
                secondary_button_style
            })
            .on_press(Message::Settings(SettingsMessage::SelectTab(tab)))
            .into()
    }))
    .spacing(6);

    let section = match state.tab {
        SettingsTab::General => view_general(ctx),
        SettingsTab::Categories => view_categories(state, ctx),
        SettingsTab::Notifications => view_notifications(ctx),
        SettingsTab::Appearance => view_appearance(ctx),
        SettingsTab::Privacy => view_privacy(),
    };

    let layout = column![
        text("Settings").size(28).font(style::bold()).color(p.text_primary),
        tabs,
        Space::new().height(Length::Fixed(8.0)),
        container(section)
            .padding(24)
            .width(Length::Fill)
            .style(card_style),
    ]
    .spacing(16)
    .padding(24)
    .max_width(760);

    scrollable(layout)
        .height(Length::Fill)
        .width(Length::Fill)
        .style(scrollable_style)
        .into()
}

fn view_general(ctx: &SettingsContext) -> Element<'static, Message> {
    let p = palette::current();

    let mut name = text_input("Your name", &ctx.draft.name)
        .padding([10, 14])
        .style(input_style);
    let mut email = text_input("you@example.com", &ctx.draft.email)
        .padding([10, 14])
        .style(input_style);
    if ctx.has_profile {
        name = name.on_input(|s| Message::Settings(SettingsMessage::NameChanged(s)));
        email = email.on_input(|s| Message::Settings(SettingsMessage::EmailChanged(s)));
    }

    column![
        section_title("Profile"),
        text("Changes are saved automatically after you stop typing.")
            .size(12)
            .color(p.text_muted),
        Space::new().height(Length::Fixed(8.0)),
        field("Name", name.into(), ctx.saving_name),
        field("Email", email.into(), ctx.saving_email),
    ]
    .spacing(10)
    .into()
}

fn field(
    label: &'static str,
    input: Element<'static, Message>,
    saving: bool,
) -> Element<'static, Message> {
    let p = palette::current();

    let mut heading = row![text(label).size(13).color(p.text_secondary)].spacing(8);
    if saving {
        heading = heading.push(text("Saving...").size(12).color(p.primary));
    }

    column![heading, input].spacing(6).into()
}

fn view_categories(state: &SettingsState, ctx: &SettingsContext) -> Element<'static, Message> {
    let p = palette::current();

    let selected: Element<'static, Message> = if ctx.preferred.is_empty() {
        text("No categories selected yet.")
            .size(13)
            .color(p.text_muted)
            .into()
    } else {
        Row::with_children(ctx.preferred.iter().map(|name| {
            container(
                row![
                    text(name.clone()).size(13),
                    button(text("\u{2715}").size(11))
                        .padding([0, 4])
                        .style(danger_button_style)
                        .on_press_maybe((!ctx.categories_saving).then(|| {
                            Message::Settings(SettingsMessage::RemoveCategory(name.clone()))
                        })),
                ]
                .spacing(6)
                .align_y(Alignment::Center),
            )
            .padding([4, 10])
            .style(|_theme| {
                let p = palette::current();
                container::Style {
                    background: Some(palette::with_alpha(p.primary, 0.12).into()),
                    text_color: Some(p.primary),
                    border: iced::Border {
                        radius: style::widgets::radius::PILL.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .into()
        }))
        .spacing(8)
        .wrap()
        .into()
    };

    let input = text_input("Add a custom category", &state.category_input)
        .padding([8, 12])
        .style(input_style)
        .on_input(|s| Message::Settings(SettingsMessage::CategoryInputChanged(s)))
        .on_submit(Message::Settings(SettingsMessage::AddCategory));

    let add = button(text("Add").size(13))
        .padding([8, 16])
        .style(primary_button_style)
        .on_press(Message::Settings(SettingsMessage::AddCategory));

    let suggestions: Element<'static, Message> = match &ctx.suggested {
        QueryState::Loading => text("Loading suggestions...")
            .size(13)
            .color(p.text_muted)
            .into(),
        QueryState::Ready(list) => Column::with_children(
            list.iter()
                .filter(|s| !ctx.preferred.contains(&s.name))
                .map(view_suggestion),
        )
        .spacing(8)
        .into(),
    };

    column![
        section_title("Your categories"),
        selected,
        Space::new().height(Length::Fixed(8.0)),
        row![input.width(Length::Fill), add].spacing(8),
        Space::new().height(Length::Fixed(16.0)),
        section_title("Suggested"),
        suggestions,
    ]
    .spacing(10)
    .into()
}

fn view_suggestion(suggestion: &SuggestedCategory) -> Element<'static, Message> {
    let p = palette::current();

    row![
        column![
            text(suggestion.name.clone())
                .size(14)
                .font(style::semibold())
                .color(p.text_primary),
            text(suggestion.description.clone())
                .size(12)
                .color(p.text_secondary),
        ]
        .spacing(2)
        .width(Length::Fill),
        button(text("+ Add").size(12))
            .padding([5, 12])
            .style(chip_style(false))
            .on_press(Message::Settings(SettingsMessage::AddSuggested(
                suggestion.name.clone()
            ))),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn view_notifications(ctx: &SettingsContext) -> Element<'static, Message> {
    let settings = ctx.draft.notifications;

    let mut email = toggler(settings.email_notifications)
        .label("Email notifications")
        .text_size(14);
    let mut push = toggler(settings.push_notifications)
        .label("Push notifications")
        .text_size(14);
    if ctx.has_profile {
        email = email.on_toggle(|on| Message::Settings(SettingsMessage::EmailNotifications(on)));
        push = push.on_toggle(|on| Message::Settings(SettingsMessage::PushNotifications(on)));
    }

    column![
        section_title("Notifications"),
        email,
        hint("A daily summary and alerts for Priority mail."),
        Space::new().height(Length::Fixed(8.0)),
        push,
        hint("Instant alerts on this device."),
    ]
    .spacing(8)
    .into()
}

fn view_appearance(ctx: &SettingsContext) -> Element<'static, Message> {
    let is_dark = ctx.theme == ThemePreference::Dark;

    let theme = toggler(is_dark)
        .label(if is_dark { "Dark mode" } else { "Light mode" })
        .text_size(14)
        .on_toggle(|_| Message::Settings(SettingsMessage::ToggleTheme));

    let (linked, link_label) = match ctx.account_linked {
        QueryState::Loading => (false, "Checking Google account..."),
        QueryState::Ready(true) => (true, "Google account linked"),
        QueryState::Ready(false) => (false, "Google account not linked"),
    };
    let mut link = toggler(linked).label(link_label).text_size(14);
    if !ctx.link_pending && !ctx.account_linked.is_loading() {
        link = link.on_toggle(|_| Message::Settings(SettingsMessage::ToggleAccountLink));
    }

    column![
        section_title("Appearance"),
        theme,
        hint("Saved to your settings file."),
        Space::new().height(Length::Fixed(16.0)),
        section_title("Connected account"),
        link,
        hint("Linking lets Email365 read and sort your Gmail inbox."),
    ]
    .spacing(8)
    .into()
}

fn view_privacy() -> Element<'static, Message> {
    column![
        section_title("Privacy"),
        text(
            "Your data is stored securely by the Email365 backend and is never shared \
             with third parties."
        )
        .size(13)
        .color(palette::current().text_secondary),
        Space::new().height(Length::Fixed(8.0)),
        button(text("Delete account").size(13))
            .padding([8, 16])
            .style(danger_button_style)
            .on_press(Message::Settings(SettingsMessage::DeleteAccount)),
    ]
    .spacing(8)
    .into()
}

fn section_title(label: &'static str) -> Element<'static, Message> {
    text(label)
        .size(18)
        .font(style::semibold())
        .color(palette::current().text_primary)
        .into()
}

fn hint(label: &'static str) -> Element<'static, Message> {
    text(label)
        .size(12)
        .color(palette::current().text_muted)
        .into()
}
