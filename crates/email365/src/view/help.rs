//! Help center: searchable questions grouped by topic.

use email365_core::{HelpQuestion, QueryState, group_by_category};
use iced::widget::{Column, Space, column, container, scrollable, text, text_input};
use iced::{Element, Length};

use crate::message::Message;
use crate::style;
use crate::style::widgets::{card_style, input_style, palette, scrollable_style};

/// Renders the help center.
pub fn view_help(
    questions: &QueryState<Vec<HelpQuestion>>,
    query: &str,
) -> Element<'static, Message> {
    let p = palette::current();

    let search = text_input("Search help articles...", query)
        .padding([10, 14])
        .style(input_style)
        .on_input(Message::HelpSearchChanged);

    let body: Element<'static, Message> = match questions {
        QueryState::Loading => text("Loading help articles...")
            .size(14)
            .color(p.text_muted)
            .into(),
        QueryState::Ready(questions) => {
            let groups = group_by_category(questions, query);
            if groups.is_empty() {
                text(format!("No articles match \"{query}\""))
                    .size(14)
                    .color(p.text_muted)
                    .into()
            } else {
                Column::with_children(groups.into_iter().map(|group| {
                    column![
                        text(group.category.to_string())
                            .size(18)
                            .font(style::semibold())
                            .color(p.text_primary),
                        Column::with_children(group.questions.into_iter().map(view_question))
                            .spacing(8),
                    ]
                    .spacing(10)
                    .into()
                }))
                .spacing(24)
                .into()
            }
        }
    };

    let layout = column![
        text("Help center").size(28).font(style::bold()).color(p.text_primary),
        text("Answers to common questions about sorting, categories and your account.")
            .size(14)
            .color(p.text_secondary),
        Space::new().height(Length::Fixed(8.0)),
        search,
        Space::new().height(Length::Fixed(8.0)),
        body,
    ]
    .spacing(10)
    .padding(24)
    .max_width(760);

    scrollable(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(scrollable_style)
        .into()
}

fn view_question(question: &HelpQuestion) -> Element<'static, Message> {
    let p = palette::current();

    container(
        column![
            text(question.question.clone())
                .size(15)
                .font(style::semibold())
                .color(p.text_primary),
            text(question.answer.clone()).size(13).color(p.text_secondary),
        ]
        .spacing(6),
    )
    .padding(16)
    .width(Length::Fill)
    .style(card_style)
    .into()
}
