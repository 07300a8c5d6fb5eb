//! Widget styles that read the active palette at draw time.

#![allow(clippy::needless_update)]

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use shadows::radius;

pub use containers::{
    banner_style, card_style, category_badge_style, count_badge_style, divider_style,
    header_style, message_row_selected_style, page_style, pane_style, sidebar_style, toast_style,
};

pub use buttons::{
    category_button_selected_style, category_button_style, chip_style, danger_button_style,
    ghost_button_style, message_button_style, primary_button_style, secondary_button_style,
};

pub use inputs::{input_style, scrollable_style};
