pub mod log_view;

use iced::widget::{button, container, row, text, text_input, Column};
use iced::{Element, Length};

use crate::app::Message;
use crate::theme;

/// A titled, bordered group of controls.
pub fn panel<'a>(
    title: &'a str,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    container(
        Column::new()
            .push(text(title).size(14))
            .push(content)
            .spacing(8),
    )
    .style(theme::panel)
    .padding(10)
    .width(Length::Fill)
    .into()
}

/// A labelled path field with a browse button.
pub fn path_row<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    on_browse: Message,
) -> Element<'a, Message> {
    row![
        text(label).size(13).width(Length::Fixed(130.0)),
        text_input(placeholder, value).on_input(on_input).size(13),
        button(text("Browse...").size(13)).on_press(on_browse),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center)
    .into()
}

/// A labelled free-form input without a browse button.
pub fn field_row<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).size(13).width(Length::Fixed(130.0)),
        text_input(placeholder, value).on_input(on_input).size(13),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center)
    .into()
}
