//! Colored, scrollable log pane.

use iced::widget::{container, scrollable, text, Column};
use iced::{Element, Length};

use crate::app::Message;
use crate::theme;
use crate::types::LogLine;

pub fn log_view(lines: &[LogLine], autoscroll: bool) -> Element<'_, Message> {
    let mut column = Column::new().spacing(2).padding(8);

    for line in lines {
        column = column.push(
            text(line.text.as_str())
                .size(13)
                .font(iced::Font::MONOSPACE)
                .color(theme::log_color(line.kind)),
        );
    }

    let mut pane = scrollable(column)
        .width(Length::Fill)
        .height(Length::Fill);
    if autoscroll {
        pane = pane.anchor_bottom();
    }

    container(pane)
        .style(theme::log_pane)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
