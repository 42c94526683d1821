//! Colors and shared styling for the dark UI.

use iced::widget::container;
use iced::{Border, Color, Theme};

use crate::types::LogKind;

/// Color for a log line kind, tuned for the dark palette.
pub fn log_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Info => Color::from_rgb8(0xE5, 0xC0, 0x7B),
        LogKind::Notice => Color::from_rgb8(0x56, 0xB6, 0xC2),
        LogKind::Success => Color::from_rgb8(0x98, 0xC3, 0x79),
        LogKind::Error => Color::from_rgb8(0xE0, 0x6C, 0x75),
        LogKind::Warn => Color::from_rgb8(0xD1, 0x9A, 0x66),
        LogKind::Detail => Color::from_rgb8(0xDC, 0xDF, 0xE4),
    }
}

/// Bordered box around each control group.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..container::Style::default()
    }
}

/// Darker background behind the log pane.
pub fn log_pane(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Color::from_rgb8(0x16, 0x18, 0x1D).into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..container::Style::default()
    }
}
