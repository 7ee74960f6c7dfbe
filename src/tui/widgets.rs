//! Small pieces shared by the dialogs.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Status bar for validation messages
pub struct StatusBar {
    message: String,
    style: Style,
}

impl StatusBar {
    pub fn new(message: String) -> Self {
        Self {
            message,
            style: Style::default().fg(Color::Green),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message,
            style: Style::default().fg(Color::Red),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(self.message.as_str())
            .style(self.style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status, area);
    }
}

/// Dialog title banner
pub fn title_bar(title: &str) -> Paragraph<'_> {
    Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Key hints along the bottom edge
pub fn help_line(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
}

pub fn button(label: &str, focused: bool) -> Span<'static> {
    let text = format!("[ {} ]", label);
    if focused {
        Span::styled(text, Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        Span::raw(text)
    }
}

/// Style for the label of the focused row
pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Vertical scroll keeping `line` inside a viewport of `height` rows
pub fn scroll_to(line: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    u16::try_from(line.saturating_sub(height - 1)).unwrap_or(u16::MAX)
}

/// Flatten a rendered buffer into text, one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
