//! Argument dialog for one form.

use super::widgets::{button, focus_style, help_line, scroll_to, title_bar, StatusBar};
use super::{Dialog, DialogStatus};
use crate::accumulator::Fragment;
use crate::form::{FieldKind, FieldValue, FormSpec, FormState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP: &str = "↑/↓ Tab: Move, Space: Toggle, Enter: Add file / Next / Press button, Esc: Cancel";

/// Modal form: one row per field, then Cancel and OK.
pub struct FormDialog {
    form: FormState,
    /// Field index, or `len` for Cancel and `len + 1` for OK
    focus: usize,
    error: Option<String>,
    confirmed: Option<Fragment>,
}

impl FormDialog {
    pub fn new(spec: FormSpec) -> Self {
        Self {
            form: FormState::new(spec),
            focus: 0,
            error: None,
            confirmed: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn cancel_index(&self) -> usize {
        self.form.len()
    }

    fn ok_index(&self) -> usize {
        self.form.len() + 1
    }

    fn focused_field(&self) -> Option<usize> {
        (self.focus < self.form.len()).then_some(self.focus)
    }

    fn focused_kind(&self) -> Option<&FieldKind> {
        self.focused_field().map(|index| &self.form.spec().fields[index].kind)
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.form.len() + 2;
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    fn submit(&mut self) -> DialogStatus {
        match self.form.fragment() {
            Ok(fragment) => {
                self.confirmed = Some(fragment);
                DialogStatus::Confirmed
            }
            Err(err) => {
                if let Some(index) = err.field().and_then(|name| self.form.index_of(name).ok()) {
                    self.focus = index;
                }
                self.error = Some(err.to_string());
                DialogStatus::Open
            }
        }
    }

    fn field_line(&self, index: usize, label_width: usize) -> Line<'static> {
        let field = &self.form.spec().fields[index];
        let focused = self.focus == index;
        let marker = if focused { "> " } else { "  " };
        let mut spans = vec![Span::styled(
            format!("{}{:<width$}  ", marker, field.label, width = label_width),
            focus_style(focused),
        )];

        match self.form.value(index) {
            FieldValue::Flag(on) => spans.push(Span::raw(if *on { "[x]" } else { "[ ]" })),
            FieldValue::Text(text) => spans.extend(text_spans(text, &field.placeholder(), focused)),
            FieldValue::List { entries, pending } => {
                for entry in entries {
                    spans.push(Span::styled(format!("{}  ", entry), Style::default().fg(Color::Green)));
                }
                spans.extend(text_spans(pending, &field.placeholder(), focused));
            }
        }
        Line::from(spans)
    }
}

fn text_spans(text: &str, placeholder: &str, focused: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if text.is_empty() && !focused {
        spans.push(Span::styled(format!("<{}>", placeholder), Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(text.to_string()));
    }
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    spans
}

impl Dialog for FormDialog {
    type Output = Fragment;

    fn title(&self) -> &str {
        self.form.spec().title
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(3),    // Fields and buttons
                Constraint::Length(3), // Status
                Constraint::Length(1), // Help
            ])
            .split(f.area());

        f.render_widget(title_bar(self.title()), chunks[0]);

        let label_width = self.form.spec().fields.iter().map(|field| field.label.len()).max().unwrap_or(0);
        let mut lines: Vec<Line> = (0..self.form.len()).map(|i| self.field_line(i, label_width)).collect();
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw("  "),
            button("Cancel", self.focus == self.cancel_index()),
            Span::raw("  "),
            button("OK", self.focus == self.ok_index()),
        ]));

        // Buttons share the last line
        let focus_line = self.focused_field().unwrap_or(self.form.len() + 1);
        let inner_height = chunks[1].height.saturating_sub(2);
        let fields = Paragraph::new(lines)
            .scroll((scroll_to(focus_line, inner_height), 0))
            .block(Block::default().title("Arguments").borders(Borders::ALL));
        f.render_widget(fields, chunks[1]);

        let status = match &self.error {
            Some(message) => StatusBar::error(message.clone()),
            None => StatusBar::new("Empty fields keep the tool's defaults".to_string()),
        };
        status.render(f, chunks[2]);

        f.render_widget(help_line(HELP), chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStatus {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => DialogStatus::Cancelled,
                _ => DialogStatus::Open,
            };
        }

        match key.code {
            KeyCode::Esc => return DialogStatus::Cancelled,
            KeyCode::Up | KeyCode::BackTab => self.move_focus(false),
            KeyCode::Down | KeyCode::Tab => self.move_focus(true),
            KeyCode::Left | KeyCode::Right if self.focused_field().is_none() => {
                self.focus = if self.focus == self.ok_index() {
                    self.cancel_index()
                } else {
                    self.ok_index()
                };
            }
            KeyCode::Enter => {
                if self.focus == self.ok_index() {
                    return self.submit();
                }
                if self.focus == self.cancel_index() {
                    return DialogStatus::Cancelled;
                }
                let index = self.focus;
                let added = matches!(self.focused_kind(), Some(FieldKind::FileList { .. }))
                    && self.form.commit_pending(index);
                if !added {
                    self.move_focus(true);
                }
            }
            KeyCode::Char(' ') if matches!(self.focused_kind(), Some(FieldKind::Flag)) => {
                self.form.toggle(self.focus);
                self.error = None;
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_field().and_then(|i| self.form.text_mut(i)) {
                    text.push(c);
                    self.error = None;
                }
            }
            KeyCode::Backspace => {
                if let Some(index) = self.focused_field() {
                    let popped = self.form.text_mut(index).and_then(|text| text.pop());
                    if popped.is_none() {
                        self.form.pop_entry(index);
                    }
                    self.error = None;
                }
            }
            _ => {}
        }
        DialogStatus::Open
    }

    fn output(&mut self) -> Option<Fragment> {
        self.confirmed.take()
    }
}
