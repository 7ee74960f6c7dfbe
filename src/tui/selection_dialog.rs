//! Filter checkboxes and merger radio buttons.

use super::widgets::{button, focus_style, help_line, title_bar, StatusBar};
use super::{Dialog, DialogStatus};
use crate::stage::{Filter, Merger, Selection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const SELECTION_TITLE: &str = "prosynar Filter/Merge Select";

const HELP: &str = "↑/↓ Tab: Move, Space: Toggle / Pick, Enter: Press button, Esc: Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Filter(Filter),
    Merger(Merger),
    Cancel,
    Ok,
}

/// Focus order: filters, mergers, then the buttons
fn items() -> Vec<Item> {
    Filter::ALL
        .into_iter()
        .map(Item::Filter)
        .chain(Merger::ALL.into_iter().map(Item::Merger))
        .chain([Item::Cancel, Item::Ok])
        .collect()
}

pub struct SelectionDialog {
    selection: Selection,
    items: Vec<Item>,
    focus: usize,
    confirmed: bool,
}

impl SelectionDialog {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            items: items(),
            focus: 0,
            confirmed: false,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    fn focused(&self) -> Item {
        self.items[self.focus]
    }

    fn focus_item(&mut self, item: Item) {
        if let Some(index) = self.items.iter().position(|i| *i == item) {
            self.focus = index;
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.items.len();
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    fn activate(&mut self) {
        match self.focused() {
            Item::Filter(filter) => {
                let enabled = !self.selection.is_selected(filter);
                self.selection.set_filter(filter, enabled);
            }
            Item::Merger(merger) => self.selection.set_merger(merger),
            Item::Cancel | Item::Ok => {}
        }
    }

    fn item_line(&self, index: usize) -> Line<'static> {
        let focused = self.focus == index;
        let marker = if focused { "> " } else { "  " };
        let (mark, label) = match self.items[index] {
            Item::Filter(filter) => (
                if self.selection.is_selected(filter) { "[x]" } else { "[ ]" },
                filter.label(),
            ),
            Item::Merger(merger) => (
                if self.selection.merger() == merger { "(*)" } else { "( )" },
                merger.label(),
            ),
            Item::Cancel | Item::Ok => ("", ""),
        };
        Line::from(vec![
            Span::raw(marker),
            Span::raw(format!("{} ", mark)),
            Span::styled(label, focus_style(focused)),
        ])
    }
}

impl Default for SelectionDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

impl Dialog for SelectionDialog {
    type Output = Selection;

    fn title(&self) -> &str {
        SELECTION_TITLE
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        f.render_widget(title_bar(self.title()), chunks[0]);

        let filter_count = Filter::ALL.len();
        let merger_count = Merger::ALL.len();
        let mut lines = vec![heading("Filters")];
        lines.extend((0..filter_count).map(|i| self.item_line(i)));
        lines.push(Line::default());
        lines.push(heading("Merge Method"));
        lines.extend((filter_count..filter_count + merger_count).map(|i| self.item_line(i)));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw("  "),
            button("Cancel", self.focused() == Item::Cancel),
            Span::raw("  "),
            button("OK", self.focused() == Item::Ok),
        ]));

        let body = Paragraph::new(lines).block(Block::default().title("Stages").borders(Borders::ALL));
        f.render_widget(body, chunks[1]);

        let filters = self.selection.filters().count();
        StatusBar::new(format!(
            "{} filter(s) selected, merging with {}",
            filters,
            self.selection.merger().label()
        ))
        .render(f, chunks[2]);

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
            KeyCode::Left | KeyCode::Right => match self.focused() {
                Item::Cancel => self.focus_item(Item::Ok),
                Item::Ok => self.focus_item(Item::Cancel),
                _ => {}
            },
            KeyCode::Char(' ') => self.activate(),
            KeyCode::Enter => match self.focused() {
                Item::Ok => {
                    self.confirmed = true;
                    return DialogStatus::Confirmed;
                }
                Item::Cancel => return DialogStatus::Cancelled,
                _ => self.move_focus(true),
            },
            _ => {}
        }
        DialogStatus::Open
    }

    fn output(&mut self) -> Option<Selection> {
        self.confirmed.then_some(self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use crate::tui::widgets::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(dialog: &mut SelectionDialog, code: KeyCode) -> DialogStatus {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_confirm_defaults_to_align_only() {
        let mut dialog = SelectionDialog::new();
        press(&mut dialog, KeyCode::BackTab);
        assert_eq!(press(&mut dialog, KeyCode::Enter), DialogStatus::Confirmed);
        let selection = dialog.output().unwrap();
        assert_eq!(selection.stages(), vec![Stage::Merger(Merger::Align)]);
    }

    #[test]
    fn test_toggle_filters_and_pick_merger() {
        let mut dialog = SelectionDialog::new();
        press(&mut dialog, KeyCode::Char(' ')); // Frover on
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Char(' ')); // Fpprobreg on
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Char(' ')); // FLASH
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Char(' ')); // PEAR replaces FLASH

        assert_eq!(dialog.selection().merger(), Merger::Pear);
        assert_eq!(
            dialog.selection().stages(),
            vec![
                Stage::Filter(Filter::ReferenceOverlap),
                Stage::Filter(Filter::ProbabilisticRepeatRegion),
                Stage::Merger(Merger::Pear),
            ]
        );

        // Toggling again clears a filter
        dialog.focus = 0;
        press(&mut dialog, KeyCode::Char(' '));
        assert!(!dialog.selection().is_selected(Filter::ReferenceOverlap));
    }

    #[test]
    fn test_cancel_button_and_escape() {
        let mut dialog = SelectionDialog::new();
        press(&mut dialog, KeyCode::BackTab);
        press(&mut dialog, KeyCode::Right);
        assert_eq!(dialog.focused(), Item::Cancel);
        assert_eq!(press(&mut dialog, KeyCode::Enter), DialogStatus::Cancelled);
        assert!(dialog.output().is_none());

        let mut dialog = SelectionDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Esc), DialogStatus::Cancelled);
    }

    #[test]
    fn test_render_lists_every_choice_on_its_own_row() {
        let dialog = SelectionDialog::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| dialog.render(f)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(SELECTION_TITLE));
        for filter in Filter::ALL {
            assert_eq!(text.lines().filter(|l| l.contains(filter.label())).count(), 1);
        }
        assert!(text.contains("(*) Align"));
        assert!(text.contains("( ) FLASH"));
        assert!(text.contains("[ OK ]"));
    }
}
