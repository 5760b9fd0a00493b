//! Multi-select tag picker
//!
//! [`TagPicker`] is the narrow interface the rule view drives; the view
//! never touches widget internals, so it can be tested with a stub.
//! [`TagPickerWidget`] is the terminal implementation: selected tags render
//! as chips above a filter input and a dropdown of the remaining options.
//! Typing a tag that is not offered adds it as a new free-text tag.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

pub trait TagPicker {
    /// Build the widget with `initial` selected and `options` offered.
    fn activate(&mut self, initial: Vec<String>, options: Vec<String>);

    /// False until `activate` has run at least once.
    fn is_active(&self) -> bool;

    fn current_value(&self) -> Vec<String>;

    fn set_value(&mut self, value: Vec<String>);

    /// Show the option dropdown and take focus.
    fn open(&mut self);

    fn close(&mut self);

    fn is_open(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct TagPickerWidget {
    active: bool,
    open: bool,
    selected: Vec<String>,
    options: Vec<String>,
    query: String,
    /// Index into `matches()`
    cursor: usize,
}

impl TagPickerWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Unselected options matching the current query, in option order
    pub fn matches(&self) -> Vec<&str> {
        let needle = self.query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| !self.selected.contains(o))
            .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.active {
            return false;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Down, _) => {
                if !self.open {
                    self.open();
                } else {
                    let count = self.matches().len();
                    if count > 0 {
                        self.cursor = (self.cursor + 1).min(count - 1);
                    }
                }
                true
            }
            (KeyCode::Up, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            (KeyCode::Enter, _) | (KeyCode::Char(','), KeyModifiers::NONE) => {
                self.commit();
                true
            }
            (KeyCode::Backspace, _) => {
                if self.query.pop().is_none() {
                    if let Some(last) = self.selected.last().cloned() {
                        self.deselect(&last);
                    }
                }
                self.cursor = 0;
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.query.push(c);
                self.cursor = 0;
                if !self.open {
                    self.open();
                }
                true
            }
            _ => false,
        }
    }

    /// Add the highlighted option, or the typed query when nothing matches.
    fn commit(&mut self) {
        let choice = self
            .matches()
            .get(self.cursor)
            .map(|s| s.to_string())
            .or_else(|| {
                let typed = self.query.trim();
                (!typed.is_empty()).then(|| typed.to_string())
            });

        if let Some(tag) = choice {
            self.select(tag);
        }
        self.query.clear();
        self.cursor = 0;
    }

    fn select(&mut self, tag: String) {
        if !self.selected.contains(&tag) {
            self.selected.push(tag);
        }
    }

    /// Remove a chip; it goes back into the dropdown.
    fn deselect(&mut self, tag: &str) {
        self.selected.retain(|t| t != tag);
        if !self.options.iter().any(|o| o == tag) {
            self.options.push(tag.to_string());
        }
    }
}

impl TagPicker for TagPickerWidget {
    fn activate(&mut self, initial: Vec<String>, options: Vec<String>) {
        self.active = true;
        self.open = false;
        self.selected = Vec::new();
        for tag in initial {
            self.select(tag);
        }
        self.options = options;
        self.query.clear();
        self.cursor = 0;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn current_value(&self) -> Vec<String> {
        self.selected.clone()
    }

    fn set_value(&mut self, value: Vec<String>) {
        let previous = std::mem::take(&mut self.selected);
        for tag in previous {
            if !value.contains(&tag) && !self.options.contains(&tag) {
                self.options.push(tag);
            }
        }
        for tag in value {
            self.select(tag);
        }
        self.cursor = 0;
    }

    fn open(&mut self) {
        if self.active {
            self.open = true;
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.cursor = 0;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Render the picker into `area` (chips, input line, dropdown when open)
pub fn render_tag_picker(f: &mut Frame, area: Rect, picker: &TagPickerWidget, busy: bool) {
    let border_style = if busy {
        theme::border_inactive()
    } else {
        theme::border_focused()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Edit tags ", theme::text_bold()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let mut chips: Vec<Span> = Vec::new();
    if picker.selected.is_empty() {
        chips.push(Span::styled("No tags", theme::text_dim()));
    }
    for tag in &picker.selected {
        chips.push(Span::styled(
            format!(" {} ", tag),
            Style::default().fg(theme::BG_APP).bg(theme::ACCENT_PRIMARY),
        ));
        chips.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Line::from(chips)).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let input = if picker.query.is_empty() {
        Line::from(Span::styled("Type to search or add a tag…", theme::input_placeholder()))
    } else {
        Line::from(vec![
            Span::styled("› ", theme::text_muted()),
            Span::styled(picker.query.as_str(), theme::input_active()),
        ])
    };
    f.render_widget(Paragraph::new(input), chunks[1]);

    if !picker.open {
        return;
    }

    let matches = picker.matches();
    let list_area = chunks[2];
    if matches.is_empty() {
        let msg = if picker.query.trim().is_empty() {
            "No more tags to add".to_string()
        } else {
            format!("Enter adds new tag \"{}\"", picker.query.trim())
        };
        f.render_widget(Paragraph::new(msg).style(theme::text_muted()), list_area);
        return;
    }

    let visible = list_area.height as usize;
    let scroll = if picker.cursor >= visible {
        picker.cursor + 1 - visible
    } else {
        0
    };
    let rows: Vec<ListItem> = matches
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(i, tag)| {
            if i == picker.cursor {
                ListItem::new(Line::from(vec![
                    Span::styled("▌", Style::default().fg(theme::ACCENT_PRIMARY)),
                    Span::styled(
                        tag.to_string(),
                        Style::default()
                            .fg(theme::ACCENT_PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    Span::styled(tag.to_string(), theme::text_primary()),
                ]))
            }
        })
        .collect();
    f.render_widget(List::new(rows), list_area);
}
