use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::input::key_hints;
use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::App;

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 2;
const STATUSBAR_HEIGHT: u16 = 1;

pub fn render(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
        Constraint::Length(STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    let mut header = vec![Span::styled(
        " Rule ",
        Style::default()
            .fg(ui::theme::ACCENT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    for query in &app.applied_filters {
        header.push(Span::styled(format!(" {} ", query), ui::theme::text_dim()));
    }
    f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    ui::views::render_rule_meta(f, chunks[1], &app.meta);

    render_footer(f, chunks[2], app);

    render_statusbar(
        f,
        chunks[3],
        app.current_notification(),
        app.meta.state().label(),
    );

    if app.show_help {
        render_help(f, app);
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let hint = app
        .meta
        .focused_hint()
        .map(|text| Line::from(Span::styled(format!(" {}", text), ui::theme::text_muted())))
        .unwrap_or_default();

    let mut keys = vec![Span::raw(" ")];
    for (key, label) in key_hints(app) {
        keys.push(Span::styled(key, ui::theme::text_bold()));
        keys.push(Span::styled(format!(" {}  ", label), ui::theme::text_dim()));
    }

    f.render_widget(Paragraph::new(vec![hint, Line::from(keys)]), area);
}

fn render_help(f: &mut Frame, app: &App) {
    let hints = key_hints(app);
    let height = (hints.len() as u16 + 2).min(f.area().height);
    let width = 40.min(f.area().width);
    let area = Rect {
        x: f.area().width.saturating_sub(width) / 2,
        y: f.area().height.saturating_sub(height) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = hints
        .into_iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", key), ui::theme::text_bold()),
                Span::styled(label, ui::theme::text_muted()),
            ])
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ui::theme::border_focused())
                .title(" Keys "),
        ),
        area,
    );
}
