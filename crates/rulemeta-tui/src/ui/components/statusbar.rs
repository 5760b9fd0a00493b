// Status bar at the very bottom: notification on the left, edit state on the right

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    state_label: &str,
) {
    let state_width = (state_label.width() as u16 + 2).min(area.width / 2);
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(state_width)]).split(area);

    let notification_paragraph = if let Some(notification) = current_notification {
        let color = match notification.level {
            NotificationLevel::Info => theme::ACCENT_PRIMARY,
            NotificationLevel::Success => theme::ACCENT_SUCCESS,
            NotificationLevel::Warning => theme::ACCENT_WARNING,
            NotificationLevel::Error => theme::ACCENT_ERROR,
        };
        let icon = notification.level.icon();
        let available = (chunks[0].width as usize).saturating_sub(icon.width() + 2);
        let message = truncate_with_ellipsis(&notification.message, available);

        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(color)),
            Span::styled(message, Style::default().fg(color)),
        ]))
    } else {
        Paragraph::new("")
    };
    f.render_widget(
        notification_paragraph.style(Style::default().bg(theme::BG_SIDEBAR)),
        chunks[0],
    );

    let label = Paragraph::new(format!("{} ", state_label))
        .alignment(ratatui::layout::Alignment::Right)
        .style(Style::default().fg(theme::ACCENT_WARNING).bg(theme::BG_SIDEBAR));
    f.render_widget(label, chunks[1]);
}

/// Cut `s` down to `max_width` columns, ending in "..." when shortened
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return take_width(s, max_width);
    }
    let mut out = take_width(s, max_width - 3);
    out.push_str("...");
    out
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out
}
