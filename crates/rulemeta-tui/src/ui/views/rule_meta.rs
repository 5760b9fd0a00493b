use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::meta::{EditState, FieldData, MetaField, RuleMetaView, TagRegion};
use crate::ui::tag_picker::{render_tag_picker, TagPickerWidget};
use crate::ui::theme;

const LABEL_WIDTH: usize = 17;

/// Render the metadata panel: field rows, then either the tag list or the
/// tag editor, then the permalink.
pub fn render_rule_meta(f: &mut Frame, area: Rect, view: &RuleMetaView<TagPickerWidget>) {
    let data = view.serialize();
    let focus_id = view.focused().map(|t| t.field.id());
    let is_focused = |field: &MetaField| focus_id.as_deref() == Some(field.id().as_str());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_active())
        .title(Line::from(vec![
            Span::styled(format!(" {} ", data.key), theme::text_bold()),
            Span::styled(format!("{} ", data.name), theme::text_muted()),
        ]));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tag_height = match view.region() {
        TagRegion::List => 2,
        TagRegion::EditForm => inner.height.saturating_sub(data.fields.len() as u16 + 2).max(6),
    };
    let chunks = Layout::vertical([
        Constraint::Length(data.fields.len() as u16),
        Constraint::Length(tag_height),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let rows: Vec<Line> = data
        .fields
        .iter()
        .map(|field| field_line(field, is_focused(&field.field)))
        .collect();
    f.render_widget(Paragraph::new(rows), chunks[0]);

    match view.region() {
        TagRegion::List => {
            let mut spans = vec![Span::styled(
                format!("{:<width$}", "Tags", width = LABEL_WIDTH),
                theme::text_muted(),
            )];
            if data.all_tags.is_empty() {
                spans.push(Span::styled("No tags", theme::text_dim()));
            }
            for tag in &data.all_tags {
                let system = data.sys_tags.contains(tag);
                let field = MetaField::Tag {
                    name: tag.clone(),
                    system,
                };
                let style = if is_focused(&field) {
                    theme::interactive_selected()
                } else if system {
                    theme::system_tag()
                } else {
                    theme::custom_tag()
                };
                spans.push(Span::styled(format!("#{}", tag), style));
                spans.push(Span::raw("  "));
            }
            if data.can_write {
                let affordance = match view.state() {
                    EditState::FetchingVocabulary { .. } => {
                        Span::styled("loading…", theme::status_warning())
                    }
                    _ => Span::styled("[t] change", theme::text_dim()),
                };
                spans.push(affordance);
            }
            f.render_widget(
                Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
                chunks[1],
            );
        }
        TagRegion::EditForm => {
            let busy = matches!(view.state(), EditState::Submitting { .. });
            render_tag_picker(f, chunks[1], view.picker(), busy);
        }
    }

    let permalink_style = if is_focused(&MetaField::Permalink) {
        theme::interactive_selected()
    } else {
        theme::link()
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{:<width$}", MetaField::Permalink.label(), width = LABEL_WIDTH),
                theme::text_muted(),
            ),
            Span::styled(data.permalink.as_str(), permalink_style),
        ])),
        chunks[2],
    );
}

fn field_line(field: &FieldData, focused: bool) -> Line<'static> {
    let value_style = if focused {
        theme::interactive_selected()
    } else {
        match &field.field {
            MetaField::Severity => Style::default()
                .fg(theme::severity_color(&field.value))
                .add_modifier(Modifier::BOLD),
            _ if field.filter.is_some() => theme::text_primary(),
            _ => theme::text_muted(),
        }
    };
    Line::from(vec![
        Span::styled(
            format!("{:<width$}", field.field.label(), width = LABEL_WIDTH),
            theme::text_muted(),
        ),
        Span::styled(field.value.clone(), value_style),
    ])
}
