use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::meta::{EditState, TagUpdate};
use crate::ui::App;

/// Work a key press hands back to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    FetchVocabulary { ticket: u64 },
    SubmitTags(TagUpdate),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return InputAction::None;
    }

    let action = match app.meta.state() {
        EditState::Editing => handle_editing_key(app, key),
        EditState::Submitting { .. } => {
            if key.code == KeyCode::Esc {
                app.meta.cancel_edit();
            }
            InputAction::None
        }
        EditState::ReadOnly | EditState::FetchingVocabulary { .. } => handle_panel_key(app, key),
    };

    app.drain_filters();
    action
}

fn handle_editing_key(app: &mut App, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.meta.cancel_edit();
            InputAction::None
        }
        KeyCode::Char('s') | KeyCode::Char('d') if ctrl => match app.meta.edit_done() {
            Some(update) => InputAction::SubmitTags(update),
            None => InputAction::None,
        },
        _ => {
            app.meta.picker_mut().handle_key(key);
            InputAction::None
        }
    }
}

fn handle_panel_key(app: &mut App, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Char('t') => {
            if let Some(ticket) = app.meta.change_tags() {
                return InputAction::FetchVocabulary { ticket };
            }
        }
        KeyCode::Esc => {
            if app.show_help {
                app.show_help = false;
            } else if app.meta.state() == EditState::ReadOnly {
                app.dismiss_notification();
            } else {
                app.meta.cancel_edit();
            }
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.meta.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.meta.focus_prev(),
        KeyCode::Enter => {
            app.meta.activate_focused();
        }
        _ => {}
    }
    InputAction::None
}

/// Pasted text goes into the tag filter while editing
pub fn handle_paste(app: &mut App, text: &str) {
    if app.meta.state() != EditState::Editing {
        return;
    }
    for c in text.chars().filter(|c| !c.is_control()) {
        app.meta
            .picker_mut()
            .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

/// Key hints for the footer, matching what `handle_key` accepts right now
pub fn key_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.meta.state() {
        EditState::Editing => vec![
            ("type", "search/add"),
            ("↑↓", "move"),
            ("enter", "add"),
            ("⌫", "remove last"),
            ("ctrl+s", "done"),
            ("esc", "cancel"),
        ],
        EditState::Submitting { .. } => vec![("esc", "close")],
        EditState::ReadOnly | EditState::FetchingVocabulary { .. } => {
            let mut hints = vec![("tab", "next field"), ("enter", "filter similar")];
            if app.meta.app().can_write {
                hints.push(("t", "change tags"));
            }
            hints.push(("?", "help"));
            hints.push(("q", "quit"));
            hints
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{AppContext, FilterProperty, RuleMetaView, RuleQuery};
    use crate::ui::tag_picker::{TagPicker, TagPickerWidget};
    use rulemeta_core::models::{Rule, RuleModel};

    fn app(can_write: bool) -> App {
        let rule = Rule::new("S1").with_tags(vec!["bug".into()], vec!["legacy".into()]);
        let mut app = App::new(RuleMetaView::new(
            RuleModel::new(rule),
            AppContext::new("http://sonar", can_write),
            TagPickerWidget::new(),
        ));
        app.meta.on_render();
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn start_editing(app: &mut App, vocabulary: &[&str]) {
        let ticket = match handle_key(app, press(KeyCode::Char('t'))) {
            InputAction::FetchVocabulary { ticket } => ticket,
            other => panic!("Expected fetch, got {:?}", other),
        };
        app.meta.on_vocabulary(
            ticket,
            Ok(vocabulary.iter().map(|s| s.to_string()).collect()),
        );
    }

    #[test]
    fn test_t_without_write_does_nothing() {
        let mut app = app(false);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('t'))), InputAction::None);
        assert_eq!(app.meta.state(), EditState::ReadOnly);
        assert!(!key_hints(&app).iter().any(|(_, label)| *label == "change tags"));
    }

    #[test]
    fn test_full_edit_flow_produces_update() {
        let mut app = app(true);
        assert!(key_hints(&app).iter().any(|(_, label)| *label == "change tags"));
        start_editing(&mut app, &["security", "perf"]);
        assert_eq!(app.meta.state(), EditState::Editing);

        for c in "sec".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));

        match handle_key(&mut app, ctrl('s')) {
            InputAction::SubmitTags(update) => {
                assert_eq!(update.key, "S1");
                assert_eq!(update.tags, vec!["bug", "security"]);
            }
            other => panic!("Expected submit, got {:?}", other),
        }
        assert!(matches!(app.meta.state(), EditState::Submitting { .. }));
    }

    #[test]
    fn test_q_is_a_tag_character_while_editing() {
        let mut app = app(true);
        start_editing(&mut app, &[]);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.meta.picker().query(), "q");
    }

    #[test]
    fn test_esc_cancels_and_restores() {
        let mut app = app(true);
        start_editing(&mut app, &["perf"]);
        handle_key(&mut app, press(KeyCode::Backspace));
        assert!(app.meta.picker().current_value().is_empty());

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.meta.state(), EditState::ReadOnly);
        assert_eq!(app.meta.picker().current_value(), vec!["bug"]);
    }

    #[test]
    fn test_enter_on_tag_applies_filter() {
        let mut app = app(false);
        // first focus target is the system tag
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(
            app.applied_filters,
            vec![RuleQuery::new(FilterProperty::Tags, "legacy")]
        );
    }

    #[test]
    fn test_paste_only_while_editing() {
        let mut app = app(true);
        handle_paste(&mut app, "perf");
        assert_eq!(app.meta.picker().query(), "");

        start_editing(&mut app, &["perf"]);
        handle_paste(&mut app, "per\nf");
        assert_eq!(app.meta.picker().query(), "perf");
    }

    #[test]
    fn test_ctrl_c_quits_from_any_state() {
        let mut app = app(true);
        start_editing(&mut app, &[]);
        handle_key(&mut app, ctrl('c'));
        assert!(!app.running);
    }
}
