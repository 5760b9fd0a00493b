use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use rulemeta_core::api::{RulesApi, RulesApiError};

use crate::input::{handle_key, handle_paste, InputAction};
use crate::meta::TagUpdate;
use crate::render::render;
use crate::ui::{App, Tui};

/// Results of background API calls, tagged with the ticket the view issued
#[derive(Debug)]
pub enum ApiEvent {
    Vocabulary {
        ticket: u64,
        result: Result<Vec<String>, RulesApiError>,
    },
    Updated {
        ticket: u64,
        result: Result<Vec<String>, RulesApiError>,
    },
}

pub fn spawn_fetch_vocabulary(api: Arc<dyn RulesApi>, ticket: u64, tx: mpsc::Sender<ApiEvent>) {
    tokio::spawn(async move {
        let result = api.fetch_tags().await;
        if tx.send(ApiEvent::Vocabulary { ticket, result }).await.is_err() {
            tracing::debug!(ticket, "Event loop gone, dropping vocabulary");
        }
    });
}

pub fn spawn_update_tags(api: Arc<dyn RulesApi>, update: TagUpdate, tx: mpsc::Sender<ApiEvent>) {
    tokio::spawn(async move {
        let TagUpdate { ticket, key, tags } = update;
        let result = api.update_tags(&key, &tags).await;
        if tx.send(ApiEvent::Updated { ticket, result }).await.is_err() {
            tracing::debug!(ticket, "Event loop gone, dropping update result");
        }
    });
}

/// Route a finished API call back into the view, then surface the outcome
pub fn apply_api_event(app: &mut App, event: ApiEvent) {
    match event {
        ApiEvent::Vocabulary { ticket, result } => {
            let outcome = app.meta.on_vocabulary(ticket, result);
            app.on_vocabulary_outcome(outcome);
        }
        ApiEvent::Updated { ticket, result } => {
            let outcome = app.meta.on_update_result(ticket, result);
            app.on_update_outcome(outcome);
        }
    }
}

fn dispatch(action: InputAction, api: &Arc<dyn RulesApi>, tx: &mpsc::Sender<ApiEvent>) {
    match action {
        InputAction::None => {}
        InputAction::FetchVocabulary { ticket } => {
            spawn_fetch_vocabulary(Arc::clone(api), ticket, tx.clone());
        }
        InputAction::SubmitTags(update) => {
            tracing::debug!(ticket = update.ticket, tags = ?update.tags, "Submitting tags");
            spawn_update_tags(Arc::clone(api), update, tx.clone());
        }
    }
}

pub async fn run_app(terminal: &mut Tui, app: &mut App, api: Arc<dyn RulesApi>) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));
    let (api_tx, mut api_rx) = mpsc::channel::<ApiEvent>(16);
    let mut model_changes = app.meta.model().subscribe();

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let action = handle_key(app, key);
                        dispatch(action, &api, &api_tx);
                    }
                    Some(Ok(Event::Paste(text))) => handle_paste(app, &text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Terminal event stream failed");
                        return Err(e.into());
                    }
                    None => app.quit(),
                }
            }

            Some(event) = api_rx.recv() => {
                apply_api_event(app, event);
            }

            Ok(()) = model_changes.changed() => {
                app.meta.on_model_change();
            }

            _ = tick_interval.tick() => {
                app.tick();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{AppContext, EditState, RuleMetaView};
    use crate::ui::tag_picker::TagPickerWidget;
    use async_trait::async_trait;
    use rulemeta_core::models::{Rule, RuleModel};

    struct FakeApi;

    #[async_trait]
    impl RulesApi for FakeApi {
        async fn show_rule(&self, key: &str) -> Result<Rule, RulesApiError> {
            Ok(Rule::new(key))
        }
        async fn fetch_tags(&self) -> Result<Vec<String>, RulesApiError> {
            Ok(vec!["bug".into(), "perf".into()])
        }
        async fn update_tags(&self, _key: &str, tags: &[String]) -> Result<Vec<String>, RulesApiError> {
            let mut stored = tags.to_vec();
            stored.sort();
            Ok(stored)
        }
    }

    fn app() -> App {
        let rule = Rule::new("S1").with_tags(vec!["bug".into()], vec![]);
        let mut app = App::new(RuleMetaView::new(
            RuleModel::new(rule),
            AppContext::new("http://sonar", true),
            TagPickerWidget::new(),
        ));
        app.meta.on_render();
        app
    }

    #[tokio::test]
    async fn test_background_calls_round_trip_through_channel() {
        let api: Arc<dyn RulesApi> = Arc::new(FakeApi);
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = app();
        let mut changes = app.meta.model().subscribe();

        let ticket = app.meta.change_tags().unwrap();
        dispatch(InputAction::FetchVocabulary { ticket }, &api, &tx);
        let event = rx.recv().await.unwrap();
        apply_api_event(&mut app, event);
        assert_eq!(app.meta.state(), EditState::Editing);

        // a result for a ticket that was never submitted is ignored
        apply_api_event(
            &mut app,
            ApiEvent::Updated {
                ticket: 99,
                result: Ok(vec!["zzz".into()]),
            },
        );
        assert_eq!(app.meta.model().tags(), ["bug".to_string()]);

        let update = app.meta.edit_done().unwrap();
        dispatch(InputAction::SubmitTags(update), &api, &tx);
        let event = rx.recv().await.unwrap();
        apply_api_event(&mut app, event);

        assert_eq!(app.meta.state(), EditState::ReadOnly);
        assert_eq!(app.current_notification().unwrap().message, "Tags unchanged");
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failed_vocabulary_surfaces_notification() {
        struct DownApi;

        #[async_trait]
        impl RulesApi for DownApi {
            async fn show_rule(&self, key: &str) -> Result<Rule, RulesApiError> {
                Ok(Rule::new(key))
            }
            async fn fetch_tags(&self) -> Result<Vec<String>, RulesApiError> {
                Err(RulesApiError::Status {
                    status: 500,
                    body: String::new(),
                })
            }
            async fn update_tags(&self, _key: &str, _tags: &[String]) -> Result<Vec<String>, RulesApiError> {
                Ok(Vec::new())
            }
        }

        let api: Arc<dyn RulesApi> = Arc::new(DownApi);
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = app();

        let ticket = app.meta.change_tags().unwrap();
        spawn_fetch_vocabulary(api, ticket, tx);
        apply_api_event(&mut app, rx.recv().await.unwrap());

        assert_eq!(app.meta.state(), EditState::ReadOnly);
        assert_eq!(
            app.current_notification().unwrap().message,
            "Could not load tags: HTTP 500"
        );
    }
}
