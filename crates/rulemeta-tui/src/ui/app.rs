use crate::meta::{RuleFilter, RuleMetaView, RuleQuery, UpdateOutcome, VocabularyOutcome};
use crate::ui::notifications::{Notification, NotificationQueue};
use crate::ui::tag_picker::TagPickerWidget;

/// Top-level TUI state
pub struct App {
    pub running: bool,
    pub meta: RuleMetaView<TagPickerWidget>,
    pub show_help: bool,
    /// Filters the user asked for, most recent last
    pub applied_filters: Vec<RuleQuery>,
    notifications: NotificationQueue,
}

impl App {
    pub fn new(meta: RuleMetaView<TagPickerWidget>) -> Self {
        Self {
            running: true,
            meta,
            show_help: false,
            applied_filters: Vec::new(),
            notifications: NotificationQueue::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    pub fn on_vocabulary_outcome(&mut self, outcome: VocabularyOutcome) {
        if let VocabularyOutcome::Failed(reason) = outcome {
            self.notify(Notification::error(format!("Could not load tags: {}", reason)));
        }
    }

    pub fn on_update_outcome(&mut self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { changed: true } => {
                self.notify(Notification::success("Tags saved"));
            }
            UpdateOutcome::Updated { changed: false } => {
                self.notify(Notification::info("Tags unchanged"));
            }
            UpdateOutcome::Stale => {}
            UpdateOutcome::Failed(reason) => {
                self.notify(Notification::error(format!("Could not save tags: {}", reason)));
            }
        }
    }

    /// Hand clicked filters over to the host side
    pub fn drain_filters(&mut self) {
        for query in self.meta.take_filters() {
            tracing::info!(filter = %query, "Filtering similar rules");
            self.notify(Notification::info(format!("Filter similar rules: {}", query)));
            self.applied_filters.retain(|q| q.property != query.property);
            self.applied_filters.push(query);
        }
    }
}
