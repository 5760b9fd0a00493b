use rulemeta_core::api::RulesApiError;
use rulemeta_core::models::{assignable_tags, RuleModel};

use super::filter::{RuleFilter, RuleQuery};
use super::serialize::{serialize, FieldData, MetaViewData};
use super::session::{EditSession, EditState, TagRegion};
use super::AppContext;
use crate::ui::tag_picker::TagPicker;
use crate::ui::tooltips::TooltipLayer;

/// A tag update ready to be sent to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUpdate {
    pub ticket: u64,
    pub key: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyOutcome {
    /// Picker is up
    Activated,
    /// Response to a request that was superseded or cancelled
    Stale,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Server stored the tags; `changed` is false when they were already current
    Updated { changed: bool },
    Stale,
    Failed(String),
}

/// Metadata panel for one rule.
///
/// Holds the rule model and drives the tag picker through the edit
/// lifecycle: `change_tags` asks for the vocabulary, `on_vocabulary`
/// brings the picker up, `edit_done` produces the update to submit and
/// `on_update_result` applies what the server stored. Network calls are
/// made by the host; the view only hands out tickets and consumes results.
pub struct RuleMetaView<P: TagPicker> {
    model: RuleModel,
    app: AppContext,
    picker: P,
    state: EditState,
    session: Option<EditSession>,
    next_ticket: u64,
    /// Submit tickets whose response has not arrived yet
    in_flight: Vec<u64>,
    /// Newest submit the server has confirmed
    last_confirmed: Option<u64>,
    tooltips: TooltipLayer,
    focus: usize,
    filters: Vec<RuleQuery>,
    mounted: bool,
}

impl<P: TagPicker> RuleMetaView<P> {
    pub fn new(model: RuleModel, app: AppContext, picker: P) -> Self {
        Self {
            model,
            app,
            picker,
            state: EditState::ReadOnly,
            session: None,
            next_ticket: 0,
            in_flight: Vec::new(),
            last_confirmed: None,
            tooltips: TooltipLayer::new(),
            focus: 0,
            filters: Vec::new(),
            mounted: false,
        }
    }

    pub fn model(&self) -> &RuleModel {
        &self.model
    }

    pub fn app(&self) -> &AppContext {
        &self.app
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn tooltips(&self) -> &TooltipLayer {
        &self.tooltips
    }

    pub fn region(&self) -> TagRegion {
        match self.state {
            EditState::Editing | EditState::Submitting { .. } => TagRegion::EditForm,
            _ => TagRegion::List,
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    // ===== Lifecycle =====

    pub fn on_render(&mut self) {
        let data = self.serialize();
        self.tooltips.activate(data.tooltip_targets());
        let count = data.focus_targets().len();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
        self.mounted = true;
    }

    pub fn on_destroy(&mut self) {
        self.tooltips.deactivate();
        self.mounted = false;
    }

    /// The rule changed; re-render if mounted
    pub fn on_model_change(&mut self) {
        if self.mounted {
            self.on_render();
        }
    }

    // ===== Tag editing =====

    /// Start editing. Returns the ticket of the vocabulary request the host
    /// must issue, or None when editing is not possible right now.
    pub fn change_tags(&mut self) -> Option<u64> {
        if !self.app.can_write {
            tracing::debug!("Tag edit requested without write permission");
            return None;
        }
        match self.state {
            EditState::ReadOnly | EditState::FetchingVocabulary { .. } => {
                let ticket = self.issue_ticket();
                tracing::debug!(ticket, rule_key = self.model.key(), "Fetching tag vocabulary");
                self.state = EditState::FetchingVocabulary { ticket };
                Some(ticket)
            }
            EditState::Editing | EditState::Submitting { .. } => None,
        }
    }

    pub fn on_vocabulary(
        &mut self,
        ticket: u64,
        result: Result<Vec<String>, RulesApiError>,
    ) -> VocabularyOutcome {
        if self.state != (EditState::FetchingVocabulary { ticket }) {
            tracing::debug!(ticket, "Ignoring stale vocabulary response");
            return VocabularyOutcome::Stale;
        }

        match result {
            Ok(vocabulary) => {
                self.activate_picker(&vocabulary);
                VocabularyOutcome::Activated
            }
            Err(e) => {
                tracing::warn!(ticket, error = %e, "Failed to fetch tag vocabulary");
                self.state = EditState::ReadOnly;
                VocabularyOutcome::Failed(e.summary())
            }
        }
    }

    fn activate_picker(&mut self, vocabulary: &[String]) {
        let current = self.model.tags().to_vec();
        let assignable = assignable_tags(vocabulary, &current, self.model.sys_tags());

        self.picker.activate(current, assignable);
        self.session = Some(EditSession::start(self.picker.current_value()));
        self.state = EditState::Editing;
        self.picker.open();
        tracing::debug!(rule_key = self.model.key(), "Tag editing started");
    }

    /// Back to the read-only list, putting the picker back to the value it
    /// had when editing started. No-op when already read-only.
    pub fn cancel_edit(&mut self) {
        if self.state == EditState::ReadOnly {
            return;
        }
        self.state = EditState::ReadOnly;

        let session = self.session.take();
        if self.picker.is_active() {
            if let Some(session) = session {
                self.picker.set_value(session.into_buffered_tags());
            }
            self.picker.close();
        }
    }

    /// Finish editing. Returns the update the host must submit.
    pub fn edit_done(&mut self) -> Option<TagUpdate> {
        if self.state != EditState::Editing {
            return None;
        }
        let ticket = self.issue_ticket();
        let tags = self.picker.current_value();
        self.picker.close();
        self.state = EditState::Submitting { ticket };
        self.in_flight.push(ticket);

        Some(TagUpdate {
            ticket,
            key: self.model.key().to_string(),
            tags,
        })
    }

    pub fn on_update_result(
        &mut self,
        ticket: u64,
        result: Result<Vec<String>, RulesApiError>,
    ) -> UpdateOutcome {
        let was_in_flight = self.in_flight.contains(&ticket);
        self.in_flight.retain(|t| *t != ticket);
        // A confirmation older than one already applied must not roll the tags back
        let newest = self.last_confirmed.map_or(true, |confirmed| ticket > confirmed);

        let outcome = match result {
            Ok(tags) if was_in_flight && newest => {
                self.last_confirmed = Some(ticket);
                let changed = self.model.set_tags(tags);
                tracing::info!(
                    rule_key = self.model.key(),
                    tags = ?self.model.tags(),
                    "Rule tags updated"
                );
                UpdateOutcome::Updated { changed }
            }
            Ok(_) => UpdateOutcome::Stale,
            Err(e) => {
                tracing::warn!(ticket, error = %e, "Failed to update rule tags");
                UpdateOutcome::Failed(e.summary())
            }
        };

        // Edit mode ends however the request ended
        if self.state == (EditState::Submitting { ticket }) {
            self.cancel_edit();
        }

        outcome
    }

    // ===== Rendering data and focus =====

    pub fn serialize(&self) -> MetaViewData {
        serialize(self.model.get(), &self.app)
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<FieldData> {
        self.serialize().focus_targets().into_iter().nth(self.focus)
    }

    pub fn focus_next(&mut self) {
        let count = self.serialize().focus_targets().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.serialize().focus_targets().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Tooltip text for the focused field
    pub fn focused_hint(&self) -> Option<String> {
        let field = self.focused()?;
        self.tooltips.hint_for(&field.field.id()).map(str::to_string)
    }

    /// Enter on the focused field. Returns true if a filter was queued.
    pub fn activate_focused(&mut self) -> bool {
        match self.focused().and_then(|f| f.filter) {
            Some(query) => {
                self.on_filter_click(query);
                true
            }
            None => false,
        }
    }
}

impl<P: TagPicker> RuleFilter for RuleMetaView<P> {
    fn filter_queue(&mut self) -> &mut Vec<RuleQuery> {
        &mut self.filters
    }
}
