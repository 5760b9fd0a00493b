/// Lifecycle of the tag editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    ReadOnly,
    /// Waiting for the tag vocabulary; `ticket` identifies the request
    FetchingVocabulary { ticket: u64 },
    Editing,
    /// Waiting for the server to store the new tags
    Submitting { ticket: u64 },
}

impl EditState {
    pub fn label(&self) -> &'static str {
        match self {
            EditState::ReadOnly => "",
            EditState::FetchingVocabulary { .. } => "Loading tags…",
            EditState::Editing => "Editing tags",
            EditState::Submitting { .. } => "Saving tags…",
        }
    }
}

/// Which of the two mutually exclusive tag regions is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRegion {
    List,
    EditForm,
}

/// State that only exists while the picker is up.
///
/// The buffer is captured once, when the picker is activated, and is what a
/// cancel puts back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    buffered_tags: Vec<String>,
}

impl EditSession {
    pub fn start(buffered_tags: Vec<String>) -> Self {
        Self { buffered_tags }
    }

    pub fn buffered_tags(&self) -> &[String] {
        &self.buffered_tags
    }

    pub fn into_buffered_tags(self) -> Vec<String> {
        self.buffered_tags
    }
}
