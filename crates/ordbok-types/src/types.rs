use serde::{Deserialize, Serialize};

use crate::messages;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Fresh snapshot for the presentation layer
    Render(ViewState),
    /// A spawned lookup finished. `result` is `None` when it was cancelled.
    LookupSettled {
        seq: u64,
        result: Option<LookupState>,
    },
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit(String),
    PlayAudio,
    Close,
}

/// Outcome of the current lookup cycle.
///
/// Exactly one variant is active, so "loading with a definition" or
/// "error with audio" cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Empty,
    Loading,
    Found {
        definition: String,
        audio_url: Option<String>,
    },
    NotFound,
    Error {
        message: String,
    },
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn has_error(&self) -> bool {
        matches!(self, LookupState::Error { .. })
    }

    /// Audio URL, only ever present on a found definition
    pub fn audio_url(&self) -> Option<&str> {
        match self {
            LookupState::Found { audio_url, .. } => audio_url.as_deref(),
            _ => None,
        }
    }

    pub fn definition(&self) -> Option<&str> {
        match self {
            LookupState::Found { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// Text the presentation layer shows under the definition heading
    pub fn message(&self) -> Option<&str> {
        match self {
            LookupState::Empty => None,
            LookupState::Loading => Some(messages::LOADING),
            LookupState::Found { definition, .. } => Some(definition),
            LookupState::NotFound => Some(messages::NOT_FOUND),
            LookupState::Error { message } => Some(message),
        }
    }

    /// Loading is the only non-settled state besides the initial one
    pub fn is_settled(&self) -> bool {
        !matches!(self, LookupState::Empty | LookupState::Loading)
    }
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Raw text of the last submission, untrimmed
    pub query: String,
    /// Validation failure only; lookup failures live in `result`
    pub error_message: Option<String>,
    pub result: LookupState,
}

impl ViewState {
    pub fn can_play_audio(&self) -> bool {
        self.result.audio_url().is_some()
    }
}
