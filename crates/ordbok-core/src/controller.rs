use std::time::Duration;

use ordbok_dictionary::DictionaryProvider;
use ordbok_types::{LookupState, ViewState, messages};
use tokio_util::sync::CancellationToken;

use crate::audio::AudioPlayer;
use crate::lookup::{LookupOutcome, perform_lookup, settle};
use crate::query::{Query, ValidationError};

/// One outstanding lookup
#[derive(Debug, Clone)]
pub struct LookupTicket {
    /// Monotonically increasing per controller, starting at 1
    pub seq: u64,
    pub query: Query,
    pub language: String,
    /// Cancelled as soon as a newer lookup begins
    pub cancel: CancellationToken,
}

/// Owns the lookup state and enforces "latest submission wins".
///
/// Every valid submission gets a fresh sequence number and cancels the
/// previous in-flight lookup. Results are only applied when their sequence
/// number is still the latest and the state is still `Loading`, so a slow
/// earlier response can never overwrite a newer one.
pub struct LookupController {
    language: String,
    query: String,
    error_message: Option<String>,
    state: LookupState,
    latest_seq: u64,
    in_flight: Option<CancellationToken>,
    cancel_root: CancellationToken,
}

impl LookupController {
    pub fn new(language: impl Into<String>) -> Self {
        Self::with_cancel_root(language, CancellationToken::new())
    }

    /// Tickets are children of `cancel_root`, cancelling it aborts any lookup
    pub fn with_cancel_root(language: impl Into<String>, cancel_root: CancellationToken) -> Self {
        Self {
            language: language.into(),
            query: String::new(),
            error_message: None,
            state: LookupState::Empty,
            latest_seq: 0,
            in_flight: None,
            cancel_root,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Raw text of the last submission
    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Validate `raw` and move to `Loading`.
    ///
    /// On empty input only the error message changes and no ticket is issued.
    pub fn begin(&mut self, raw: &str) -> Result<LookupTicket, ValidationError> {
        self.query = raw.to_string();

        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!("Rejected submission: {}", e);
                self.error_message = Some(e.to_string());
                return Err(e);
            }
        };

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!("Cancelling lookup #{}", self.latest_seq);
            previous.cancel();
        }

        self.error_message = None;
        self.latest_seq += 1;

        let cancel = self.cancel_root.child_token();
        self.in_flight = Some(cancel.clone());
        self.state = LookupState::Loading;

        tracing::info!("Lookup #{} for '{}' ({})", self.latest_seq, query, self.language);

        Ok(LookupTicket {
            seq: self.latest_seq,
            query,
            language: self.language.clone(),
            cancel,
        })
    }

    /// Apply the outcome of lookup `seq`. Returns false if it was stale.
    pub fn resolve(&mut self, seq: u64, outcome: LookupOutcome) -> bool {
        if !self.accepts(seq) {
            self.log_stale(seq);
            return false;
        }

        self.apply(seq, settle(outcome))
    }

    /// Apply an already settled state for lookup `seq`.
    ///
    /// `Empty` and `Loading` are not terminal and are rejected.
    pub fn apply(&mut self, seq: u64, state: LookupState) -> bool {
        if !state.is_settled() {
            tracing::warn!("Lookup #{} reported non-terminal state {:?}", seq, state);
            return false;
        }

        if !self.accepts(seq) {
            self.log_stale(seq);
            return false;
        }

        self.in_flight = None;
        self.state = state;
        tracing::debug!("Lookup #{} settled: {:?}", seq, self.state);
        true
    }

    fn log_stale(&self, seq: u64) {
        tracing::debug!(
            "Discarding result of lookup #{} (latest #{})",
            seq,
            self.latest_seq
        );
    }

    /// Settle lookup `seq` as failed without an outcome, e.g. after its
    /// ticket was cancelled from outside. Returns false if it was stale.
    pub fn abort(&mut self, seq: u64) -> bool {
        if !self.accepts(seq) {
            return false;
        }

        tracing::warn!("Lookup #{} aborted", seq);
        self.in_flight = None;
        self.state = LookupState::Error {
            message: messages::LOOKUP_FAILED.to_string(),
        };
        true
    }

    fn accepts(&self, seq: u64) -> bool {
        seq == self.latest_seq && self.state.is_loading()
    }

    /// Validate, look up and settle in one go
    pub async fn submit<P>(&mut self, raw: &str, provider: &P, timeout: Duration) -> &LookupState
    where
        P: DictionaryProvider + ?Sized,
    {
        let ticket = match self.begin(raw) {
            Ok(ticket) => ticket,
            Err(_) => return &self.state,
        };

        match perform_lookup(provider, &ticket, timeout).await {
            Some(outcome) => {
                self.resolve(ticket.seq, outcome);
            }
            None => {
                self.abort(ticket.seq);
            }
        }

        &self.state
    }

    /// Hand the current audio URL to `player`. False when there is none.
    pub fn play_audio(&self, player: &dyn AudioPlayer) -> bool {
        match self.state.audio_url() {
            Some(url) => {
                tracing::debug!("Playing {}", url);
                player.play(url);
                true
            }
            None => {
                tracing::debug!("No audio to play");
                false
            }
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            query: self.query.clone(),
            error_message: self.error_message.clone(),
            result: self.state.clone(),
        }
    }
}
