use std::time::Duration;

use ordbok_dictionary::{DictionaryProvider, Entry, LookupError, select_first};
use ordbok_types::{LookupState, messages};

use crate::controller::LookupTicket;

pub type LookupOutcome = Result<Vec<Entry>, LookupError>;

/// Run the request for `ticket`, bounded by `timeout`.
///
/// Returns `None` when the ticket was cancelled by a newer submission;
/// the caller must not resolve anything in that case.
pub async fn perform_lookup<P>(
    provider: &P,
    ticket: &LookupTicket,
    timeout: Duration,
) -> Option<LookupOutcome>
where
    P: DictionaryProvider + ?Sized,
{
    let request = provider.lookup(ticket.query.as_str(), &ticket.language);

    tokio::select! {
        biased;
        _ = ticket.cancel.cancelled() => {
            tracing::debug!("Lookup #{} for '{}' cancelled", ticket.seq, ticket.query);
            None
        }
        result = tokio::time::timeout(timeout, request) => {
            Some(result.unwrap_or(Err(LookupError::Timeout(timeout))))
        }
    }
}

/// Map a provider outcome onto the terminal lookup state
pub fn settle(outcome: LookupOutcome) -> LookupState {
    match outcome {
        Ok(entries) => match select_first(&entries) {
            Ok(Some(selection)) => LookupState::Found {
                definition: selection.definition,
                audio_url: selection.audio_url,
            },
            Ok(None) => LookupState::NotFound,
            Err(e) => {
                tracing::warn!("Unusable dictionary entry: {}", e);
                LookupState::Error {
                    message: messages::LOOKUP_FAILED.to_string(),
                }
            }
        },
        Err(LookupError::Status {
            status,
            status_text,
        }) => {
            tracing::warn!("Dictionary answered HTTP {}", status);
            LookupState::Error {
                message: format!("{} {}", messages::SERVER_PROBLEM, status_text),
            }
        }
        Err(e) => {
            tracing::warn!("Lookup failed: {}", e);
            LookupState::Error {
                message: messages::LOOKUP_FAILED.to_string(),
            }
        }
    }
}
