use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use ordbok_core::{LookupController, LookupTicket, perform_lookup, settle};
use ordbok_dictionary::DictionaryProvider;
use ordbok_types::{AppEvent, LookupState};

/// Dependencies a spawned lookup needs
#[derive(Clone)]
pub struct LookupContext {
    pub provider: Arc<dyn DictionaryProvider>,
    pub timeout: Duration,
    /// Back into the event loop
    pub events_tx: AsyncSender<AppEvent>,
}

impl LookupContext {
    pub fn new(
        provider: Arc<dyn DictionaryProvider>,
        timeout: Duration,
        events_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            provider,
            timeout,
            events_tx,
        }
    }
}

pub async fn handle_submit(
    text: String,
    controller: &mut LookupController,
    context: &LookupContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match controller.begin(&text) {
        Ok(ticket) => spawn_lookup(context.clone(), ticket),
        Err(e) => tracing::debug!("Submission rejected: {}", e),
    }

    app_to_ui_tx.send(AppEvent::Render(controller.view())).await?;
    Ok(())
}

fn spawn_lookup(context: LookupContext, ticket: LookupTicket) {
    tokio::spawn(async move {
        let result = perform_lookup(context.provider.as_ref(), &ticket, context.timeout)
            .await
            .map(settle);

        let event = AppEvent::LookupSettled {
            seq: ticket.seq,
            result,
        };
        if let Err(e) = context.events_tx.send(event).await {
            tracing::error!("Failed to report lookup #{}: {}", ticket.seq, e);
        }
    });
}

pub async fn handle_settled(
    seq: u64,
    result: Option<LookupState>,
    controller: &mut LookupController,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let applied = match result {
        Some(state) => controller.apply(seq, state),
        None => controller.abort(seq),
    };

    if applied {
        app_to_ui_tx.send(AppEvent::Render(controller.view())).await?;
    }

    Ok(())
}
