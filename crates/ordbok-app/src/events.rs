use std::ops::ControlFlow;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use ordbok_core::{AudioPlayer, LookupController};
use ordbok_dictionary::DictionaryProvider;
use ordbok_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod play_audio;
pub mod submit;

use play_audio::handle_play_audio;
use submit::{LookupContext, handle_settled, handle_submit};

/// App's main loop.
///
/// Owns the lookup controller. Lookups run as spawned tasks and report
/// back as `LookupSettled` on `ui_to_app`, so every state change happens
/// here, in arrival order.
pub async fn event_loop(
    state: Arc<AppState>,
    (ui_to_app_tx, ui_to_app_rx): (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    app_to_ui_tx: AsyncSender<AppEvent>,
    provider: Arc<dyn DictionaryProvider>,
    player: Arc<dyn AudioPlayer>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (language, timeout) = {
        let config = state.config.read().await;
        (config.dictionary.language.clone(), config.network.timeout())
    };

    let mut controller = LookupController::with_cancel_root(language, cancel.child_token());
    let context = LookupContext::new(provider, timeout, ui_to_app_tx);

    let metadata = context.provider.metadata();
    tracing::info!(
        "[EVENT_LOOP] Using {} at {} ({}), timeout {:?}",
        metadata.name,
        metadata.base_url,
        controller.language(),
        timeout
    );

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        let flow = handle_events(
            &mut controller,
            &context,
            player.as_ref(),
            &app_to_ui_tx,
            event,
        )
        .await?;

        if flow.is_break() {
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_events(
    controller: &mut LookupController,
    context: &LookupContext,
    player: &dyn AudioPlayer,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::UiEvent(UiEvent::Submit(text)) => {
            handle_submit(text, controller, context, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::PlayAudio) => {
            handle_play_audio(controller, player);
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            tracing::info!("[EVENT_LOOP] Close requested");
            return Ok(ControlFlow::Break(()));
        }
        AppEvent::LookupSettled { seq, result } => {
            handle_settled(seq, result, controller, app_to_ui_tx).await?;
        }
        AppEvent::Render(_) | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(ControlFlow::Continue(()))
}
