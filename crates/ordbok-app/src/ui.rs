use std::fmt::Write as _;

use kanal::AsyncReceiver;
use ordbok_config::ui::UiConfig;
use ordbok_types::{AppEvent, ViewState};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

const HELP: &str = "Type a word and press Enter. :play plays the pronunciation, :quit exits.";

/// Terminal presentation: draws every rendered view to `out`
pub async fn ui_loop<W>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: UiConfig,
    mut out: W,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[UI] Cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::info!("[UI] Channel closed");
                    break;
                }
            },
        };

        match event {
            AppEvent::BackendReady => {
                tracing::debug!("[UI] Backend ready");
                if config.show_hints {
                    out.write_all(format!("{HELP}\n").as_bytes()).await?;
                }
                out.write_all(config.prompt.as_bytes()).await?;
            }
            AppEvent::Render(view) => {
                tracing::debug!("[UI] Rendering {:?}", view.result);
                out.write_all(render_view(&view, config.show_hints).as_bytes())
                    .await?;
                if !view.result.is_loading() {
                    out.write_all(config.prompt.as_bytes()).await?;
                }
            }
            _ => {}
        }
        out.flush().await?;
    }

    out.flush().await?;
    Ok(())
}

/// Text for one view, one line per visible element
pub fn render_view(view: &ViewState, show_hints: bool) -> String {
    let mut text = String::new();

    if let Some(error) = &view.error_message {
        let _ = writeln!(text, "! {error}");
    }

    if let Some(message) = view.result.message() {
        let _ = writeln!(text, "Definition: {message}");
    }

    if show_hints && view.can_play_audio() {
        let _ = writeln!(text, "(:play to hear the pronunciation)");
    }

    text
}
