use std::io::BufRead;
use std::thread::JoinHandle;

use kanal::{AsyncSender, Sender};
use ordbok_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

/// Map one line of terminal input to a UI event
pub fn parse_command(line: &str) -> UiEvent {
    match line.trim() {
        ":play" | ":p" => UiEvent::PlayAudio,
        ":quit" | ":q" => UiEvent::Close,
        _ => UiEvent::Submit(line.to_string()),
    }
}

/// Forward lines from `reader` until EOF, `:quit` or cancellation.
/// EOF is reported as `Close`.
pub fn input_loop<R: BufRead>(
    reader: R,
    ui_to_app_tx: &Sender<AppEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    for line in reader.lines() {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let event = parse_command(&line?);
        let close = event == UiEvent::Close;
        ui_to_app_tx.send(AppEvent::UiEvent(event))?;

        if close {
            return Ok(());
        }
    }

    if !cancel.is_cancelled() {
        tracing::debug!("Input closed");
        ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close))?;
    }

    Ok(())
}

/// Read stdin on a dedicated thread. A blocking read can't be interrupted,
/// so the thread is never joined and simply dies with the process.
pub fn spawn_stdin_reader(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("ordbok-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            if let Err(e) = input_loop(stdin.lock(), ui_to_app_tx.as_sync(), &cancel) {
                tracing::error!("Input reader failed: {}", e);
            }
            tracing::info!("Input reader stopping");
        })
}
