use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use ordbok_core::AudioPlayer;
use ordbok_dictionary::DictionaryProvider;
use ordbok_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let capacity = state.config.read().await.channel_capacity.max(1);

        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(
        &self,
        provider: Arc<dyn DictionaryProvider>,
        player: Arc<dyn AudioPlayer>,
    ) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.clone(),
            self.channels.app_to_ui.0.clone(),
            provider,
            player,
            self.cancel_token.child_token(),
        ));

        // UI loop
        let ui_config = self.state.config.read().await.ui.clone();
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            ui_config,
            tokio::io::stdout(),
            self.cancel_token.child_token(),
        ));

        // Terminal input runs on its own thread, blocking reads can't be cancelled
        spawn_stdin_reader(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        )?;

        self.channels
            .app_to_ui
            .0
            .send(AppEvent::BackendReady)
            .await?;

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
