use std::process::Stdio;
use std::sync::Arc;

use ordbok_config::audio::AudioConfig;
use ordbok_core::AudioPlayer;

/// Plays pronunciations by launching an external player with the URL
pub struct CommandAudioPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandAudioPlayer {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl AudioPlayer for CommandAudioPlayer {
    fn play(&self, url: &str) {
        let spawned = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to start audio player '{}': {}", self.program, e);
                return;
            }
        };

        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => tracing::debug!("{} finished", program),
                Ok(status) => tracing::warn!("{} exited with {}", program, status),
                Err(e) => tracing::warn!("Failed waiting for {}: {}", program, e),
            }
        });
    }
}

pub struct DisabledAudioPlayer;

impl AudioPlayer for DisabledAudioPlayer {
    fn play(&self, url: &str) {
        tracing::info!("Audio disabled, not playing {}", url);
    }
}

pub fn player_from_config(config: &AudioConfig) -> Arc<dyn AudioPlayer> {
    if config.enabled && !config.player.is_empty() {
        Arc::new(CommandAudioPlayer::new(
            config.player.clone(),
            config.player_args.clone(),
        ))
    } else {
        tracing::warn!("Audio playback disabled");
        Arc::new(DisabledAudioPlayer)
    }
}
