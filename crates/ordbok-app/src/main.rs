use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ordbok_config::Config;
use ordbok_core::LookupController;
use ordbok_dictionary::{DictionaryApiClient, DictionaryProvider};
use ordbok_types::LookupState;
use tokio::signal;

mod audio;
mod controller;
mod events;
mod io;
mod profile;
mod state;
mod ui;


use self::controller::AppController;
use self::state::AppState;

/// Look up words in an online dictionary
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Look up a single word, print the result and exit
    #[arg(short, long)]
    word: Option<String>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dictionary language code, e.g. sv or en
    #[arg(short, long)]
    language: Option<String>,

    /// Lookup timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Never launch the audio player
    #[arg(long)]
    no_audio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing();

    // CLI flags > config file > env vars > defaults, merged per key
    let mut config = profile::load_config(args.config.as_deref())?;
    apply_args(&mut config, &args);

    let provider: Arc<dyn DictionaryProvider> = Arc::new(DictionaryApiClient::new(
        &config.network.base_url,
        config.network.timeout(),
    )?);

    if let Some(word) = args.word.as_deref() {
        return lookup_once(word, &config, provider.as_ref()).await;
    }

    let player = audio::player_from_config(&config.audio);
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state).await;
    let mut tasks = controller.spawn_tasks(provider, player).await?;

    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
            }
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    // Give the remaining tasks a moment to flush
    while let Ok(Some(_)) = tokio::time::timeout(Duration::from_secs(1), tasks.join_next()).await {}

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(language) = &args.language {
        config.dictionary.language = language.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.network.timeout_ms = timeout_ms;
    }
    if args.no_audio {
        config.audio.enabled = false;
    }
}

/// Non-interactive mode: exit code 0 only when a definition was found
async fn lookup_once(
    word: &str,
    config: &Config,
    provider: &dyn DictionaryProvider,
) -> anyhow::Result<ExitCode> {
    let mut controller = LookupController::new(config.dictionary.language.clone());
    controller
        .submit(word, provider, config.network.timeout())
        .await;

    let view = controller.view();
    print!("{}", ui::render_view(&view, false));
    if let Some(url) = view.result.audio_url() {
        println!("Audio: {url}");
    }

    Ok(match view.result {
        LookupState::Found { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
