use ordbok_core::{AudioPlayer, LookupController};

pub fn handle_play_audio(controller: &LookupController, player: &dyn AudioPlayer) {
    if !controller.play_audio(player) {
        tracing::info!("No pronunciation available for '{}'", controller.query_text());
    }
}
