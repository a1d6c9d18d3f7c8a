/// Pronunciation playback capability.
///
/// Fire-and-forget: implementations must return promptly and report
/// their own failures, nothing flows back into the lookup state.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, url: &str);
}
