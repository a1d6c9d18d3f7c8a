use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_show_hints() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Print the command help line and the audio hint
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_hints: default_show_hints(),
        }
    }
}
