use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ordbok_dictionary::{DictionaryProvider, Entry, LookupError, ProviderMetadata};
use serde_json::json;

use crate::audio::AudioPlayer;
use crate::lookup::LookupOutcome;

pub fn entries(definition: &str, audio: Option<&str>) -> Vec<Entry> {
    vec![Entry::new(json!({
        "word": "hund",
        "phonetics": [{ "audio": audio }],
        "meanings": [{
            "partOfSpeech": "noun",
            "definitions": [{ "definition": definition }],
        }],
    }))]
}

pub fn parse_error() -> LookupError {
    LookupError::Parse(serde_json::from_str::<Vec<Entry>>("{").unwrap_err())
}

type Respond = Box<dyn Fn(&str) -> LookupOutcome + Send + Sync>;

pub struct FakeProvider {
    respond: Option<Respond>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<(String, String)>>,
}

impl FakeProvider {
    pub fn new(respond: impl Fn(&str) -> LookupOutcome + Send + Sync + 'static) -> Self {
        Self {
            respond: Some(Box::new(respond)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Never answers
    pub fn hanging() -> Self {
        Self {
            respond: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for FakeProvider {
    async fn lookup(&self, word: &str, language: &str) -> Result<Vec<Entry>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((word.to_string(), language.to_string()));

        match &self.respond {
            Some(respond) => respond(word),
            None => std::future::pending().await,
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            base_url: "http://localhost".to_string(),
        }
    }
}

#[derive(Default)]
pub struct RecordingPlayer {
    pub played: Mutex<Vec<String>>,
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, url: &str) {
        self.played.lock().unwrap().push(url.to_string());
    }
}
