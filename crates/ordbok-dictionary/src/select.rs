use crate::LookupError;
use crate::types::Entry;

/// The one definition shown for a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub definition: String,
    pub audio_url: Option<String>,
}

/// First definition of the first meaning of the first entry.
///
/// Audio comes from the first phonetic of that entry only; later
/// phonetics are not scanned. Empty strings count as absent. Later
/// entries are never inspected.
pub fn select_first(entries: &[Entry]) -> Result<Option<Selection>, LookupError> {
    let Some(entry) = entries.first() else {
        return Ok(None);
    };

    let Some(definition) = entry.first_definition()?.filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    let audio_url = entry
        .first_audio()
        .filter(|audio| !audio.is_empty())
        .map(str::to_string);

    Ok(Some(Selection {
        definition: definition.to_string(),
        audio_url,
    }))
}
