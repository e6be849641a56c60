//! English definitions via the Free Dictionary API

use serde::Deserialize;

use super::ToolContext;
use crate::http::{endpoint_url, FetchError};

/// The API answers with a list of entries, or an object with a `title`
/// when nothing matched
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DictionaryResponse {
    Entries(Vec<Entry>),
    NoMatch { title: String },
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    #[serde(default)]
    text: Option<String>,
}

pub async fn define_word(ctx: &ToolContext, word: &str) -> String {
    let url = match endpoint_url(
        &ctx.config.endpoints.dictionary,
        &["api", "v2", "entries", "en", word],
    ) {
        Ok(url) => url,
        Err(e) => return format!("An unexpected error occurred: {}", e),
    };

    match ctx.api.get_json::<DictionaryResponse>(url.as_str(), &[]).await {
        Ok(data) => format_definitions(word, &data),
        Err(e) if e.is_not_found() => no_definition(word),
        Err(e @ FetchError::Status { .. }) => format!("Error fetching definition: {}", e),
        Err(e) => format!("An unexpected error occurred: {}", e),
    }
}

fn no_definition(word: &str) -> String {
    format!("No definition found for '{}'.", word)
}

pub fn format_definitions(word: &str, data: &DictionaryResponse) -> String {
    let entries = match data {
        DictionaryResponse::Entries(entries) if !entries.is_empty() => entries,
        _ => return no_definition(word),
    };

    let mut result = format!("Definitions for '{}':\n\n", word);

    for entry in entries {
        for meaning in &entry.meanings {
            result.push_str(&format!("Part of Speech: {}\n", meaning.part_of_speech));

            for (i, definition) in meaning.definitions.iter().enumerate() {
                result.push_str(&format!("{}. {}\n", i + 1, definition.definition));
                if let Some(example) = definition.example.as_deref().filter(|e| !e.is_empty()) {
                    result.push_str(&format!("   Example: \"{}\"\n", example));
                }
                result.push('\n');
            }
        }

        // Only the first phonetic spelling that has text
        if let Some(text) = entry
            .phonetics
            .iter()
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.is_empty())
        {
            result.push_str(&format!("Pronunciation: {}\n", text));
        }
    }

    result.trim().to_string()
}
