//! crates/fridge_core/src/voice.rs
//!
//! Turns a spoken transcript into an app command.
//!
//! Matching is keyword based on the lowercased transcript. Anything unrecognised
//! becomes [`VoiceCommand::Unknown`] so the caller can ask the user to rephrase.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum VoiceCommand {
    AddItem { name: String },
    RemoveItem { name: String },
    RemoveExpired,
    AddToShoppingList { name: String },
    ListExpiring,
    SuggestRecipes,
    ReadShoppingList,
    Unknown { transcript: String },
}

const SHOPPING_SUFFIXES: &[&str] = &[
    " to the shopping list",
    " to my shopping list",
    " to shopping list",
    " to the list",
];

const FILLER_PREFIXES: &[&str] = &["some ", "a ", "an ", "the ", "my "];

impl VoiceCommand {
    pub fn parse(transcript: &str) -> Self {
        let text = normalize(transcript);

        // Removal verbs win over the "expir" query so "remove expired items" clears them.
        let removal = strip_verb(&text, &["remove ", "delete ", "throw out ", "clear "]);
        if removal.is_some_and(|rest| rest.contains("expired")) {
            return VoiceCommand::RemoveExpired;
        }
        if text.contains("expir") || text.contains("going bad") || text.contains("use first") {
            return VoiceCommand::ListExpiring;
        }
        if text.contains("recipe") || text.contains("what can i cook") || text.contains("what should i cook") {
            return VoiceCommand::SuggestRecipes;
        }
        if text.contains("shopping list")
            && (text.starts_with("read") || text.starts_with("what") || text.starts_with("show"))
        {
            return VoiceCommand::ReadShoppingList;
        }

        if let Some(rest) = strip_verb(&text, &["add ", "put "]) {
            if let Some(name) = SHOPPING_SUFFIXES.iter().find_map(|s| rest.strip_suffix(s)) {
                if let Some(name) = item_name(name) {
                    return VoiceCommand::AddToShoppingList { name };
                }
            } else if let Some(name) = item_name(rest.trim_end_matches(" to the fridge")) {
                return VoiceCommand::AddItem { name };
            }
        }
        if let Some(rest) = strip_verb(&text, &["remove ", "delete ", "i used up ", "i finished "]) {
            if let Some(name) = item_name(rest.trim_end_matches(" from the fridge")) {
                return VoiceCommand::RemoveItem { name };
            }
        }

        VoiceCommand::Unknown {
            transcript: transcript.trim().to_string(),
        }
    }
}

fn normalize(transcript: &str) -> String {
    transcript
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_verb<'a>(text: &'a str, verbs: &[&str]) -> Option<&'a str> {
    let text = text.strip_prefix("please ").unwrap_or(text);
    verbs.iter().find_map(|verb| text.strip_prefix(verb))
}

fn item_name(raw: &str) -> Option<String> {
    let mut name = raw.trim();
    for filler in FILLER_PREFIXES {
        if let Some(rest) = name.strip_prefix(filler) {
            name = rest;
            break;
        }
    }
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
