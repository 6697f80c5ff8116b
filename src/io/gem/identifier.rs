//! Identifier handling on both sides of the codec.
//!
//! Reading: display names may carry a trailing `[identifier]` tag; without
//! one an identifier is derived from the cleaned name. Writing: rooms (and
//! shade groups and special shades) are renamed to a two letter code plus a
//! six digit counter.

use crate::error::{GemError, Result};
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Longest identifier produced by [`clean_string`]
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

/// Prefix used when a display name yields no valid two letter code
pub const FALLBACK_CODE: &str = "RM";

/// Replace characters outside `[A-Za-z0-9_.-]` with `_`, collapse runs and cap the length
pub fn clean_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_replaced = false;
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
            last_replaced = false;
        } else if !last_replaced {
            out.push('_');
            last_replaced = true;
        }
    }
    out.chars().take(MAX_IDENTIFIER_LENGTH).collect()
}

/// Collapse whitespace runs (newlines included) to single spaces
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `"<name> [<id>]"` into name and identifier.
///
/// Returns `Ok(None)` when the name carries no tag.
pub fn parse_identifier_tag(full_name: &str) -> Result<Option<(String, String)>> {
    let trimmed = full_name.trim_end();
    if !trimmed.ends_with(']') {
        return Ok(None);
    }
    let open = trimmed
        .rfind('[')
        .ok_or_else(|| GemError::MalformedIdentifier(full_name.to_string()))?;
    let identifier = &trimmed[open + 1..trimmed.len() - 1];
    if identifier.is_empty() || identifier.chars().any(char::is_whitespace) {
        return Err(GemError::MalformedIdentifier(full_name.to_string()));
    }
    let name = trimmed[..open].trim_end().to_string();
    Ok(Some((name, identifier.to_string())))
}

/// Display name and identifier of a record name line
pub fn name_and_identifier(full_name: &str) -> Result<(String, String)> {
    match parse_identifier_tag(full_name)? {
        Some(pair) => Ok(pair),
        None => {
            let name = full_name.trim().to_string();
            let identifier = clean_string(&name);
            Ok((name, identifier))
        }
    }
}

/// Makes identifiers unique within one document by appending `_1`, `_2`, ...
#[derive(Debug, Default)]
pub struct IdentifierDeduplicator {
    seen: AHashMap<String, usize>,
}

impl IdentifierDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique(&mut self, identifier: &str) -> String {
        let mut count = match self.seen.get(identifier) {
            Some(&count) => count,
            None => {
                self.seen.insert(identifier.to_string(), 1);
                return identifier.to_string();
            }
        };
        loop {
            let candidate = format!("{}_{}", identifier, count);
            count += 1;
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(identifier.to_string(), count);
                self.seen.insert(candidate.clone(), 1);
                return candidate;
            }
        }
    }
}

/// Two letter code of a display name: vowels, whitespace and symbols removed, upper-cased.
///
/// Fails when fewer than two characters survive.
pub fn short_code(display_name: &str) -> Result<String> {
    let code: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() && !"aeiouAEIOU".contains(*c))
        .map(|c| c.to_ascii_uppercase())
        .take(2)
        .collect();
    if code.len() < 2 {
        return Err(GemError::InvalidName(display_name.to_string()));
    }
    Ok(code)
}

/// Output identifiers must start with a letter
fn is_valid_code(code: &str) -> bool {
    code.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

/// Old room identifier to new identifier, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierMap(pub IndexMap<String, String>);

impl IdentifierMap {
    pub fn get(&self, old: &str) -> Option<&str> {
        self.0.get(old).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Pretty JSON object `{ "old": "new", ... }`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Generates `XX000000` style identifiers with one counter per code
#[derive(Debug, Default)]
pub struct IdentifierMapper {
    counters: AHashMap<String, u32>,
    map: IdentifierMap,
}

impl IdentifierMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for a display name, falling back to [`FALLBACK_CODE`]
    pub fn next_identifier(&mut self, display_name: &str) -> String {
        let code = match short_code(display_name) {
            Ok(code) if is_valid_code(&code) => code,
            _ => FALLBACK_CODE.to_string(),
        };
        let counter = self.counters.entry(code.clone()).or_insert(0);
        let identifier = format!("{}{:06}", code, counter);
        *counter += 1;
        identifier
    }

    /// Rename a room and record the mapping
    pub fn remap_room(&mut self, old_identifier: &str, display_name: &str) -> String {
        let new_identifier = self.next_identifier(display_name);
        self.map
            .0
            .insert(old_identifier.to_string(), new_identifier.clone());
        new_identifier
    }

    pub fn map(&self) -> &IdentifierMap {
        &self.map
    }

    pub fn into_map(self) -> IdentifierMap {
        self.map
    }
}
