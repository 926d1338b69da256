//! Parsing of serialized `[{"name": ...}, ...]` list literals.
//!
//! The movies table stores production countries and genres as list literals
//! inside a single CSV cell. They are parsed against a fixed schema and any
//! structural mismatch yields an empty list; callers never see an error.
//!
//! Both JSON (`"name"`) and Python-style (`'name'`) quoting are accepted.

use serde::Deserialize;
use std::borrow::Cow;

/// Entry where `name` may be absent (such entries are skipped)
#[derive(Debug, Deserialize)]
struct NamedEntry {
    #[serde(default)]
    name: Option<String>,
}

/// Entry where `name` is mandatory
#[derive(Debug, Deserialize)]
struct StrictNamedEntry {
    name: String,
}

/// Extract `name` values, skipping entries that have none.
///
/// Used for production countries.
pub fn parse_named_list(raw: &str) -> Vec<String> {
    decode::<NamedEntry>(raw)
        .map(|entries| entries.into_iter().filter_map(|e| e.name).collect())
        .unwrap_or_default()
}

/// Extract `name` values; a single entry without one empties the whole list.
///
/// Used for genres.
pub fn parse_strict_named_list(raw: &str) -> Vec<String> {
    decode::<StrictNamedEntry>(raw)
        .map(|entries| entries.into_iter().map(|e| e.name).collect())
        .unwrap_or_default()
}

fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Option<Vec<T>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(entries) = serde_json::from_str::<Vec<T>>(raw) {
        return Some(entries);
    }
    let normalised = single_to_double_quotes(raw)?;
    serde_json::from_str::<Vec<T>>(&normalised).ok()
}

/// Rewrite single-quoted string literals as JSON strings.
///
/// Returns `None` when a string is left unterminated.
fn single_to_double_quotes(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('\'') {
        return Some(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len() + 8);
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                out.push('"');
                loop {
                    match chars.next()? {
                        '\'' => break,
                        '"' => out.push_str("\\\""),
                        '\\' => match chars.next()? {
                            '\'' => out.push('\''),
                            other => {
                                out.push('\\');
                                out.push(other);
                            }
                        },
                        other => out.push(other),
                    }
                }
                out.push('"');
            }
            '"' => {
                out.push('"');
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => {
                            out.push('\\');
                            out.push(chars.next()?);
                        }
                        other => out.push(other),
                    }
                }
                out.push('"');
            }
            other => out.push(other),
        }
    }
    Some(Cow::Owned(out))
}
