//! Modifier tokenizer for the tail of a structured command.

use std::collections::BTreeMap;

use mender_protocol::FLAG_TRUE;

/// Split the text after intent/target into modifier key/value pairs.
///
/// Each whitespace-separated token is read as, in order:
/// - `key=value` (leading dashes stripped from the key),
/// - `--key value` when the next token does not start with a dash,
/// - `--key` alone, stored as `"true"`,
/// - a bare word, stored as a flag named after the word.
///
/// Keys and values keep their original case. Later duplicates win.
pub fn tokenize_modifiers(tail: &str) -> BTreeMap<String, String> {
    let tokens: Vec<&str> = tail.split_whitespace().collect();
    let mut modifiers = BTreeMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        i += 1;

        if let Some((key, value)) = token.split_once('=') {
            insert(&mut modifiers, strip_dashes(key), value);
            continue;
        }

        if token.starts_with('-') {
            let key = strip_dashes(token);
            match tokens.get(i) {
                Some(next) if !next.starts_with('-') => {
                    insert(&mut modifiers, key, next);
                    i += 1;
                }
                _ => insert(&mut modifiers, key, FLAG_TRUE),
            }
            continue;
        }

        insert(&mut modifiers, token, FLAG_TRUE);
    }

    modifiers
}

/// Remove at most two leading dashes.
fn strip_dashes(token: &str) -> &str {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token)
}

fn insert(modifiers: &mut BTreeMap<String, String>, key: &str, value: &str) {
    // A lone "-" or "--" carries no name.
    if key.is_empty() {
        return;
    }
    modifiers.insert(key.to_string(), value.to_string());
}
