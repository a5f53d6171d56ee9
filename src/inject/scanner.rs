//! Placeholder scanning and the two rewrite passes.
//!
//! A placeholder is `[[key]]` where `key` is a non-empty run without `[` or
//! `]`. Scanning is left to right; at each `[[` the longest bracket-free run
//! is taken and must be followed by `]]`, otherwise a single `[` is copied
//! through and scanning resumes at the next character.

use crate::config::PlaceholderConfig;
use crate::dictionary::Dictionary;

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// A placeholder that had no dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingToken {
    /// Token text as it appears in the output, e.g. `[[greet]]`.
    pub token: String,
    pub key: String,
}

/// Output of [`render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// In document order; repeated tokens are reported each time.
    pub missing: Vec<MissingToken>,
}

/// Calls `replace` with `(token, key)` for every placeholder in `text`;
/// `None` keeps the token verbatim.
fn rewrite_tokens<F>(text: &str, mut replace: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let (before, candidate) = rest.split_at(start);
        output.push_str(before);

        match split_token(candidate) {
            Some((token, key, after)) => {
                match replace(token, key) {
                    Some(replacement) => output.push_str(&replacement),
                    None => output.push_str(token),
                }
                rest = after;
            }
            None => {
                let (bracket, after) = candidate.split_at(1);
                output.push_str(bracket);
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Splits `[[key]]...` into `(token, key, remainder)`.
fn split_token(candidate: &str) -> Option<(&str, &str, &str)> {
    let inner = candidate.strip_prefix(OPEN)?;
    let key_len = inner.find(['[', ']']).unwrap_or(inner.len());
    let (key, after_key) = inner.split_at(key_len);
    if key.is_empty() {
        return None;
    }

    let after = after_key.strip_prefix(CLOSE)?;
    let (token, _) = candidate.split_at(OPEN.len() + key_len + CLOSE.len());
    Some((token, key, after))
}

/// Rewrites a compound key `a||b` into `b.a`.
///
/// Both operands must be non-empty; operands after the second are dropped.
#[must_use]
pub fn compound_key(key: &str, syntax: &PlaceholderConfig) -> Option<String> {
    let mut operands = key.split(syntax.compound_separator.as_str());
    let first = operands.next().filter(|operand| !operand.is_empty())?;
    let second = operands.next().filter(|operand| !operand.is_empty())?;
    Some(format!("{second}{}{first}", syntax.key_separator))
}

/// Pass 1: `[[a||b]]` becomes `[[b.a]]`. No dictionary lookup happens here.
#[must_use]
pub fn rewrite_compound_tokens(text: &str, syntax: &PlaceholderConfig) -> String {
    rewrite_tokens(text, |_, key| {
        compound_key(key, syntax).map(|key| format!("{OPEN}{key}{CLOSE}"))
    })
}

/// Pass 2: every `[[key]]` found in the dictionary becomes its value.
#[must_use]
pub fn resolve_tokens(text: &str, dictionary: &Dictionary) -> Rendered {
    let mut missing = Vec::new();
    let text = rewrite_tokens(text, |token, key| {
        let value = dictionary.get(key);
        if value.is_none() {
            missing.push(MissingToken { token: token.to_string(), key: key.to_string() });
        }
        value.map(str::to_string)
    });

    Rendered { text, missing }
}

/// Runs both passes over a document's text.
#[must_use]
pub fn render(text: &str, dictionary: &Dictionary, syntax: &PlaceholderConfig) -> Rendered {
    resolve_tokens(&rewrite_compound_tokens(text, syntax), dictionary)
}
