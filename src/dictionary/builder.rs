//! Loading, merging and sanitizing dictionary sources.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use super::Dictionary;
use super::flatten::{
    flatten_json,
    unwrap_scope,
};
use super::sanitize::sanitize;
use crate::types::{
    Diagnostic,
    DiagnosticKind,
};

/// Result of [`DictionaryBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub dictionary: Dictionary,
    /// Sources that contributed entries, in merge order.
    pub loaded: Vec<PathBuf>,
    /// One entry per skipped source.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a [`Dictionary`] out of JSON files.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder<'a> {
    key_separator: &'a str,
    /// File codes whose single-key wrapper object is unwrapped.
    scopes: Vec<String>,
}

impl<'a> DictionaryBuilder<'a> {
    #[must_use]
    pub const fn new(key_separator: &'a str) -> Self {
        Self { key_separator, scopes: Vec::new() }
    }

    /// Accepts `{"<scope>": {...}}` sources as if the inner object were the root.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    /// Merges every readable source (later sources win) and sanitizes the values.
    ///
    /// A source that cannot be read or parsed is skipped with a diagnostic;
    /// it never aborts the build.
    #[must_use]
    pub fn build<P: AsRef<Path>>(&self, sources: &[P]) -> BuildOutput {
        let mut output = BuildOutput::default();
        let mut merged: HashMap<String, String> = HashMap::new();

        for source in sources {
            let path = source.as_ref();
            match self.load_source(path) {
                Ok(entries) => {
                    tracing::debug!(
                        path = %path.display(),
                        entries = entries.len(),
                        "Loaded dictionary source"
                    );
                    merged.extend(entries);
                    output.loaded.push(path.to_path_buf());
                }
                Err(kind) => output.diagnostics.push(Diagnostic::new(kind, path)),
            }
        }

        output.dictionary =
            merged.into_iter().map(|(key, value)| (key, sanitize(&value))).collect();
        output
    }

    fn load_source(&self, path: &Path) -> Result<HashMap<String, String>, DiagnosticKind> {
        let bytes =
            std::fs::read(path).map_err(|e| DiagnosticKind::SourceRead { reason: e.to_string() })?;
        let text = String::from_utf8(bytes)
            .map_err(|e| DiagnosticKind::SourceRead { reason: e.to_string() })?;

        self.parse_source(&text)
    }

    /// Parses one source text into unsanitized flat entries.
    ///
    /// # Errors
    /// - `SourceEncoding` when the text starts with a byte-order mark
    /// - `SourceParse` when the text is not a JSON object
    pub fn parse_source(&self, text: &str) -> Result<HashMap<String, String>, DiagnosticKind> {
        if text.starts_with('\u{feff}') {
            return Err(DiagnosticKind::SourceEncoding);
        }

        let json: Value = serde_json::from_str(text)
            .map_err(|e| DiagnosticKind::SourceParse { reason: e.to_string() })?;

        let root = unwrap_scope(&json, &self.scopes);
        if !root.is_object() {
            return Err(DiagnosticKind::SourceParse {
                reason: "expected a JSON object at the root".to_string(),
            });
        }

        Ok(flatten_json(root, self.key_separator, None))
    }
}
