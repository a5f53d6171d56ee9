//! Core types used throughout the project.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

/// How serious a diagnostic is. Neither level aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong with a single file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Dictionary source starts with a UTF-8 byte-order mark.
    SourceEncoding,
    /// Dictionary source is not a JSON object.
    SourceParse { reason: String },
    /// Dictionary source could not be read as UTF-8 text.
    SourceRead { reason: String },
    /// Placeholder without a dictionary entry; the token stays in the output.
    MissingKey { token: String, key: String },
    /// Document could not be read or replaced.
    DocumentIo { reason: String },
    /// Subtree could not be listed; none of its documents were injected.
    SubtreeRead { reason: String },
}

/// A per-file finding, returned to the caller instead of printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, file: impl Into<PathBuf>) -> Self {
        Self { kind, file: file.into() }
    }

    #[must_use]
    pub fn missing_key(file: &Path, token: &str, key: &str) -> Self {
        Self::new(
            DiagnosticKind::MissingKey { token: token.to_string(), key: key.to_string() },
            file,
        )
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::MissingKey { .. } => Severity::Warning,
            DiagnosticKind::SourceEncoding
            | DiagnosticKind::SourceParse { .. }
            | DiagnosticKind::SourceRead { .. }
            | DiagnosticKind::DocumentIo { .. }
            | DiagnosticKind::SubtreeRead { .. } => Severity::Error,
        }
    }

    /// Key of a `MissingKey` diagnostic.
    #[must_use]
    pub fn missing_key_name(&self) -> Option<&str> {
        match &self.kind {
            DiagnosticKind::MissingKey { key, .. } => Some(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::SourceEncoding => {
                "Unexpected UTF-8 BOM. Check resource file encoding (must be UTF-8 without BOM)"
                    .to_string()
            }
            DiagnosticKind::SourceParse { reason } => format!("Failed to parse JSON: {reason}"),
            DiagnosticKind::SourceRead { reason } => {
                format!("Failed to read dictionary file: {reason}")
            }
            DiagnosticKind::MissingKey { token, .. } => format!("Key {token} is missing"),
            DiagnosticKind::DocumentIo { reason } => {
                format!("Failed to rewrite document: {reason}")
            }
            DiagnosticKind::SubtreeRead { reason } => format!("Failed to list folder: {reason}"),
        }
    }

    /// Emits the diagnostic through `tracing` at its severity.
    pub fn log(&self) {
        match self.severity() {
            Severity::Warning => {
                tracing::warn!(file = %self.file.display(), "{}", self.message());
            }
            Severity::Error => {
                tracing::error!(file = %self.file.display(), "{}", self.message());
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message())
    }
}
