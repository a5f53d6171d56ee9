//! Applies a dictionary to the documents of one subtree.

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use super::scanner::render;
use crate::config::{
    DocumentsConfig,
    InjectorSettings,
    PlaceholderConfig,
};
use crate::dictionary::Dictionary;
use crate::types::{
    Diagnostic,
    DiagnosticKind,
};
use crate::workspace::write_atomic;

/// Outcome of [`Injector::inject`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy)]
pub struct Injector<'a> {
    documents: &'a DocumentsConfig,
    placeholders: &'a PlaceholderConfig,
}

impl<'a> Injector<'a> {
    #[must_use]
    pub const fn new(settings: &'a InjectorSettings) -> Self {
        Self { documents: &settings.documents, placeholders: &settings.placeholders }
    }

    /// Aggregate previews and files without the document extension are never touched.
    #[must_use]
    pub fn is_skipped(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
            return true;
        };

        name.ends_with(self.documents.aggregate_suffix.as_str())
            || !name.ends_with(self.documents.extension.as_str())
    }

    /// Rewrites every eligible document in place.
    ///
    /// Missing keys and per-document I/O failures end up in the report; the
    /// remaining documents are still processed.
    #[must_use]
    pub fn inject<P: AsRef<Path>>(
        &self,
        documents: &[P],
        dictionary: &Dictionary,
    ) -> InjectionReport {
        let mut report = InjectionReport::default();

        for document in documents {
            let path = document.as_ref();
            if self.is_skipped(path) {
                tracing::debug!(path = %path.display(), "skipped");
                report.skipped.push(path.to_path_buf());
                continue;
            }

            match self.inject_document(path, dictionary) {
                Ok(missing) => {
                    tracing::debug!(path = %path.display(), "Completed processing file");
                    report.diagnostics.extend(missing);
                    report.rewritten.push(path.to_path_buf());
                }
                Err(kind) => report.diagnostics.push(Diagnostic::new(kind, path)),
            }
        }

        report
    }

    fn inject_document(
        &self,
        path: &Path,
        dictionary: &Dictionary,
    ) -> Result<Vec<Diagnostic>, DiagnosticKind> {
        let io_error = |e: std::io::Error| DiagnosticKind::DocumentIo { reason: e.to_string() };

        let text = fs::read_to_string(path).map_err(io_error)?;
        let rendered = render(&text, dictionary, self.placeholders);
        write_atomic(path, &rendered.text).map_err(io_error)?;

        Ok(rendered
            .missing
            .iter()
            .map(|missing| Diagnostic::missing_key(path, &missing.token, &missing.key))
            .collect())
    }
}
