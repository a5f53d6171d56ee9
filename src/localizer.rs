//! One localization run: discover dictionaries, prepare the target tree and
//! inject every language subtree.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::{
    FileMatcher,
    InjectorSettings,
    LanguageMapping,
    MatcherError,
};
use crate::dictionary::DictionaryBuilder;
use crate::inject::Injector;
use crate::language::LanguageResolver;
use crate::types::{
    Diagnostic,
    DiagnosticKind,
};
use crate::workspace::{
    self,
    WorkspaceError,
};

/// Failures that stop a run. Per-file problems are [`Diagnostic`]s instead.
#[derive(Error, Debug)]
pub enum LocalizeError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Root searched recursively for dictionary files
    pub json_root: PathBuf,
    /// Tree copied into `target` before injection
    pub source: PathBuf,
    pub target: PathBuf,
    /// Remove the target's subdirectories before copying
    pub clean_target: bool,
}

/// What happened to one immediate subdirectory of the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtreeReport {
    pub path: PathBuf,
    /// Empty when no folder code matched.
    pub languages: Vec<LanguageMapping>,
    pub sources: Vec<PathBuf>,
    pub dictionary_size: usize,
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Dictionary diagnostics first, then document diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl SubtreeReport {
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.languages.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub dictionary_files: Vec<PathBuf>,
    pub removed_folders: usize,
    pub copied_files: usize,
    pub subtrees: Vec<SubtreeReport>,
}

impl RunReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.subtrees.iter().flat_map(|subtree| subtree.diagnostics.iter())
    }

    #[must_use]
    pub fn rewritten_count(&self) -> usize {
        self.subtrees.iter().map(|subtree| subtree.rewritten.len()).sum()
    }

    #[must_use]
    pub fn missing_key_count(&self) -> usize {
        self.diagnostics()
            .filter(|diagnostic| matches!(diagnostic.kind, DiagnosticKind::MissingKey { .. }))
            .count()
    }
}

/// Drives a run with borrowed settings.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    settings: &'a InjectorSettings,
}

impl<'a> Localizer<'a> {
    #[must_use]
    pub const fn new(settings: &'a InjectorSettings) -> Self {
        Self { settings }
    }

    /// Runs every step in order. Subtrees are processed one after another,
    /// each with its own dictionary.
    ///
    /// # Errors
    /// Invalid dictionary patterns, a missing JSON root or source, or any
    /// failure while cleaning, copying or listing the target.
    pub fn run(&self, options: &RunOptions) -> Result<RunReport, LocalizeError> {
        let mut report = RunReport {
            dictionary_files: self.discover_dictionary_files(&options.json_root)?,
            ..RunReport::default()
        };
        tracing::info!(
            json_root = %options.json_root.display(),
            "Found {} dictionary files",
            report.dictionary_files.len()
        );

        if options.clean_target {
            report.removed_folders = workspace::clean_target(&options.target)?;
        }

        report.copied_files = workspace::copy_tree(&options.source, &options.target)?;
        tracing::info!(
            source = %options.source.display(),
            target = %options.target.display(),
            "Copied {} files",
            report.copied_files
        );

        for subtree in workspace::list_subdirectories(&options.target)? {
            let subtree_report =
                self.localize_subtree(&report.dictionary_files, &subtree, &options.target);
            report.subtrees.push(subtree_report);
        }

        Ok(report)
    }

    /// Dictionary files under `json_root` matching the configured patterns.
    ///
    /// # Errors
    /// Invalid patterns or an unreadable root.
    pub fn discover_dictionary_files(
        &self,
        json_root: &Path,
    ) -> Result<Vec<PathBuf>, LocalizeError> {
        let matcher = FileMatcher::new(json_root.to_path_buf(), self.settings)?;
        Ok(workspace::list_dictionary_files(&matcher)?)
    }

    /// Resolves, builds and injects one subtree.
    ///
    /// Language detection looks at the path relative to `target_root` only.
    /// A subtree that cannot be listed is reported with a `SubtreeRead`
    /// diagnostic and left untouched.
    #[must_use]
    pub fn localize_subtree(
        &self,
        dictionary_files: &[PathBuf],
        subtree: &Path,
        target_root: &Path,
    ) -> SubtreeReport {
        tracing::info!(path = %subtree.display(), "Start processing folder");

        let folder = subtree.strip_prefix(target_root).unwrap_or(subtree);
        let resolver = LanguageResolver::from_settings(self.settings);
        let resolution = resolver.resolve_language(dictionary_files, folder);

        let build = DictionaryBuilder::new(&self.settings.placeholders.key_separator)
            .with_scopes(resolution.file_codes())
            .build(&resolution.sources);

        let mut diagnostics = build.diagnostics;
        let documents = workspace::list_files(subtree).unwrap_or_else(|e| {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SubtreeRead { reason: e.to_string() },
                subtree,
            ));
            Vec::new()
        });
        let injection = Injector::new(self.settings).inject(&documents, &build.dictionary);

        tracing::info!(
            path = %subtree.display(),
            entries = build.dictionary.len(),
            rewritten = injection.rewritten.len(),
            skipped = injection.skipped.len(),
            "Finished processing folder"
        );

        diagnostics.extend(injection.diagnostics);

        SubtreeReport {
            path: subtree.to_path_buf(),
            languages: resolution.languages,
            sources: resolution.sources,
            dictionary_size: build.dictionary.len(),
            rewritten: injection.rewritten,
            skipped: injection.skipped,
            diagnostics,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::write_file;

    #[googletest::test]
    fn test_localize_subtree_uses_relative_folder_name() {
        // The target root itself carries a language code.
        let temp_dir = TempDir::new().unwrap();
        let json_root = temp_dir.path().join("json");
        let target = temp_dir.path().join("site-de-DE");
        write_file(&json_root, "app_en_US.json", r#"{"title": "Hello"}"#);
        write_file(&json_root, "app_de_DE.json", r#"{"title": "Hallo"}"#);
        let page = write_file(&target, "en-US/index.htm", "[[title]]");
        let settings = InjectorSettings::default();
        let localizer = Localizer::new(&settings);
        let files = localizer.discover_dictionary_files(&json_root).unwrap();

        let report =
            localizer.localize_subtree(&files, &target.join("en-US"), &target);

        expect_that!(fs::read_to_string(&page).unwrap(), eq("Hello"));
        expect_that!(report.languages.len(), eq(1));
        expect_that!(report.sources, elements_are![eq(&json_root.join("app_en_US.json"))]);
        expect_that!(report.dictionary_size, eq(1));
    }

    #[rstest]
    fn test_localize_subtree_unmatched_reports_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        let page = write_file(&target, "misc/index.htm", "[[title]] [[body]]");
        let settings = InjectorSettings::default();

        let report = Localizer::new(&settings)
            .localize_subtree(&[], &target.join("misc"), &target);

        assert!(report.is_unmatched());
        assert_eq!(report.dictionary_size, 0);
        assert_eq!(report.rewritten, vec![page.clone()]);
        assert_eq!(fs::read_to_string(&page).unwrap(), "[[title]] [[body]]");
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[rstest]
    fn test_localize_subtree_unlistable_folder_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        let gone = target.join("en-US");
        let settings = InjectorSettings::default();

        let report = Localizer::new(&settings).localize_subtree(&[], &gone, &target);

        assert!(report.rewritten.is_empty());
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(report.diagnostics[0].kind, DiagnosticKind::SubtreeRead { .. }));
        assert_eq!(report.diagnostics[0].file, gone);
    }

    #[rstest]
    fn test_run_keep_target_preserves_existing_folders() {
        let temp_dir = TempDir::new().unwrap();
        let json_root = temp_dir.path().join("json");
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        write_file(&json_root, "app_en_US.json", r#"{"title": "Hi"}"#);
        write_file(&source, "en-US/index.htm", "[[title]]");
        let old = write_file(&target, "old/page.txt", "old");
        let settings = InjectorSettings::default();
        let options = RunOptions { json_root, source, target, clean_target: false };

        let report = Localizer::new(&settings).run(&options).unwrap();

        assert!(old.exists());
        assert_eq!(report.removed_folders, 0);
        assert_eq!(report.subtrees.len(), 2);
        assert_eq!(report.rewritten_count(), 1);
    }

    #[rstest]
    fn test_run_missing_source_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let json_root = temp_dir.path().join("json");
        fs::create_dir_all(&json_root).unwrap();
        let settings = InjectorSettings::default();
        let options = RunOptions {
            json_root,
            source: temp_dir.path().join("missing"),
            target: temp_dir.path().join("target"),
            clean_target: true,
        };

        let result = Localizer::new(&settings).run(&options);

        assert!(matches!(
            result,
            Err(LocalizeError::Workspace(WorkspaceError::MissingRoot(_)))
        ));
    }

    #[rstest]
    fn test_run_invalid_pattern_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = InjectorSettings::default();
        settings.dictionary_files.include_patterns = vec!["[".to_string()];

        let result = Localizer::new(&settings).discover_dictionary_files(temp_dir.path());

        assert!(matches!(result, Err(LocalizeError::Matcher(_))));
    }
}
