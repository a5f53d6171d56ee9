//! Language detection for target subtrees.
//!
//! A subtree belongs to the languages whose folder code occurs in its name;
//! its dictionary files are the JSON files whose file name carries the mapped
//! file code.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    InjectorSettings,
    LanguageMapping,
    LanguageMatch,
};

/// Languages detected for one subtree and the dictionary files they select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub languages: Vec<LanguageMapping>,
    /// Dictionary files in merge order.
    pub sources: Vec<PathBuf>,
}

impl Resolution {
    /// File codes of the detected languages, used to unwrap `{"en_US": {...}}` sources.
    pub fn file_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|language| language.file_code.as_str())
    }

    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.languages.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LanguageResolver<'a> {
    table: &'a [LanguageMapping],
    strategy: LanguageMatch,
}

impl<'a> LanguageResolver<'a> {
    #[must_use]
    pub const fn new(table: &'a [LanguageMapping], strategy: LanguageMatch) -> Self {
        Self { table, strategy }
    }

    #[must_use]
    pub fn from_settings(settings: &'a InjectorSettings) -> Self {
        Self::new(&settings.language_map, settings.language_match)
    }

    /// Table entries whose folder code occurs in `subtree`, narrowed by the strategy.
    #[must_use]
    pub fn detect(&self, subtree: &Path) -> Vec<&'a LanguageMapping> {
        let name = subtree.to_string_lossy();
        let matched =
            self.table.iter().filter(|mapping| name.contains(mapping.folder_code.as_str()));

        match self.strategy {
            LanguageMatch::All => matched.collect(),
            LanguageMatch::First => matched.take(1).collect(),
            LanguageMatch::Longest => matched
                .fold(None, |best: Option<&'a LanguageMapping>, mapping| match best {
                    Some(current) if current.folder_code.len() >= mapping.folder_code.len() => {
                        Some(current)
                    }
                    _ => Some(mapping),
                })
                .into_iter()
                .collect(),
        }
    }

    /// Detects the subtree's languages and collects their dictionary files.
    ///
    /// Files keep the order of `json_paths` within one language; languages
    /// follow table order.
    #[must_use]
    pub fn resolve_language<P: AsRef<Path>>(
        &self,
        json_paths: &[P],
        subtree: &Path,
    ) -> Resolution {
        let languages = self.detect(subtree);
        let mut sources = Vec::new();

        for language in &languages {
            tracing::info!(
                subtree = %subtree.display(),
                "{} language is detected",
                language.folder_code
            );
            sources.extend(
                json_paths
                    .iter()
                    .filter(|path| file_name_contains(path.as_ref(), &language.file_code))
                    .map(|path| path.as_ref().to_path_buf()),
            );
        }

        if languages.is_empty() {
            tracing::debug!(subtree = %subtree.display(), "No language code found in subtree name");
        }

        Resolution { languages: languages.into_iter().cloned().collect(), sources }
    }

    /// Dictionary files for `subtree`; empty when no folder code matches.
    #[must_use]
    pub fn resolve<P: AsRef<Path>>(&self, json_paths: &[P], subtree: &Path) -> Vec<PathBuf> {
        self.resolve_language(json_paths, subtree).sources
    }
}

fn file_name_contains(path: &Path, code: &str) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().contains(code))
}
