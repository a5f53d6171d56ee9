//! File pattern matcher for dictionary files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::InjectorSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid dictionary include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid dictionary exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files under the dictionary root against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(root: PathBuf, settings: &InjectorSettings) -> Result<Self, MatcherError> {
        let include_set =
            Self::build_glob_set(&settings.dictionary_files.include_patterns, |pattern, source| {
                MatcherError::InvalidIncludePattern { pattern, source }
            })?;

        let exclude_set =
            Self::build_glob_set(&settings.dictionary_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the path matches `dictionaryFiles.includePatterns`
    /// but not `dictionaryFiles.excludePatterns`.
    ///
    /// The path must be under the root.
    #[must_use]
    pub fn is_dictionary_file(&self, path: &Path) -> bool {
        let Some(relative_path) = path.strip_prefix(&self.root).ok() else {
            return false;
        };

        self.is_dictionary_file_relative(relative_path)
    }

    /// Same as [`Self::is_dictionary_file`] for a path relative to the root.
    #[must_use]
    pub fn is_dictionary_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
