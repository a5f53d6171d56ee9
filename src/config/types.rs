use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languageMap[0].folderCode")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row of the folder-code → file-code table.
///
/// `folder_code` is searched for in target subtree names (`en-US`),
/// `file_code` in dictionary file names (`en_US`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageMapping {
    pub folder_code: String,
    pub file_code: String,
}

impl LanguageMapping {
    #[must_use]
    pub fn new(folder_code: impl Into<String>, file_code: impl Into<String>) -> Self {
        Self { folder_code: folder_code.into(), file_code: file_code.into() }
    }
}

/// How to choose among table entries when several folder codes occur in
/// the same subtree name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageMatch {
    /// The longest matching folder code wins; ties go to the earlier entry.
    #[default]
    Longest,
    /// The first matching entry in table order wins.
    First,
    /// Every matching entry contributes, in table order.
    All,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for DictionaryFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["**/*.json".to_string()], exclude_patterns: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentsConfig {
    /// Only files ending with this extension are injected.
    pub extension: String,
    /// Aggregate/preview page that is never injected.
    pub aggregate_suffix: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self { extension: ".htm".to_string(), aggregate_suffix: "all-in-one.htm".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    /// Separator inside compound tokens (`[[a||b]]`).
    pub compound_separator: String,
    /// Joins the operands of a compound token (`b.a`) and flattens nested
    /// dictionary objects.
    pub key_separator: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { compound_separator: "||".to_string(), key_separator: ".".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InjectorSettings {
    /// Ordered folder-code → file-code table.
    pub language_map: Vec<LanguageMapping>,
    pub language_match: LanguageMatch,

    pub dictionary_files: DictionaryFilesConfig,
    pub documents: DocumentsConfig,
    pub placeholders: PlaceholderConfig,
}

fn default_language_map() -> Vec<LanguageMapping> {
    [
        ("cs-CZ", "cs_CZ"),
        ("de-DE", "de_DE"),
        ("fr-FR", "fr_FR"),
        ("en-US", "en_US"),
        ("es-ES", "es_ES"),
        ("ja-JP", "ja_JP"),
        ("pt-BR", "pt_BR"),
        ("ru-RU", "ru_RU"),
        ("zh-Hans", "zh_CN"),
        ("zh-Hant-TW", "zh_TW"),
    ]
    .into_iter()
    .map(|(folder_code, file_code)| LanguageMapping::new(folder_code, file_code))
    .collect()
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self {
            language_map: default_language_map(),
            language_match: LanguageMatch::default(),
            dictionary_files: DictionaryFilesConfig::default(),
            documents: DocumentsConfig::default(),
            placeholders: PlaceholderConfig::default(),
        }
    }
}

impl InjectorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Duplicate folder code
    /// - Invalid glob pattern
    /// - Separator containing bracket characters
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        self.validate_language_map(&mut errors);

        if self.dictionary_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "dictionaryFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/*.json\"]",
            ));
        }

        for (index, pattern) in self.dictionary_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("dictionaryFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.dictionary_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("dictionaryFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.documents.extension.is_empty() {
            errors.push(ValidationError::new(
                "documents.extension",
                "The extension cannot be empty. Example: \".htm\"",
            ));
        }

        if self.documents.aggregate_suffix.is_empty() {
            errors.push(ValidationError::new(
                "documents.aggregateSuffix",
                "The suffix cannot be empty, otherwise every document would be skipped",
            ));
        }

        if self.placeholders.compound_separator.is_empty() {
            errors.push(ValidationError::new(
                "placeholders.compoundSeparator",
                "The separator cannot be empty. Example: \"||\"",
            ));
        } else if has_bracket(&self.placeholders.compound_separator) {
            errors.push(ValidationError::new(
                "placeholders.compoundSeparator",
                "The separator cannot contain '[' or ']'",
            ));
        }

        if has_bracket(&self.placeholders.key_separator) {
            errors.push(ValidationError::new(
                "placeholders.keySeparator",
                "The separator cannot contain '[' or ']'",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_language_map(&self, errors: &mut Vec<ValidationError>) {
        if self.language_map.is_empty() {
            errors.push(ValidationError::new(
                "languageMap",
                "At least one mapping is required. Example: [{\"folderCode\": \"en-US\", \"fileCode\": \"en_US\"}]",
            ));
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, mapping) in self.language_map.iter().enumerate() {
            if mapping.folder_code.is_empty() {
                errors.push(ValidationError::new(
                    format!("languageMap[{index}].folderCode"),
                    "The folder code cannot be empty",
                ));
            } else if let Some(first) = seen.insert(&mapping.folder_code, index) {
                errors.push(ValidationError::new(
                    format!("languageMap[{index}].folderCode"),
                    format!(
                        "Duplicate folder code '{}' (already defined at languageMap[{first}])",
                        mapping.folder_code
                    ),
                ));
            }

            if mapping.file_code.is_empty() {
                errors.push(ValidationError::new(
                    format!("languageMap[{index}].fileCode"),
                    "The file code cannot be empty",
                ));
            }
        }
    }
}

fn has_bracket(value: &str) -> bool {
    value.contains(['[', ']'])
}
