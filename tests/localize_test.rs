//! End-to-end runs of the localizer over temporary trees

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use html_i18n_injector::config::InjectorSettings;
use html_i18n_injector::types::{
    DiagnosticKind,
    Severity,
};
use html_i18n_injector::{
    Localizer,
    RunOptions,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, relative_path: &str, content: &str) -> PathBuf {
    let path = root.join(relative_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn read(root: &Path, relative_path: &str) -> String {
    fs::read_to_string(root.join(relative_path)).unwrap()
}

struct Fixture {
    _temp_dir: TempDir,
    json_root: PathBuf,
    source: PathBuf,
    target: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let json_root = temp_dir.path().join("json");
        let source = temp_dir.path().join("source");
        let target = temp_dir.path().join("target");
        fs::create_dir_all(&json_root).unwrap();
        fs::create_dir_all(&source).unwrap();
        Self { _temp_dir: temp_dir, json_root, source, target }
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            json_root: self.json_root.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
            clean_target: true,
        }
    }
}

#[test]
fn test_wrapped_dictionary_end_to_end() {
    let fixture = Fixture::new();
    write(
        &fixture.json_root,
        "strings_en_US.json",
        r#"{"en_US": {"title": "Hi <b>there</b>!"}}"#,
    );
    write(&fixture.source, "en-US/index.htm", "<h1>[[title]]</h1>");
    let settings = InjectorSettings::default();

    let report = Localizer::new(&settings).run(&fixture.options()).unwrap();

    assert_eq!(read(&fixture.target, "en-US/index.htm"), "<h1>Hi there</h1>");
    assert_eq!(read(&fixture.source, "en-US/index.htm"), "<h1>[[title]]</h1>");
    assert_eq!(report.diagnostics().count(), 0);
    assert_eq!(report.rewritten_count(), 1);
}

#[test]
fn test_languages_get_their_own_dictionaries() {
    let fixture = Fixture::new();
    write(&fixture.json_root, "app_en_US.json", r#"{"dialog.close": "Close", "title": "Home"}"#);
    write(&fixture.json_root, "app_de_DE.json", r#"{"dialog": {"close": "Schließen"}}"#);
    write(&fixture.json_root, "extra/help_de_DE.json", r#"{"title": "Startseite"}"#);
    for folder in ["en-US", "de-DE"] {
        write(
            &fixture.source,
            &format!("{folder}/pages/index.htm"),
            "<title>[[title]]</title><button>[[close||dialog]]</button>",
        );
    }
    let settings = InjectorSettings::default();

    let report = Localizer::new(&settings).run(&fixture.options()).unwrap();

    assert_eq!(
        read(&fixture.target, "en-US/pages/index.htm"),
        "<title>Home</title><button>Close</button>"
    );
    assert_eq!(
        read(&fixture.target, "de-DE/pages/index.htm"),
        "<title>Startseite</title><button>Schließen</button>"
    );
    assert_eq!(report.dictionary_files.len(), 3);
    let folders: Vec<String> = report
        .subtrees
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(folders, vec!["de-DE", "en-US"]);
}

#[test]
fn test_aggregate_preview_and_assets_untouched() {
    let fixture = Fixture::new();
    write(&fixture.json_root, "app_fr_FR.json", r#"{"title": "Bonjour"}"#);
    write(&fixture.source, "fr-FR/index.htm", "[[title]]");
    write(&fixture.source, "fr-FR/all-in-one.htm", "[[title]] [[missing]]");
    write(&fixture.source, "fr-FR/app.js", "const t = '[[title]]';");
    let settings = InjectorSettings::default();

    let report = Localizer::new(&settings).run(&fixture.options()).unwrap();

    assert_eq!(read(&fixture.target, "fr-FR/index.htm"), "Bonjour");
    assert_eq!(read(&fixture.target, "fr-FR/all-in-one.htm"), "[[title]] [[missing]]");
    assert_eq!(read(&fixture.target, "fr-FR/app.js"), "const t = '[[title]]';");
    assert_eq!(report.subtrees[0].skipped.len(), 2);
    assert_eq!(report.missing_key_count(), 0);
}

#[test]
fn test_bad_sources_do_not_abort_the_run() {
    let fixture = Fixture::new();
    write(&fixture.json_root, "a_ja_JP.json", "\u{feff}{\"title\": \"BOM\"}");
    write(&fixture.json_root, "b_ja_JP.json", "{ not json");
    write(&fixture.json_root, "c_ja_JP.json", r#"{"title": "こんにちは"}"#);
    write(&fixture.source, "ja-JP/index.htm", "[[title]]|[[body]]");
    let settings = InjectorSettings::default();

    let report = Localizer::new(&settings).run(&fixture.options()).unwrap();

    assert_eq!(read(&fixture.target, "ja-JP/index.htm"), "こんにちは|[[body]]");

    let kinds: Vec<_> = report.diagnostics().map(|d| (d.severity(), d.kind.clone())).collect();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds[0], (Severity::Error, DiagnosticKind::SourceEncoding));
    assert!(matches!(kinds[1], (Severity::Error, DiagnosticKind::SourceParse { .. })));
    assert_eq!(
        kinds[2],
        (
            Severity::Warning,
            DiagnosticKind::MissingKey { token: "[[body]]".to_string(), key: "body".to_string() }
        )
    );
}

#[test]
fn test_unmatched_folder_keeps_placeholders() {
    let fixture = Fixture::new();
    write(&fixture.json_root, "app_en_US.json", r#"{"title": "Hi"}"#);
    write(&fixture.source, "shared/index.htm", "[[title]]");
    let settings = InjectorSettings::default();

    let report = Localizer::new(&settings).run(&fixture.options()).unwrap();

    assert_eq!(read(&fixture.target, "shared/index.htm"), "[[title]]");
    assert!(report.subtrees[0].is_unmatched());
    assert_eq!(report.missing_key_count(), 1);
}

#[test]
fn test_rerun_replaces_stale_output() {
    let fixture = Fixture::new();
    write(&fixture.json_root, "app_pt_BR.json", r#"{"title": "Olá"}"#);
    write(&fixture.source, "pt-BR/index.htm", "[[title]]");
    write(&fixture.target, "pt-BR/removed.htm", "stale");
    write(&fixture.target, "notes.txt", "kept");
    let settings = InjectorSettings::default();
    let localizer = Localizer::new(&settings);

    let first = localizer.run(&fixture.options()).unwrap();
    let second = localizer.run(&fixture.options()).unwrap();

    assert_eq!(first.removed_folders, 1);
    assert_eq!(second.removed_folders, 1);
    assert!(!fixture.target.join("pt-BR/removed.htm").exists());
    assert_eq!(read(&fixture.target, "notes.txt"), "kept");
    assert_eq!(read(&fixture.target, "pt-BR/index.htm"), "Olá");
}
