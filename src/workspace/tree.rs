//! Deterministic walks, copies and clean-up over directory trees.

use std::fs;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use ignore::{
    DirEntry,
    WalkBuilder,
};

use super::WorkspaceError;
use crate::config::FileMatcher;

/// Walks `root` recursively in file-name order, root entry included.
///
/// Hidden and ignored files are visited too: the trees are build inputs,
/// not source checkouts.
fn walk(root: &Path) -> Result<Vec<DirEntry>, WorkspaceError> {
    if !root.is_dir() {
        return Err(WorkspaceError::MissingRoot(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false).sort_by_file_name(|a, b| a.cmp(b));

    builder
        .build()
        .map(|result| {
            result.map_err(|source| WorkspaceError::Walk { path: root.to_path_buf(), source })
        })
        .collect()
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file())
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

/// Every regular file under `root`, in file-name order.
///
/// # Errors
/// `MissingRoot` when `root` is not a directory, `Walk` on traversal failure.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    Ok(walk(root)?.into_iter().filter(is_file).map(DirEntry::into_path).collect())
}

/// Files under the matcher's root that match the dictionary patterns.
///
/// # Errors
/// Same as [`list_files`].
pub fn list_dictionary_files(matcher: &FileMatcher) -> Result<Vec<PathBuf>, WorkspaceError> {
    let files = list_files(matcher.root())?;
    tracing::debug!(
        root = %matcher.root().display(),
        files = files.len(),
        "Walked dictionary root"
    );

    Ok(files.into_iter().filter(|path| matcher.is_dictionary_file(path)).collect())
}

/// Immediate subdirectories of `root`, sorted by path.
///
/// # Errors
/// `ReadDir` when `root` or one of its entries cannot be read.
pub fn list_subdirectories(root: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    let read_dir_error =
        |source: io::Error| WorkspaceError::ReadDir { path: root.to_path_buf(), source };

    let mut subdirectories = Vec::new();
    for entry in fs::read_dir(root).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        if entry.file_type().map_err(read_dir_error)?.is_dir() {
            subdirectories.push(entry.path());
        }
    }

    subdirectories.sort();
    Ok(subdirectories)
}

/// Removes every immediate subdirectory of `target`; files directly inside
/// `target` are left alone. Creates `target` when it does not exist.
///
/// Returns the number of removed directories.
///
/// # Errors
/// `CreateDir`, `ReadDir` or `Remove` with the offending path.
pub fn clean_target(target: &Path) -> Result<usize, WorkspaceError> {
    if !target.exists() {
        fs::create_dir_all(target)
            .map_err(|source| WorkspaceError::CreateDir { path: target.to_path_buf(), source })?;
        tracing::debug!(target = %target.display(), "Created target directory");
        return Ok(0);
    }

    let subdirectories = list_subdirectories(target)?;
    for subdirectory in &subdirectories {
        tracing::debug!(path = %subdirectory.display(), "Removing stale target folder");
        fs::remove_dir_all(subdirectory)
            .map_err(|source| WorkspaceError::Remove { path: subdirectory.clone(), source })?;
    }

    Ok(subdirectories.len())
}

/// Copies the contents of `source` into `target`, merging with what is
/// already there and overwriting files of the same name.
///
/// Symbolic links are not followed and are left out. Returns the number of
/// copied files.
///
/// # Errors
/// `MissingRoot` when `source` is not a directory, otherwise the failing
/// walk, directory creation or copy.
pub fn copy_tree(source: &Path, target: &Path) -> Result<usize, WorkspaceError> {
    let mut copied = 0;

    for entry in walk(source)? {
        let Ok(relative_path) = entry.path().strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative_path);

        if is_dir(&entry) {
            fs::create_dir_all(&destination)
                .map_err(|source| WorkspaceError::CreateDir { path: destination, source })?;
        } else if is_file(&entry) {
            fs::copy(entry.path(), &destination).map_err(|source| WorkspaceError::Copy {
                from: entry.path().to_path_buf(),
                to: destination,
                source,
            })?;
            copied += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-regular file");
        }
    }

    Ok(copied)
}

/// Replaces `path` with `content` through a sibling temporary file and a
/// rename, so readers never observe a half-written document.
///
/// # Errors
/// Any I/O error from writing the temporary file or renaming it.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut temp_path = path.as_os_str().to_os_string();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
