//! File-tree utilities shared by the pipeline.

mod tree;
mod types;

pub use tree::{
    clean_target,
    copy_tree,
    list_dictionary_files,
    list_files,
    list_subdirectories,
    write_atomic,
};
pub use types::WorkspaceError;
