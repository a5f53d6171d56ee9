//! Placeholder injection into documents.

mod injector;
mod scanner;

pub use injector::{
    InjectionReport,
    Injector,
};
pub use scanner::{
    MissingToken,
    Rendered,
    compound_key,
    render,
    resolve_tokens,
    rewrite_compound_tokens,
};
