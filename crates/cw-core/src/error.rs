//! Crate-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CwError` as one variant
//! via `#[from]`, so a missing site surfaces the same way everywhere.

use thiserror::Error;

use crate::SiteId;

/// The top-level error type for `cw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CwError {
    #[error("site {0} not found")]
    SiteNotFound(SiteId),

    #[error("site named {0:?} not found")]
    SiteNameNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cw-*` crates.
pub type CwResult<T> = Result<T, CwError>;
