//! Error taxonomy returned by scanning and resolution.
//!
//! Per-entry descriptor problems never show up here: the scanner turns them
//! into `ScanDiagnostic`s and keeps going.

use std::path::PathBuf;

use thiserror::Error;

/// The installation root itself could not be enumerated.
#[derive(Debug, Error)]
#[error("cannot scan dictionary root {}: {source}", root.display())]
pub struct ScanError {
    pub root: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Grammar violations found while parsing a language tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagSyntaxError {
    #[error("tag is empty")]
    Empty,
    #[error("empty subtag at position {0}")]
    EmptySubtag(usize),
    #[error("subtag '{0}' is longer than 8 characters")]
    TooLong(String),
    #[error("subtag '{0}' contains characters other than ASCII letters and digits")]
    NotAlphanumeric(String),
    #[error("primary language subtag '{0}' must be 2 to 8 ASCII letters")]
    BadLanguage(String),
    #[error("private use singleton is not followed by any subtag")]
    EmptyPrivateUse,
}

/// Everything `open_legacy` / `open_tagged` and the list queries can fail with.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("invalid language tag {tag:?}: {reason}")]
    InvalidTag {
        tag: Option<String>,
        #[source]
        reason: TagSyntaxError,
    },

    #[error("dictionary variant '{variant}' was not found")]
    VariantNotFound { variant: String },

    #[error("no dictionaries installed for language '{language}'")]
    NoDictionariesForLanguage { language: String },

    #[error("no valid dictionaries were found under {}", root.display())]
    NoDictionaries { root: PathBuf },

    #[error("failed to load backend for {}: {source:#}", dir.display())]
    Load {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to release backend for {}: {source:#}", dir.display())]
    Release {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    pub(crate) fn invalid_tag(tag: Option<&str>, reason: TagSyntaxError) -> Self {
        ResolveError::InvalidTag {
            tag: tag.map(str::to_string),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
