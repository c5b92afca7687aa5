//! Boundary to the analysis engine.
//!
//! This crate only decides *which* dictionary to use; constructing the actual
//! analyzer is delegated to a `BackendLoader`. `BuiltinLoader` is enough for
//! the CLI and tests: it checks that the dictionary is loadable and holds the
//! directory, it does not analyze words.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::consts::{DESCRIPTOR_FILE, NULL_BACKEND};
use crate::descriptor::Descriptor;

/// A loaded analysis resource. Released exactly once by its owning handle.
pub trait Backend: Send + fmt::Debug {
    /// Backend kind, e.g. the morphology backend name.
    fn kind(&self) -> &str;

    fn release(&mut self) -> Result<()>;
}

/// Builds a backend for a resolved descriptor.
pub trait BackendLoader: Send + Sync {
    fn load(&self, descriptor: &Descriptor) -> Result<Box<dyn Backend>>;
}

/// Backend for dictionaries declaring the `null` morphology: nothing to load.
#[derive(Debug, Default)]
pub struct NullBackend {
    released: bool,
}

impl NullBackend {
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Backend for NullBackend {
    fn kind(&self) -> &str {
        NULL_BACKEND
    }

    fn release(&mut self) -> Result<()> {
        self.released = true;
        Ok(())
    }
}

/// Backend whose data lives in the dictionary directory.
#[derive(Debug)]
pub struct DirectoryBackend {
    kind: String,
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl DirectoryBackend {
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Data files found at load time (descriptor excluded).
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Backend for DirectoryBackend {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn release(&mut self) -> Result<()> {
        self.files.clear();
        Ok(())
    }
}

/// Default loader: `null` -> `NullBackend`, anything else -> `DirectoryBackend`
/// which requires at least one data file next to the descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLoader;

impl BackendLoader for BuiltinLoader {
    fn load(&self, descriptor: &Descriptor) -> Result<Box<dyn Backend>> {
        let kind = descriptor.backends.morphology.as_str();
        if kind == NULL_BACKEND {
            return Ok(Box::new(NullBackend::default()));
        }

        let dir = &descriptor.dir;
        let rd = fs::read_dir(dir).with_context(|| format!("open {}", dir.display()))?;
        let mut files = Vec::new();
        for entry in rd {
            let entry = entry.with_context(|| format!("read_dir {}", dir.display()))?;
            let path = entry.path();
            if path.is_file() && entry.file_name() != DESCRIPTOR_FILE {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(anyhow!(
                "{} backend: no data files in {}",
                kind,
                dir.display()
            ));
        }
        files.sort();
        debug!("backend {}: {} file(s) in {}", kind, files.len(), dir.display());
        Ok(Box::new(DirectoryBackend {
            kind: kind.to_string(),
            dir: dir.clone(),
            files,
        }))
    }
}
