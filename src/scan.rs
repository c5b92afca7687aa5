//! Installation scanning: root directory -> immutable `Snapshot`.
//!
//! Каждый непосредственный подкаталог корня — кандидат в словари. Битые или
//! неполные descriptor'ы не валят скан: запись пропускается и попадает в
//! `diagnostics`. Фатальна только нечитаемость самого корня.

use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::descriptor::{Descriptor, DescriptorReader, InfoFileReader};
use crate::error::ScanError;

/// A subdirectory (or whole location) that was skipped during a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub dir: PathBuf,
    pub reason: String,
}

/// Immutable result of scanning one or more installation locations.
#[derive(Debug)]
pub struct Snapshot {
    roots: Vec<PathBuf>,
    entries: Vec<Arc<Descriptor>>,
    // language -> indices into `entries`, scan order preserved
    by_language: BTreeMap<String, Vec<usize>>,
    diagnostics: Vec<ScanDiagnostic>,
}

impl Snapshot {
    /// Scanned locations, in scan order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// All descriptors in scan order.
    pub fn entries(&self) -> &[Arc<Descriptor>] {
        &self.entries
    }

    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First scanned location (the root the caller asked for).
    pub fn root(&self) -> &Path {
        self.roots.first().map(PathBuf::as_path).unwrap_or(Path::new(""))
    }

    pub(crate) fn language_map(&self) -> &BTreeMap<String, Vec<usize>> {
        &self.by_language
    }
}

/// Accumulates descriptors from several locations, first `(language, variant)` wins.
pub(crate) struct SnapshotBuilder {
    roots: Vec<PathBuf>,
    entries: Vec<Arc<Descriptor>>,
    seen: HashSet<(String, String)>,
    diagnostics: Vec<ScanDiagnostic>,
}

impl SnapshotBuilder {
    pub(crate) fn new() -> Self {
        Self {
            roots: Vec::new(),
            entries: Vec::new(),
            seen: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan one location. Only an unreadable `root` is an error; on error
    /// nothing from this location is kept.
    pub(crate) fn add_location(
        &mut self,
        root: &Path,
        reader: &dyn DescriptorReader,
    ) -> Result<(), ScanError> {
        let rd = fs::read_dir(root).map_err(|source| ScanError {
            root: root.to_path_buf(),
            source,
        })?;

        // Сначала собираем кандидатов: ошибка посреди перечисления не должна
        // оставить в builder'е половину локации.
        let mut candidates = Vec::new();
        let mut local_diags = Vec::new();
        for entry in rd {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    local_diags.push(ScanDiagnostic {
                        dir: root.to_path_buf(),
                        reason: format!("read_dir entry: {e}"),
                    });
                    continue;
                }
            };
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            // follows symlinks, unlike DirEntry::file_type
            if !path.is_dir() {
                continue;
            }
            candidates.push(path);
        }

        self.roots.push(root.to_path_buf());
        self.diagnostics.append(&mut local_diags);

        let before = self.entries.len();
        for dir in candidates {
            match reader.read_descriptor(&dir) {
                Ok(d) => self.push(d),
                Err(e) => {
                    warn!("scan: skip {}: {:#}", dir.display(), e);
                    self.diagnostics.push(ScanDiagnostic {
                        dir,
                        reason: format!("{e:#}"),
                    });
                }
            }
        }
        debug!(
            "scan: {} dictionaries from {}",
            self.entries.len() - before,
            root.display()
        );
        Ok(())
    }

    /// Record a location that could not be scanned at all.
    pub(crate) fn note_unreadable(&mut self, err: ScanError) {
        warn!("scan: {err}");
        self.diagnostics.push(ScanDiagnostic {
            dir: err.root,
            reason: err.source.to_string(),
        });
    }

    fn push(&mut self, d: Descriptor) {
        let key = (d.language.clone(), d.variant.clone());
        if self.seen.contains(&key) {
            let reason = format!(
                "duplicate dictionary language='{}' variant='{}'",
                d.language, d.variant
            );
            warn!("scan: skip {}: {}", d.dir.display(), reason);
            self.diagnostics.push(ScanDiagnostic { dir: d.dir, reason });
            return;
        }
        self.seen.insert(key);
        self.entries.push(Arc::new(d));
    }

    pub(crate) fn finish(self) -> Snapshot {
        let mut by_language: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, d) in self.entries.iter().enumerate() {
            by_language.entry(d.language.clone()).or_default().push(i);
        }
        info!(
            "scan: {} dictionaries, {} language(s), {} skipped",
            self.entries.len(),
            by_language.len(),
            self.diagnostics.len()
        );
        Snapshot {
            roots: self.roots,
            entries: self.entries,
            by_language,
            diagnostics: self.diagnostics,
        }
    }
}

/// Scan `root` with the default `dictionary.info` reader.
pub fn scan(root: &Path) -> Result<Snapshot, ScanError> {
    scan_with(root, &InfoFileReader)
}

/// Scan `root` with a custom descriptor reader.
pub fn scan_with(root: &Path, reader: &dyn DescriptorReader) -> Result<Snapshot, ScanError> {
    let mut b = SnapshotBuilder::new();
    b.add_location(root, reader)?;
    Ok(b.finish())
}

/// Scan several locations in order and merge them; for a duplicated
/// `(language, variant)` the earlier location wins.
///
/// Unreadable locations are recorded as diagnostics. Fails only when none of
/// the locations could be read (the error of the first one is returned).
pub fn scan_locations(
    locations: &[PathBuf],
    reader: &dyn DescriptorReader,
) -> Result<Snapshot, ScanError> {
    let mut b = SnapshotBuilder::new();
    let mut first_err: Option<ScanError> = None;
    let mut readable = 0usize;
    for loc in locations {
        match b.add_location(loc, reader) {
            Ok(()) => readable += 1,
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(ScanError {
                        root: e.root.clone(),
                        source: std::io::Error::new(e.source.kind(), e.source.to_string()),
                    });
                }
                b.note_unreadable(e);
            }
        }
    }
    if readable == 0 {
        if let Some(e) = first_err {
            return Err(e);
        }
    }
    Ok(b.finish())
}
