//! Resolver: the public entry point (scan-or-reuse, resolve, load, list).
//!
//! Constructors:
//! - Resolver::new(cfg): default reader (dictionary.info) and BuiltinLoader.
//! - Resolver::with_parts(cfg, reader, loader): custom collaborators.
//! - Resolver::builder(): ResolverBuilder starting from env.
//!
//! Снапшоты кэшируются по корню (если cache_snapshots=true). Лок кэша держится
//! только на lookup/insert; сам скан и резолв идут без него.

use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::{BackendLoader, BuiltinLoader};
use crate::config::{ResolverBuilder, ResolverConfig};
use crate::descriptor::{Descriptor, DescriptorReader, InfoFileReader};
use crate::error::{ResolveError, Result};
use crate::handle::DictionaryHandle;
use crate::index::languages;
use crate::legacy::resolve_legacy;
use crate::scan::{Snapshot, SnapshotBuilder};
use crate::tag::resolve_tagged;

pub struct Resolver {
    cfg: ResolverConfig,
    reader: Box<dyn DescriptorReader>,
    loader: Box<dyn BackendLoader>,
    snapshots: Mutex<HashMap<PathBuf, Arc<Snapshot>>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    pub fn new(cfg: ResolverConfig) -> Self {
        Self::with_parts(cfg, Box::new(InfoFileReader), Box::new(BuiltinLoader))
    }

    pub fn with_parts(
        cfg: ResolverConfig,
        reader: Box<dyn DescriptorReader>,
        loader: Box<dyn BackendLoader>,
    ) -> Self {
        Self {
            cfg,
            reader,
            loader,
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Builder starting from env (MORPHDICT_*).
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.cfg
    }

    /// Snapshot for `root`: cached one if present, otherwise a fresh scan.
    pub fn snapshot(&self, root: &Path) -> Result<Arc<Snapshot>> {
        if self.cfg.cache_snapshots {
            if let Some(s) = self.cache().get(root) {
                return Ok(Arc::clone(s));
            }
        }
        self.scan_root(root)
    }

    /// Scan `root` again and replace the cached snapshot. Handles opened
    /// from the previous snapshot stay valid.
    pub fn rescan(&self, root: &Path) -> Result<Arc<Snapshot>> {
        self.scan_root(root)
    }

    /// Resolve with the legacy scheme (variant id, "", "default", `lang_REGION`).
    pub fn open_legacy(&self, root: &Path, variant: Option<&str>) -> Result<DictionaryHandle> {
        let snapshot = self.snapshot(root)?;
        let d = resolve_legacy(&snapshot, variant, &self.cfg)?;
        self.load(d)
    }

    /// Resolve with the tag scheme (`fi`, `fi-FI`, `fi-x-medicine`).
    pub fn open_tagged(&self, root: &Path, tag: Option<&str>) -> Result<DictionaryHandle> {
        let snapshot = self.snapshot(root)?;
        let d = resolve_tagged(&snapshot, tag)?;
        self.load(d)
    }

    /// Release a handle.
    pub fn close(&self, mut handle: DictionaryHandle) -> Result<()> {
        handle.close()
    }

    pub fn list_languages(&self, root: &Path) -> Result<BTreeSet<String>> {
        let snapshot = self.snapshot(root)?;
        Ok(languages(&snapshot))
    }

    /// All dictionaries sorted by (language, variant).
    pub fn list_dictionaries(&self, root: &Path) -> Result<Vec<Descriptor>> {
        let snapshot = self.snapshot(root)?;
        let mut out: Vec<Descriptor> = snapshot.entries().iter().map(|d| (**d).clone()).collect();
        out.sort_by(|a, b| {
            a.language
                .cmp(&b.language)
                .then_with(|| a.variant.cmp(&b.variant))
        });
        Ok(out)
    }

    // ----------------- internal helpers -----------------

    fn cache(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Snapshot>>> {
        // Снапшоты неизменяемы, так что poisoned-кэш всё ещё корректен.
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn scan_root(&self, root: &Path) -> Result<Arc<Snapshot>> {
        let mut b = SnapshotBuilder::new();
        b.add_location(root, self.reader.as_ref())?;
        for extra in &self.cfg.extra_paths {
            if let Err(e) = b.add_location(extra, self.reader.as_ref()) {
                b.note_unreadable(e);
            }
        }
        let snapshot = Arc::new(b.finish());
        if self.cfg.cache_snapshots {
            self.cache()
                .insert(root.to_path_buf(), Arc::clone(&snapshot));
        }
        Ok(snapshot)
    }

    fn load(&self, d: Arc<Descriptor>) -> Result<DictionaryHandle> {
        let backend = self.loader.load(&d).map_err(|source| ResolveError::Load {
            dir: d.dir.clone(),
            source,
        })?;
        info!(
            "opened dictionary {}/{} ({}) from {}",
            d.language,
            d.variant,
            backend.kind(),
            d.dir.display()
        );
        debug!("description: {}", d.description);
        Ok(DictionaryHandle::new(d, backend))
    }
}
