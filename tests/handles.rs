use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use morphdict::consts::DESCRIPTOR_FILE;
use morphdict::{
    Backend, BackendLoader, Descriptor, InfoFileReader, ResolveError, Resolver, ResolverBuilder,
    ResolverConfig,
};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("morphdict-handle-{}-{}-{}", prefix, pid, t))
}

fn install(root: &Path, dir: &str, info: &[&str], data: bool) -> Result<PathBuf> {
    let d = root.join(dir);
    fs::create_dir_all(&d)?;
    let mut body = String::from("info: Dictionary-Format: 2\n");
    for line in info {
        body.push_str(line);
        body.push('\n');
    }
    fs::write(d.join(DESCRIPTOR_FILE), body)?;
    if data {
        fs::write(d.join("lexicon.bin"), b"lexicon")?;
    }
    Ok(d)
}

#[derive(Default)]
struct Counters {
    loaded: AtomicUsize,
    released: AtomicUsize,
}

#[derive(Debug)]
struct CountingBackend {
    counters: Arc<Counters>,
}

impl std::fmt::Debug for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Counters {{ loaded: {}, released: {} }}",
            self.loaded.load(Ordering::SeqCst),
            self.released.load(Ordering::SeqCst)
        )
    }
}

impl Backend for CountingBackend {
    fn kind(&self) -> &str {
        "counting"
    }

    fn release(&mut self) -> Result<()> {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Loader that counts loads/releases and refuses descriptors with variant "broken".
struct CountingLoader {
    counters: Arc<Counters>,
}

impl BackendLoader for CountingLoader {
    fn load(&self, d: &Descriptor) -> Result<Box<dyn Backend>> {
        if d.variant == "broken" {
            return Err(anyhow!("cannot initialize {}", d.variant));
        }
        self.counters.loaded.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingBackend {
            counters: Arc::clone(&self.counters),
        }))
    }
}

fn counting_resolver() -> (Resolver, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let r = Resolver::with_parts(
        ResolverConfig::default(),
        Box::new(InfoFileReader),
        Box::new(CountingLoader {
            counters: Arc::clone(&counters),
        }),
    );
    (r, counters)
}

#[test]
fn release_happens_exactly_once() -> Result<()> {
    let root = unique_root("once");
    install(&root, "mor-med", &["info: Language-Code: fi"], false)?;
    let (r, c) = counting_resolver();

    let mut h = r.open_tagged(&root, Some("fi-x-med"))?;
    assert!(!h.is_closed());
    h.close()?;
    assert!(h.is_closed());
    assert!(h.backend().is_none());
    // повторный close — no-op
    h.close()?;
    drop(h);
    assert_eq!(c.released.load(Ordering::SeqCst), 1);

    // drop без close тоже освобождает
    {
        let _h = r.open_legacy(&root, Some("med"))?;
    }
    assert_eq!(c.loaded.load(Ordering::SeqCst), 2);
    assert_eq!(c.released.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn handles_on_same_dictionary_are_independent() -> Result<()> {
    let root = unique_root("independent");
    install(&root, "mor-med", &["info: Language-Code: fi"], false)?;
    let (r, c) = counting_resolver();

    let a = r.open_tagged(&root, Some("fi-x-med"))?;
    let b = r.open_legacy(&root, Some("med"))?;
    assert_eq!(a.descriptor(), b.descriptor());

    r.close(a)?;
    assert!(!b.is_closed());
    assert_eq!(b.backend().map(|be| be.kind()), Some("counting"));
    assert_eq!(c.released.load(Ordering::SeqCst), 1);
    r.close(b)?;
    assert_eq!(c.released.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn load_failure_is_reported_and_holds_nothing() -> Result<()> {
    let root = unique_root("broken");
    install(&root, "mor-broken", &["info: Language-Code: fi"], false)?;
    let (r, c) = counting_resolver();

    match r.open_tagged(&root, Some("fi-x-broken")) {
        Err(ResolveError::Load { dir, .. }) => assert!(dir.ends_with("mor-broken")),
        other => panic!("expected Load error, got {other:?}"),
    }
    assert_eq!(c.loaded.load(Ordering::SeqCst), 0);
    assert_eq!(c.released.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn builtin_loader_requires_data_files() -> Result<()> {
    let root = unique_root("builtin");
    install(&root, "mor-full", &["info: Language-Code: fi"], true)?;
    install(&root, "mor-hollow", &["info: Language-Code: fi"], false)?;
    install(
        &root,
        "mor-null",
        &["info: Language-Code: fi", "info: Morphology-Backend: null"],
        false,
    )?;
    let r = Resolver::new(ResolverConfig::default());

    let h = r.open_tagged(&root, Some("fi-x-full"))?;
    assert_eq!(h.backend().map(|b| b.kind()), Some("malaga"));
    let h = r.open_tagged(&root, Some("fi-x-null"))?;
    assert_eq!(h.backend().map(|b| b.kind()), Some("null"));
    assert!(matches!(
        r.open_tagged(&root, Some("fi-x-hollow")),
        Err(ResolveError::Load { .. })
    ));
    Ok(())
}

#[test]
fn snapshots_are_reused_until_rescan() -> Result<()> {
    let root = unique_root("rescan");
    install(&root, "mor-med", &["info: Language-Code: fi"], true)?;
    let r = Resolver::new(ResolverConfig::default());

    let s1 = r.snapshot(&root)?;
    let s2 = r.snapshot(&root)?;
    assert!(Arc::ptr_eq(&s1, &s2));

    let h = r.open_tagged(&root, Some("fi-x-med"))?;

    install(&root, "sv", &["info: Language-Code: sv"], true)?;
    assert!(!r.list_languages(&root)?.contains("sv"));

    let s3 = r.rescan(&root)?;
    assert!(!Arc::ptr_eq(&s1, &s3));
    assert!(r.list_languages(&root)?.contains("sv"));
    // старый хэндл жив
    assert!(!h.is_closed());
    assert_eq!(h.variant(), "med");

    // без кэша каждый вызов сканирует заново
    let r = Resolver::new(ResolverBuilder::from_default().cache_snapshots(false).build());
    let a = r.snapshot(&root)?;
    let b = r.snapshot(&root)?;
    assert!(!Arc::ptr_eq(&a, &b));
    Ok(())
}

#[test]
fn list_dictionaries_is_sorted() -> Result<()> {
    let root = unique_root("sorted");
    install(&root, "z", &["info: Language-Code: sv", "info: Language-Variant: b"], true)?;
    install(&root, "y", &["info: Language-Code: fi", "info: Language-Variant: c"], true)?;
    install(&root, "x", &["info: Language-Code: sv", "info: Language-Variant: a"], true)?;
    install(&root, "w", &["info: Language-Code: fi"], true)?;

    let r = Resolver::new(ResolverConfig::default());
    let got: Vec<(String, String)> = r
        .list_dictionaries(&root)?
        .into_iter()
        .map(|d| (d.language, d.variant))
        .collect();
    let want: Vec<(String, String)> = [("fi", "c"), ("fi", "w"), ("sv", "a"), ("sv", "b")]
        .iter()
        .map(|(l, v)| (l.to_string(), v.to_string()))
        .collect();
    assert_eq!(got, want);
    Ok(())
}

#[test]
fn extra_paths_are_merged_after_root() -> Result<()> {
    let root = unique_root("extra-root");
    let extra = unique_root("extra-more");
    install(&root, "mor-med", &["info: Language-Code: fi", "info: Description: root"], true)?;
    install(&extra, "mor-med", &["info: Language-Code: fi", "info: Description: extra"], true)?;
    install(&extra, "mor-default", &["info: Language-Code: et"], true)?;

    let cfg = ResolverBuilder::from_default()
        .extra_path(&extra)
        .extra_path(unique_root("extra-missing"))
        .build();
    let r = Resolver::new(cfg);

    let langs: Vec<String> = r.list_languages(&root)?.into_iter().collect();
    assert_eq!(langs, vec!["et".to_string(), "fi".to_string()]);
    let h = r.open_tagged(&root, Some("fi-x-med"))?;
    assert_eq!(h.descriptor().description, "root");

    // корень обязателен, даже если extra-пути читаются
    assert!(matches!(
        r.list_languages(&unique_root("extra-noroot")),
        Err(ResolveError::Scan(_))
    ));
    Ok(())
}

#[test]
fn resolver_is_shareable_across_threads() -> Result<()> {
    let root = unique_root("threads");
    install(&root, "mor-med", &["info: Language-Code: fi"], true)?;
    install(&root, "mor-default", &["info: Language-Code: fi"], true)?;
    let r = Arc::new(Resolver::new(ResolverConfig::default()));
    r.snapshot(&root)?;

    let mut joins = Vec::new();
    for i in 0..4 {
        let r = Arc::clone(&r);
        let root = root.clone();
        joins.push(std::thread::spawn(move || -> Result<String> {
            let tag = if i % 2 == 0 { "fi-x-med" } else { "fi" };
            let h = r.open_tagged(&root, Some(tag))?;
            Ok(h.variant().to_string())
        }));
    }
    let mut got: Vec<String> = Vec::new();
    for j in joins {
        got.push(j.join().map_err(|_| anyhow!("thread panicked"))??);
    }
    got.sort();
    assert_eq!(got, vec!["", "", "med", "med"]);
    Ok(())
}
