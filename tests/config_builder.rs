use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use morphdict::consts::{
    DESCRIPTOR_FILE, ENV_CACHE_SNAPSHOTS, ENV_DEFAULT_LANGUAGE, ENV_DICTIONARY, ENV_PATH,
};
use morphdict::{ResolveError, Resolver, ResolverBuilder, ResolverConfig};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("morphdict-builder-{prefix}-{pid}-{t}-{id}"))
}

fn install(root: &Path, dir: &str, lang: &str) -> Result<()> {
    let d = root.join(dir);
    fs::create_dir_all(&d)?;
    fs::write(
        d.join(DESCRIPTOR_FILE),
        format!("info: Dictionary-Format: 2\ninfo: Language-Code: {lang}\n"),
    )?;
    fs::write(d.join("lexicon.bin"), b"lexicon")?;
    Ok(())
}

#[test]
fn builder_default_language_drives_legacy_default() -> Result<()> {
    let root = unique_root("lang");
    install(&root, "mor-default", "fi")?;
    install(&root, "sv", "sv")?;

    // без настройки берётся первый язык по сортировке
    let r = Resolver::new(ResolverBuilder::from_default().build());
    assert_eq!(r.open_legacy(&root, None)?.language(), "fi");

    let cfg = ResolverBuilder::from_default()
        .default_language(Some("SV"))
        .build();
    assert_eq!(cfg.default_language.as_deref(), Some("sv"));
    let r = Resolver::new(cfg);
    for id in [None, Some(""), Some("default")] {
        let h = r.open_legacy(&root, id)?;
        assert_eq!(h.language(), "sv");
    }
    // явный вариант не зависит от default_language
    assert_eq!(r.open_legacy(&root, Some("fi_FI"))?.language(), "fi");
    Ok(())
}

#[test]
fn builder_default_variant_overrides_language() -> Result<()> {
    let root = unique_root("variant");
    install(&root, "mor-default", "fi")?;
    install(&root, "mor-med", "fi")?;

    let cfg = ResolverBuilder::from_default()
        .default_language(Some("fi"))
        .default_variant(Some("med"))
        .build();
    let r = Resolver::new(cfg);
    assert_eq!(r.open_legacy(&root, Some("default"))?.variant(), "med");
    // теговая схема конфиг не использует
    assert_eq!(r.open_tagged(&root, Some("fi"))?.variant(), "");

    let r = Resolver::new(
        ResolverConfig::default().with_default_variant(Some("missing")),
    );
    match r.open_legacy(&root, None) {
        Err(ResolveError::VariantNotFound { variant }) => assert_eq!(variant, "missing"),
        other => panic!("expected VariantNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn config_setters_and_display() {
    let cfg = ResolverConfig::default()
        .with_default_language(Some("FI"))
        .with_extra_paths(vec![PathBuf::from("/opt/dicts")])
        .with_cache_snapshots(false)
        .build();
    assert_eq!(cfg.default_language.as_deref(), Some("fi"));
    assert!(!cfg.cache_snapshots);

    let s = cfg.to_string();
    assert!(s.contains("default_language: fi"));
    assert!(s.contains("/opt/dicts"));
    assert!(s.contains("cache_snapshots: false"));

    let built = ResolverBuilder::from_default()
        .default_language(Some("fi"))
        .extra_path("/opt/dicts")
        .cache_snapshots(false)
        .build();
    assert_eq!(built, cfg);
}

// Единственный тест в этом файле, который трогает MORPHDICT_*.
#[test]
fn env_is_read_by_from_env_and_builder_new() -> Result<()> {
    let extra = unique_root("env-extra");
    install(&extra, "mor-default", "et")?;
    let root = unique_root("env-root");
    install(&root, "mor-default", "fi")?;

    let joined = std::env::join_paths([extra.clone(), PathBuf::from("")])?;
    std::env::set_var(ENV_DEFAULT_LANGUAGE, " ET ");
    std::env::set_var(ENV_DICTIONARY, "");
    std::env::set_var(ENV_PATH, &joined);
    std::env::set_var(ENV_CACHE_SNAPSHOTS, "off");

    let cfg = ResolverConfig::from_env();
    let via_builder = Resolver::builder().build();

    for k in [ENV_DEFAULT_LANGUAGE, ENV_DICTIONARY, ENV_PATH, ENV_CACHE_SNAPSHOTS] {
        std::env::remove_var(k);
    }

    assert_eq!(cfg.default_language.as_deref(), Some("et"));
    assert_eq!(cfg.default_variant, None);
    assert_eq!(cfg.extra_paths, vec![extra.clone()]);
    assert!(!cfg.cache_snapshots);
    assert_eq!(via_builder, cfg);

    let r = Resolver::new(cfg);
    assert_eq!(r.open_legacy(&root, None)?.language(), "et");

    // мусор в bool-переменной игнорируется
    std::env::set_var(ENV_CACHE_SNAPSHOTS, "maybe");
    let cfg = ResolverConfig::from_env();
    std::env::remove_var(ENV_CACHE_SNAPSHOTS);
    assert!(cfg.cache_snapshots);
    Ok(())
}
