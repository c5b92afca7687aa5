use anyhow::{Context, Result};
use std::path::PathBuf;

use super::util::{resolver_from_env, tag_label, variant_label};

pub fn exec(path: PathBuf, json: bool, diagnostics: bool) -> Result<()> {
    let resolver = resolver_from_env();
    let dicts = resolver.list_dictionaries(&path)?;

    if json {
        let out = serde_json::to_string_pretty(&dicts).context("serialize dictionaries")?;
        println!("{}", out);
    } else if dicts.is_empty() {
        println!("no dictionaries under {}", path.display());
    } else {
        for d in &dicts {
            println!(
                "{:<28} {:<12} {:<16} {}",
                tag_label(d),
                d.language,
                variant_label(&d.variant),
                d.description
            );
        }
    }

    if diagnostics {
        let snapshot = resolver.snapshot(&path)?;
        for diag in snapshot.diagnostics() {
            eprintln!("skipped {}: {}", diag.dir.display(), diag.reason);
        }
    }
    Ok(())
}
