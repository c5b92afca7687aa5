use anyhow::Result;
use std::path::PathBuf;

use super::util::{resolver_from_env, tag_label, variant_label};

/// CLI: open — резолв + загрузка backend'а, затем сразу close.
pub fn exec(path: PathBuf, tag: Option<String>, variant: Option<String>) -> Result<()> {
    let resolver = resolver_from_env();
    let handle = match tag {
        Some(t) => resolver.open_tagged(&path, Some(&t))?,
        None => resolver.open_legacy(&path, variant.as_deref())?,
    };

    let d = handle.descriptor();
    println!("tag:         {}", tag_label(d));
    println!("language:    {}", d.language);
    println!("variant:     {}", variant_label(&d.variant));
    println!("description: {}", d.description);
    println!("dir:         {}", d.dir.display());
    if let Some(b) = handle.backend() {
        println!("backend:     {}", b.kind());
    }

    resolver.close(handle)?;
    Ok(())
}
