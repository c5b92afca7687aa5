use anyhow::Result;
use std::path::PathBuf;

use super::util::resolver_from_env;

pub fn exec(path: PathBuf) -> Result<()> {
    let resolver = resolver_from_env();
    for lang in resolver.list_languages(&path)? {
        println!("{}", lang);
    }
    Ok(())
}
