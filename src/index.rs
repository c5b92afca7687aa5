//! Read-only language views over a `Snapshot`.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::scan::Snapshot;

/// Every distinct language in the snapshot, sorted.
pub fn languages(snapshot: &Snapshot) -> BTreeSet<String> {
    snapshot.language_map().keys().cloned().collect()
}

/// Descriptors of one language in scan order; empty if none.
pub fn by_language<'a>(snapshot: &'a Snapshot, lang: &str) -> Vec<&'a Arc<Descriptor>> {
    let lang = lang.to_ascii_lowercase();
    match snapshot.language_map().get(&lang) {
        Some(ids) => ids.iter().map(|&i| &snapshot.entries()[i]).collect(),
        None => Vec::new(),
    }
}

/// The dictionary to use when only a language is known: the first default
/// dictionary in scan order (see `Descriptor::is_default`), else the first
/// one scanned.
pub fn preferred_for_language<'a>(
    snapshot: &'a Snapshot,
    lang: &str,
) -> Option<&'a Arc<Descriptor>> {
    let candidates = by_language(snapshot, lang);
    candidates
        .iter()
        .find(|d| d.is_default())
        .or_else(|| candidates.first())
        .copied()
}
