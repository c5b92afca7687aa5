use log::debug;
use std::sync::Arc;

use super::parse::LanguageTag;
use crate::descriptor::Descriptor;
use crate::error::{ResolveError, Result, TagSyntaxError};
use crate::index::{by_language, preferred_for_language};
use crate::scan::Snapshot;

/// Resolve a language tag against `snapshot`.
///
/// Absent or empty tags are `InvalidTag`: this scheme never falls back to a
/// configured default.
pub fn resolve_tagged(snapshot: &Snapshot, tag: Option<&str>) -> Result<Arc<Descriptor>> {
    let raw = match tag {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ResolveError::invalid_tag(tag, TagSyntaxError::Empty)),
    };
    let parsed =
        LanguageTag::parse(raw).map_err(|reason| ResolveError::invalid_tag(tag, reason))?;

    match parsed.private_use {
        Some(variant) => {
            let found = by_language(snapshot, &parsed.language)
                .into_iter()
                .find(|d| d.variant_key() == variant)
                .cloned();
            match found {
                Some(d) => {
                    debug!("tag: '{}' -> {}", raw, d.dir.display());
                    Ok(d)
                }
                None => Err(ResolveError::VariantNotFound { variant }),
            }
        }
        None => {
            let d = preferred_for_language(snapshot, &parsed.language)
                .cloned()
                .ok_or(ResolveError::NoDictionariesForLanguage {
                    language: parsed.language,
                })?;
            debug!("tag: '{}' -> {}", raw, d.dir.display());
            Ok(d)
        }
    }
}
