//! Old addressing scheme: opaque variant id, "default", or `lang_REGION`.
//!
//! Порядок правил фиксирован, первое подходящее выигрывает:
//! 1. "" / "default" / None -> словарь языка по умолчанию
//! 2. точное (регистрозависимое) совпадение с variant любого словаря
//! 3. форма `<lang>_<REGION>` -> любой словарь языка `<lang>`
//! 4. иначе VariantNotFound

use log::debug;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::consts::{DEFAULT_TOKEN, MIN_LANGUAGE_LEN};
use crate::descriptor::Descriptor;
use crate::error::{ResolveError, Result};
use crate::index::{languages, preferred_for_language};
use crate::scan::Snapshot;

/// A validated `lang_REGION` locale string such as `fi_FI`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleShape {
    pub language: String,
    pub region: String,
}

impl LocaleShape {
    /// Lowercase language of 2+ letters, `_`, uppercase region of 2+ letters.
    pub fn parse(s: &str) -> Option<Self> {
        let (lang, region) = s.split_once('_')?;
        let lang_ok = lang.len() >= MIN_LANGUAGE_LEN && lang.bytes().all(|b| b.is_ascii_lowercase());
        let region_ok = region.len() >= 2 && region.bytes().all(|b| b.is_ascii_uppercase());
        if lang_ok && region_ok {
            Some(Self {
                language: lang.to_string(),
                region: region.to_string(),
            })
        } else {
            None
        }
    }
}

/// Resolve a legacy identifier against `snapshot`.
pub fn resolve_legacy(
    snapshot: &Snapshot,
    variant_or_locale: Option<&str>,
    cfg: &ResolverConfig,
) -> Result<Arc<Descriptor>> {
    let input = variant_or_locale.unwrap_or("");

    if input.is_empty() || input == DEFAULT_TOKEN {
        return resolve_default(snapshot, cfg);
    }

    if let Some(d) = find_variant(snapshot, input) {
        debug!("legacy: '{}' matched variant in {}", input, d.dir.display());
        return Ok(d);
    }

    if let Some(locale) = LocaleShape::parse(input) {
        debug!("legacy: '{}' treated as locale of '{}'", input, locale.language);
        return preferred_for_language(snapshot, &locale.language)
            .cloned()
            .ok_or(ResolveError::NoDictionariesForLanguage {
                language: locale.language,
            });
    }

    Err(ResolveError::VariantNotFound {
        variant: input.to_string(),
    })
}

fn find_variant(snapshot: &Snapshot, variant: &str) -> Option<Arc<Descriptor>> {
    snapshot
        .entries()
        .iter()
        .find(|d| d.variant == variant)
        .cloned()
}

fn resolve_default(snapshot: &Snapshot, cfg: &ResolverConfig) -> Result<Arc<Descriptor>> {
    if let Some(variant) = cfg.default_variant.as_deref() {
        debug!("legacy: default resolves to configured variant '{}'", variant);
        return find_variant(snapshot, variant).ok_or_else(|| ResolveError::VariantNotFound {
            variant: variant.to_string(),
        });
    }

    let language = match cfg.default_language.clone() {
        Some(l) => l,
        None => match languages(snapshot).into_iter().next() {
            Some(l) => l,
            None => {
                return Err(ResolveError::NoDictionaries {
                    root: snapshot.root().to_path_buf(),
                })
            }
        },
    };
    debug!("legacy: default language '{}'", language);
    preferred_for_language(snapshot, &language)
        .cloned()
        .ok_or(ResolveError::NoDictionariesForLanguage { language })
}
