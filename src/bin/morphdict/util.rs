use morphdict::{Descriptor, Resolver, ResolverConfig};

/// Resolver configured from MORPHDICT_* env variables.
pub fn resolver_from_env() -> Resolver {
    let cfg = ResolverConfig::from_env();
    log::debug!("{}", cfg);
    Resolver::new(cfg)
}

/// Human-readable variant column ("(default)" for the language's main dictionary).
pub fn variant_label(variant: &str) -> &str {
    if variant.is_empty() {
        "(default)"
    } else {
        variant
    }
}

/// Tag column; "-" for variants only the legacy scheme can address.
pub fn tag_label(d: &Descriptor) -> String {
    d.language_tag().unwrap_or_else(|| "-".to_string())
}
