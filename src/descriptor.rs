//! Dictionary descriptors and the default `dictionary.info` reader.
//!
//! Формат descriptor-файла (<dict_dir>/dictionary.info):
//!
//! ```text
//! info: Dictionary-Format: 2
//! info: Language-Code: fi
//! info: Language-Variant: medicine
//! info: Description: Finnish with medical terms
//! info: Morphology-Backend: malaga
//! ```
//!
//! Только первая строка обязательна по форме; остальные ключи опциональны,
//! кроме Language-Code. Незнакомые строки игнорируются — они относятся к
//! бинарному словарю, который разбирает внешний движок.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::consts::{
    DEFAULT_ANALYZER_BACKEND, DEFAULT_MORPHOLOGY_BACKEND, DEFAULT_TOKEN, DESCRIPTOR_FILE,
    DESCRIPTOR_FORMAT, DESCRIPTOR_HEADER, INFO_PREFIX, KEY_DESCRIPTION, KEY_HYPHENATOR_BACKEND,
    KEY_LANGUAGE_CODE, KEY_LANGUAGE_VARIANT, KEY_MORPHOLOGY_BACKEND, KEY_SPELLER_BACKEND,
    KEY_SUGGESTION_BACKEND, MAX_SUBTAG_LEN, MIN_LANGUAGE_LEN, PRIVATE_USE_SINGLETON,
    VARIANT_DIR_PREFIX,
};

/// Names of the analysis backends a dictionary asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackendSpec {
    pub morphology: String,
    pub speller: String,
    pub suggestion: String,
    pub hyphenator: String,
}

impl Default for BackendSpec {
    fn default() -> Self {
        Self {
            morphology: DEFAULT_MORPHOLOGY_BACKEND.to_string(),
            speller: DEFAULT_ANALYZER_BACKEND.to_string(),
            suggestion: DEFAULT_ANALYZER_BACKEND.to_string(),
            hyphenator: DEFAULT_ANALYZER_BACKEND.to_string(),
        }
    }
}

/// One installed dictionary.
///
/// `language` is always lowercase. `variant` is kept as written (the legacy
/// scheme compares it case-sensitively); its lowercase form is computed once
/// here for tag matching.
///
/// `default` marks the language's main dictionary: an empty variant, or a
/// `default` / `mor-default` directory whatever variant its file declares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub language: String,
    pub variant: String,
    pub description: String,
    pub dir: PathBuf,
    pub backends: BackendSpec,
    default: bool,
    #[serde(skip)]
    variant_key: String,
}

impl Descriptor {
    pub fn new(
        language: &str,
        variant: &str,
        description: &str,
        dir: impl Into<PathBuf>,
        backends: BackendSpec,
    ) -> Result<Self> {
        let language = normalize_language(language)?;
        Ok(Self {
            language,
            variant: variant.to_string(),
            description: description.to_string(),
            dir: dir.into(),
            backends,
            default: variant.is_empty(),
            variant_key: variant.to_ascii_lowercase(),
        })
    }

    /// Mark as the language's main dictionary (empty-variant ones always are).
    pub fn with_default(mut self, on: bool) -> Self {
        self.default = on || self.variant.is_empty();
        self
    }

    /// True for "the" dictionary of its language.
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Lowercased variant, the form tag resolution compares against.
    pub fn variant_key(&self) -> &str {
        &self.variant_key
    }

    /// Canonical tag for this dictionary: `lang`, or `lang-x-...` with the
    /// variant cut into 8-character private-use subtags.
    ///
    /// None when the variant has characters other than ASCII letters and
    /// digits: such a dictionary is reachable only through the legacy scheme.
    pub fn language_tag(&self) -> Option<String> {
        let key = &self.variant_key;
        if key.is_empty() {
            return Some(self.language.clone());
        }
        if !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        let mut tag = self.language.clone();
        tag.push('-');
        tag.push_str(PRIVATE_USE_SINGLETON);
        for chunk in key.as_bytes().chunks(MAX_SUBTAG_LEN) {
            tag.push('-');
            // chunks of an ASCII string are valid UTF-8
            tag.push_str(&String::from_utf8_lossy(chunk));
        }
        Some(tag)
    }
}

/// Lowercase a language code, dropping a `_REGION` suffix (`fi_FI` -> `fi`).
pub fn normalize_language(code: &str) -> Result<String> {
    let code = code.trim();
    let lang = match code.find('_') {
        Some(pos) => &code[..pos],
        None => code,
    };
    if lang.len() < MIN_LANGUAGE_LEN
        || lang.len() > MAX_SUBTAG_LEN
        || !lang.bytes().all(|b| b.is_ascii_alphabetic())
    {
        return Err(anyhow!("invalid language code '{}'", code));
    }
    Ok(lang.to_ascii_lowercase())
}

/// Reads a descriptor from one dictionary directory.
///
/// This is the seam to the morphology subsystem: the default implementation
/// understands `dictionary.info`, embedders may plug in their own.
pub trait DescriptorReader: Send + Sync {
    fn read_descriptor(&self, dir: &Path) -> Result<Descriptor>;
}

/// Reader for the `dictionary.info` line format.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfoFileReader;

impl DescriptorReader for InfoFileReader {
    fn read_descriptor(&self, dir: &Path) -> Result<Descriptor> {
        let path = dir.join(DESCRIPTOR_FILE);
        let f = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        let mut lines = BufReader::new(f).lines();

        let header = match lines.next() {
            Some(line) => line.with_context(|| format!("read {}", path.display()))?,
            None => return Err(anyhow!("{} is empty", path.display())),
        };
        if header.trim_end() != DESCRIPTOR_HEADER {
            return Err(anyhow!(
                "{}: not a format {} dictionary (header {:?})",
                path.display(),
                DESCRIPTOR_FORMAT,
                header
            ));
        }

        let mut language: Option<String> = None;
        let mut variant: Option<String> = None;
        let mut description = String::new();
        let mut backends = BackendSpec::default();

        for line in lines {
            let line = line.with_context(|| format!("read {}", path.display()))?;
            let Some((key, value)) = split_info_line(&line) else {
                continue;
            };
            match key {
                KEY_LANGUAGE_CODE => language = Some(value.to_string()),
                KEY_LANGUAGE_VARIANT => variant = Some(value.to_string()),
                KEY_DESCRIPTION => description = value.to_string(),
                KEY_MORPHOLOGY_BACKEND => backends.morphology = value.to_string(),
                KEY_SPELLER_BACKEND => backends.speller = value.to_string(),
                KEY_SUGGESTION_BACKEND => backends.suggestion = value.to_string(),
                KEY_HYPHENATOR_BACKEND => backends.hyphenator = value.to_string(),
                _ => {}
            }
        }

        let language = language
            .ok_or_else(|| anyhow!("{}: missing {}", path.display(), KEY_LANGUAGE_CODE))?;
        let variant = match variant {
            Some(v) => v,
            None => variant_from_dir_name(dir),
        };

        let d = Descriptor::new(&language, &variant, &description, dir, backends)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(d.with_default(is_default_dir(dir)))
    }
}

/// `info: Key: value` -> (Key, value). Anything else is not ours.
fn split_info_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(INFO_PREFIX)?;
    let (key, value) = rest.split_once(": ")?;
    Some((key.trim(), value.trim()))
}

/// Directory name with the optional `mor-` prefix removed.
fn dir_variant_name(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_prefix(VARIANT_DIR_PREFIX) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => name,
    }
}

/// Variant implied by the directory name: `mor-medicine` -> `medicine`,
/// `default` / `mor-default` -> "" (the language's main dictionary).
fn variant_from_dir_name(dir: &Path) -> String {
    if is_default_dir(dir) {
        String::new()
    } else {
        dir_variant_name(dir)
    }
}

/// `default` / `mor-default` hold the main dictionary, even when the
/// descriptor names a variant.
fn is_default_dir(dir: &Path) -> bool {
    dir_variant_name(dir) == DEFAULT_TOKEN
}
