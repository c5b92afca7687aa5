//! Общие константы: формат descriptor-файла, грамматика тегов, имена env-переменных.

// -------- Descriptor file --------
pub const DESCRIPTOR_FILE: &str = "dictionary.info";
pub const DESCRIPTOR_FORMAT: &str = "2";
/// Первая строка обязана совпадать байт-в-байт, иначе каталог пропускается.
pub const DESCRIPTOR_HEADER: &str = "info: Dictionary-Format: 2";
pub const INFO_PREFIX: &str = "info: ";

pub const KEY_LANGUAGE_CODE: &str = "Language-Code";
pub const KEY_LANGUAGE_VARIANT: &str = "Language-Variant";
pub const KEY_DESCRIPTION: &str = "Description";
pub const KEY_MORPHOLOGY_BACKEND: &str = "Morphology-Backend";
pub const KEY_SPELLER_BACKEND: &str = "Speller-Backend";
pub const KEY_SUGGESTION_BACKEND: &str = "Suggestion-Backend";
pub const KEY_HYPHENATOR_BACKEND: &str = "Hyphenator-Backend";

pub const DEFAULT_MORPHOLOGY_BACKEND: &str = "malaga";
pub const DEFAULT_ANALYZER_BACKEND: &str = "analyzer";
pub const NULL_BACKEND: &str = "null";

// Подкаталоги вида "mor-<variant>" — имя варианта без префикса.
pub const VARIANT_DIR_PREFIX: &str = "mor-";

// -------- Legacy addressing --------
pub const DEFAULT_TOKEN: &str = "default";

// -------- Language tags --------
pub const MAX_SUBTAG_LEN: usize = 8;
pub const MIN_LANGUAGE_LEN: usize = 2;
pub const PRIVATE_USE_SINGLETON: &str = "x";

// -------- Environment --------
pub const ENV_DEFAULT_LANGUAGE: &str = "MORPHDICT_DEFAULT_LANGUAGE";
pub const ENV_DICTIONARY: &str = "MORPHDICT_DICTIONARY";
pub const ENV_PATH: &str = "MORPHDICT_PATH";
pub const ENV_CACHE_SNAPSHOTS: &str = "MORPHDICT_CACHE_SNAPSHOTS";
