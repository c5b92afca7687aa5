// Базовые модули
pub mod consts;
pub mod config;
pub mod error;

// Descriptor'ы и скан установки
pub mod descriptor; // src/descriptor.rs (Descriptor, DescriptorReader, dictionary.info)
pub mod scan;       // src/scan.rs (Snapshot, scan, scan_locations)
pub mod index;      // src/index.rs (languages, by_language)

// Две схемы адресации
pub mod legacy;     // src/legacy.rs ("", "default", variant id, lang_REGION)
pub mod tag;        // src/tag/{mod,parse,resolve}.rs (BCP-47 + private use)

// Загрузка backend'а и хэндлы
pub mod backend;
pub mod handle;
pub mod resolver;

// Удобные реэкспорты
pub use backend::{Backend, BackendLoader, BuiltinLoader};
pub use config::{ResolverBuilder, ResolverConfig};
pub use descriptor::{BackendSpec, Descriptor, DescriptorReader, InfoFileReader};
pub use error::{ResolveError, ScanError, TagSyntaxError};
pub use handle::DictionaryHandle;
pub use resolver::Resolver;
pub use scan::{scan, scan_locations, scan_with, ScanDiagnostic, Snapshot};
pub use tag::LanguageTag;
