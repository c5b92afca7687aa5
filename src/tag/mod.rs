//! BCP-47 style addressing, split into submodules:
//! - parse.rs: subtag grammar -> LanguageTag (no matching here).
//! - resolve.rs: LanguageTag -> Descriptor against a Snapshot.
//!
//! Вариант словаря передаётся через private use (`-x-`): подтеги после `x`
//! склеиваются без разделителей, поэтому длинное имя можно резать на куски
//! по 8 символов как угодно.

mod parse;
mod resolve;

pub use parse::LanguageTag;
pub use resolve::resolve_tagged;
