//! Locale resolution: known descriptors, fuzzy matching and the host locale.
/// Known locale descriptors
mod catalog;
/// Runtime-to-declared locale matching
mod resolver;
/// Host locale providers
mod system;

pub use catalog::{
    LocaleCatalog,
    LocaleDescriptor,
};
pub use resolver::{
    best_match,
    locale_matches,
    same_locale,
};
pub use system::{
    FALLBACK_LOCALE,
    FixedLocale,
    SysLocale,
    SystemLocale,
    normalize_locale_tag,
    runtime_locale,
};
