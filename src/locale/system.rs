//! Runtime locale providers.

use std::fmt;

/// Locale assumed when the host reports none.
pub const FALLBACK_LOCALE: &str = "en";

/// Read-only source of the host's default locale.
pub trait SystemLocale: fmt::Debug + Send {
    /// Return the raw locale string when available.
    fn system_locale(&self) -> Option<String>;
}

/// Provider backed by `sys-locale`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SysLocale;

impl SystemLocale for SysLocale {
    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Provider that always reports the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }
}

impl SystemLocale for FixedLocale {
    fn system_locale(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Normalize a raw locale string into a hyphenated language tag.
///
/// Strips encoding suffixes (`.UTF-8`) and modifiers (`@euro`) and replaces
/// underscores with hyphens. Case is preserved.
///
/// # Examples
///
/// ```rust
/// use locale_table::locale::normalize_locale_tag;
///
/// assert_eq!(normalize_locale_tag("en_US.UTF-8"), Some("en-US".to_string()));
/// assert_eq!(normalize_locale_tag("de_DE@euro"), Some("de-DE".to_string()));
/// assert_eq!(normalize_locale_tag("  "), None);
/// ```
#[must_use]
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let stripped = raw.trim().split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.replace('_', "-"))
}

/// The provider's locale, normalized, or [`FALLBACK_LOCALE`].
pub fn runtime_locale(provider: &dyn SystemLocale) -> String {
    provider.system_locale().as_deref().and_then(normalize_locale_tag).unwrap_or_else(|| {
        tracing::debug!("No runtime locale reported, assuming '{FALLBACK_LOCALE}'");
        FALLBACK_LOCALE.to_string()
    })
}
