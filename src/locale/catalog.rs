//! Known locale descriptors.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Serialize,
};

use super::system::normalize_locale_tag;

/// Common language tags with English display names.
///
/// Based on the RFC 5646 subset most desktop platforms report.
const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("ar-EG", "Arabic (Egypt)"),
    ("ar-SA", "Arabic (Saudi Arabia)"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("de-AT", "German (Austria)"),
    ("de-CH", "German (Switzerland)"),
    ("de-DE", "German (Germany)"),
    ("el", "Greek"),
    ("en", "English"),
    ("en-AU", "English (Australia)"),
    ("en-CA", "English (Canada)"),
    ("en-GB", "English (United Kingdom)"),
    ("en-IE", "English (Ireland)"),
    ("en-NZ", "English (New Zealand)"),
    ("en-US", "English (United States)"),
    ("en-ZA", "English (South Africa)"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("es-AR", "Spanish (Argentina)"),
    ("es-CL", "Spanish (Chile)"),
    ("es-CO", "Spanish (Colombia)"),
    ("es-ES", "Spanish (Spain)"),
    ("es-MX", "Spanish (Mexico)"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr-BE", "French (Belgium)"),
    ("fr-CA", "French (Canada)"),
    ("fr-CH", "French (Switzerland)"),
    ("fr-FR", "French (France)"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("it-CH", "Italian (Switzerland)"),
    ("it-IT", "Italian (Italy)"),
    ("ja", "Japanese"),
    ("ja-JP", "Japanese (Japan)"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("ko-KR", "Korean (Korea)"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ms", "Malay"),
    ("nb", "Norwegian Bokmål"),
    ("nl", "Dutch"),
    ("nl-BE", "Dutch (Belgium)"),
    ("nl-NL", "Dutch (Netherlands)"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("ru-RU", "Russian (Russia)"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sr-Cyrl", "Serbian (Cyrillic)"),
    ("sv", "Swedish"),
    ("sv-FI", "Swedish (Finland)"),
    ("sv-SE", "Swedish (Sweden)"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
    ("zh-CN", "Chinese (China)"),
    ("zh-HK", "Chinese (Hong Kong)"),
    ("zh-Hans", "Chinese (Simplified)"),
    ("zh-Hant", "Chinese (Traditional)"),
    ("zh-TW", "Chinese (Taiwan)"),
    ("zu", "Zulu"),
];

/// Catalog built from [`BUILTIN_LOCALES`] on first use.
static BUILTIN_CATALOG: LazyLock<LocaleCatalog> = LazyLock::new(|| {
    LocaleCatalog::new(
        BUILTIN_LOCALES
            .iter()
            .map(|(identifier, display_name)| LocaleDescriptor::new(*identifier, *display_name)),
    )
});

/// Key used for catalog lookups: normalized tag, ASCII lowercase.
pub(super) fn lookup_key(identifier: &str) -> Option<String> {
    normalize_locale_tag(identifier).map(|tag| tag.to_ascii_lowercase())
}

/// A known locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDescriptor {
    /// Canonical language tag (e.g. `en-GB`).
    pub identifier: String,
    /// Human readable name (e.g. `English (United Kingdom)`).
    pub display_name: String,
}

impl LocaleDescriptor {
    #[must_use]
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), display_name: display_name.into() }
    }

    /// Primary language subtag (`en` for `en-GB`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.identifier.split('-').next().unwrap_or(&self.identifier)
    }
}

/// Injectable table of known locales.
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    /// Descriptors in insertion order.
    descriptors: Vec<LocaleDescriptor>,
    /// Lookup key → index into `descriptors`.
    index: HashMap<String, usize>,
}

impl LocaleCatalog {
    /// Builds a catalog. Later descriptors with an identifier already present are ignored.
    pub fn new(descriptors: impl IntoIterator<Item = LocaleDescriptor>) -> Self {
        let mut catalog = Self::default();
        for descriptor in descriptors {
            let Some(key) = lookup_key(&descriptor.identifier) else {
                tracing::debug!("Skipping locale descriptor with empty identifier");
                continue;
            };
            if catalog.index.contains_key(&key) {
                continue;
            }
            catalog.index.insert(key, catalog.descriptors.len());
            catalog.descriptors.push(descriptor);
        }
        catalog
    }

    /// The built-in catalog of common locales.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Looks up the descriptor for `identifier`.
    ///
    /// Matching ignores ASCII case and treats `_` as `-`, so `en_gb` finds `en-GB`.
    #[must_use]
    pub fn canonicalize(&self, identifier: &str) -> Option<&LocaleDescriptor> {
        let key = lookup_key(identifier)?;
        self.index.get(&key).and_then(|&index| self.descriptors.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleDescriptor> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("en", "en", "English")]
    #[case("en-GB", "en-GB", "English (United Kingdom)")]
    #[case("en_gb", "en-GB", "English (United Kingdom)")]
    #[case("ZH-hant", "zh-Hant", "Chinese (Traditional)")]
    #[case(" es ", "es", "Spanish")]
    fn canonicalize_known_identifiers(
        #[case] input: &str,
        #[case] identifier: &str,
        #[case] display_name: &str,
    ) {
        let catalog = LocaleCatalog::builtin();

        let descriptor = catalog.canonicalize(input).unwrap();

        assert_eq!(descriptor.identifier, identifier);
        assert_eq!(descriptor.display_name, display_name);
    }

    #[rstest]
    #[case("")]
    #[case("xx")]
    #[case("en-XX")]
    #[case("english")]
    fn canonicalize_unknown_identifiers(#[case] input: &str) {
        assert!(LocaleCatalog::builtin().canonicalize(input).is_none());
    }

    #[googletest::test]
    fn custom_catalog_keeps_first_duplicate() {
        let catalog = LocaleCatalog::new([
            LocaleDescriptor::new("tlh", "Klingon"),
            LocaleDescriptor::new("TLH", "Duplicate"),
            LocaleDescriptor::new("", "Nameless"),
        ]);

        expect_that!(catalog.len(), eq(1));
        assert_eq!(catalog.canonicalize("tlh").map(|d| d.display_name.as_str()), Some("Klingon"));
        expect_that!(catalog.canonicalize("en").is_none(), eq(true));
    }

    #[rstest]
    #[case("en-GB", "en")]
    #[case("zh-Hant", "zh")]
    #[case("fr", "fr")]
    fn descriptor_language(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(LocaleDescriptor::new(identifier, "").language(), expected);
    }
}
