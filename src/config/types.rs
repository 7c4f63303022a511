use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::codec::{
    DEFAULT_SEPARATOR,
    validate_separator,
};
use crate::locale::{
    FixedLocale,
    SysLocale,
    SystemLocale,
};
use crate::store::{
    StoreOptions,
    TranslationStore,
};

/// One invalid setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationsFile")
    pub field_path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failures while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more settings are invalid.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`TranslatorSettings`].
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.locale-table.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Translations file, relative to the workspace root unless absolute.
    pub translations_file: PathBuf,

    /// Field separator of the translations file.
    pub separator: char,

    /// Overrides the host locale when set.
    pub locale: Option<String>,

    /// Rewrite the translations file after the run.
    pub regenerate_on_exit: bool,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            translations_file: PathBuf::from("translations.csv"),
            separator: DEFAULT_SEPARATOR,
            locale: None,
            regenerate_on_exit: true,
        }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Empty translations file name
    /// - Separator that is a quote or line terminator
    /// - Empty locale override
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translations_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "translationsFile",
                "The path cannot be empty. Example: \"translations.csv\"",
            ));
        }

        if let Err(e) = validate_separator(self.separator) {
            errors.push(ValidationError::new(
                "separator",
                format!("{e}. Example: \",\" or \";\""),
            ));
        }

        if let Some(locale) = &self.locale
            && locale.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "locale",
                "The locale cannot be empty. Specify a language tag (e.g., \"es-MX\"), or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The translations file resolved against `workspace_root`.
    #[must_use]
    pub fn translations_path(&self, workspace_root: &Path) -> PathBuf {
        if self.translations_file.is_absolute() {
            self.translations_file.clone()
        } else {
            workspace_root.join(&self.translations_file)
        }
    }

    /// Store options for these settings.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        let locale_source: Box<dyn SystemLocale> = match &self.locale {
            Some(locale) => Box::new(FixedLocale::new(locale.clone())),
            None => Box::new(SysLocale),
        };
        StoreOptions { separator: self.separator, locale_source, ..StoreOptions::default() }
    }

    /// Opens the store these settings describe.
    #[must_use]
    pub fn open_store(&self, workspace_root: &Path) -> TranslationStore {
        TranslationStore::with_options(self.translations_path(workspace_root), self.store_options())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = TranslatorSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"separator": ";", "locale": "es-MX"}"#;

        let settings: TranslatorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.separator, eq(';'));
        assert_that!(settings.locale, some(eq("es-MX")));
        assert_eq!(settings.translations_file, PathBuf::from("translations.csv"));
        assert_that!(settings.regenerate_on_exit, eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: TranslatorSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings, TranslatorSettings::default());
    }

    #[rstest]
    fn validate_invalid_translations_file_empty() {
        let settings =
            TranslatorSettings { translations_file: PathBuf::new(), ..TranslatorSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationsFile")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case('"')]
    #[case('\n')]
    #[case('\r')]
    fn validate_invalid_separator(#[case] separator: char) {
        let settings = TranslatorSettings { separator, ..TranslatorSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("separator")),
                field!(ValidationError.message, contains_substring("Invalid separator"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_locale_empty() {
        let settings =
            TranslatorSettings { locale: Some("  ".to_string()), ..TranslatorSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("locale")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case("translations.csv", "/srv/app/translations.csv")]
    #[case("i18n/strings.csv", "/srv/app/i18n/strings.csv")]
    #[case("/etc/app/strings.csv", "/etc/app/strings.csv")]
    fn translations_path_resolution(#[case] file: &str, #[case] expected: &str) {
        let settings =
            TranslatorSettings { translations_file: file.into(), ..TranslatorSettings::default() };

        assert_eq!(settings.translations_path(Path::new("/srv/app")), PathBuf::from(expected));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = TranslatorSettings {
            translations_file: PathBuf::new(),
            separator: '"',
            ..TranslatorSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. translationsFile"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. separator"));
        assert_that!(error_message, contains_substring("Invalid separator"));
    }
}
