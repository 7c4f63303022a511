//! Translation store: the loaded table, the active locale and the usage ledger.
/// Shared handle for hosts that translate from several places
mod shared;
/// In-memory table
mod table;
/// Usage counts
mod usage;

use std::collections::HashMap;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

pub use shared::{
    SharedTranslator,
    Translated,
};
pub use table::TranslationTable;
pub use usage::UsageLedger;

use crate::codec::{
    self,
    DEFAULT_SEPARATOR,
};
use crate::error::TranslatorError;
use crate::locale::{
    self,
    LocaleCatalog,
    LocaleDescriptor,
    SysLocale,
    SystemLocale,
};

/// Callback invoked after the current locale changed.
pub type LocaleListener = Box<dyn FnMut(&TranslationStore) + Send>;

/// Construction options for [`TranslationStore`].
#[derive(Debug)]
pub struct StoreOptions {
    /// Field separator of the translations file.
    pub separator: char,
    /// Host default locale, queried at construction and by
    /// [`TranslationStore::use_system_locale`].
    pub locale_source: Box<dyn SystemLocale>,
    /// Known locales used for descriptor lookups.
    pub catalog: LocaleCatalog,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            locale_source: Box::new(SysLocale),
            catalog: LocaleCatalog::builtin(),
        }
    }
}

/// Runtime translation table backed by a delimited text file.
///
/// Not synchronized: wrap it in [`SharedTranslator`] (or another lock) to
/// translate from several threads.
pub struct TranslationStore {
    /// Translations file.
    path: PathBuf,
    /// Field separator of the file.
    separator: char,
    /// Table as last read, or synthesized from the host locale.
    table: TranslationTable,
    /// Whether `table` was read from disk rather than synthesized.
    loaded_from_file: bool,
    /// Selected locale; always one of the table's locales once constructed.
    current_locale: Option<String>,
    /// Key → translation for `current_locale`; empty for the source locale.
    active_map: HashMap<String, String>,
    /// Requests counted by `translate`.
    usage: UsageLedger,
    /// Known locale descriptors.
    catalog: LocaleCatalog,
    /// Host locale provider.
    locale_source: Box<dyn SystemLocale>,
    /// Called after each locale change, in registration order.
    listeners: Vec<LocaleListener>,
}

impl TranslationStore {
    /// Opens the store at `path` using the host locale and built-in catalog.
    ///
    /// Never fails; see [`TranslationStore::with_options`].
    pub fn new(path: impl Into<PathBuf>, separator: char) -> Self {
        Self::with_options(path, StoreOptions { separator, ..StoreOptions::default() })
    }

    /// Opens the store at `path`.
    ///
    /// The header row becomes the available locales. A missing, empty or
    /// unreadable file degrades to a single locale taken from the host, so
    /// construction never fails. The current locale is the declared locale
    /// that best matches the host locale, or the first declared one.
    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        let path = path.into();
        let StoreOptions { separator, locale_source, catalog } = options;
        let runtime = locale::runtime_locale(locale_source.as_ref());

        let loaded = match TranslationTable::load(&path, separator) {
            Ok(Some(table)) => Some(table),
            Ok(None) => {
                tracing::info!(
                    path = %path.display(),
                    "No translations header found, starting with locale '{runtime}'"
                );
                None
            }
            Err(e) => {
                tracing::warn!("{e}; starting with locale '{runtime}'");
                None
            }
        };
        let loaded_from_file = loaded.is_some();
        let table = loaded.unwrap_or_else(|| TranslationTable::new(vec![runtime.clone()]));

        let mut store = Self {
            path,
            separator,
            table,
            loaded_from_file,
            current_locale: None,
            active_map: HashMap::new(),
            usage: UsageLedger::new(),
            catalog,
            locale_source,
            listeners: Vec::new(),
        };
        store.select_locale(&runtime);
        store
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Declared locales in header order.
    #[must_use]
    pub fn available_locales(&self) -> &[String] {
        self.table.locales()
    }

    /// The source locale (column 0), whose translations are the keys themselves.
    #[must_use]
    pub fn source_locale(&self) -> Option<&str> {
        self.table.locales().first().map(String::as_str)
    }

    #[must_use]
    pub fn current_locale(&self) -> Option<&str> {
        self.current_locale.as_deref()
    }

    /// Switches the current locale.
    ///
    /// Unknown locales and the current locale are ignored. On a change the
    /// active map is rebuilt and then listeners are notified in registration
    /// order. Returns whether the locale changed.
    pub fn set_current_locale(&mut self, locale: &str) -> bool {
        if self.current_locale.as_deref() == Some(locale) {
            return false;
        }
        if self.table.locale_index(locale).is_none() {
            tracing::debug!(locale, "Ignoring unknown locale");
            return false;
        }

        self.current_locale = Some(locale.to_owned());
        self.rebuild_active_map();
        tracing::debug!(locale, "Current locale changed");
        self.notify_locale_changed();
        true
    }

    /// Registers a callback run after every locale change.
    pub fn on_locale_changed(&mut self, listener: impl FnMut(&Self) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Re-queries the host locale and selects the best declared match.
    pub fn use_system_locale(&mut self) -> bool {
        let runtime = locale::runtime_locale(self.locale_source.as_ref());
        self.select_locale(&runtime)
    }

    /// Translates `key` for the current locale and counts the request.
    ///
    /// Missing translations return `key` unchanged.
    pub fn translate(&mut self, key: &str) -> String {
        self.usage.record(key);
        self.active_map.get(key).map_or_else(|| key.to_owned(), Clone::clone)
    }

    #[must_use]
    pub const fn usage(&self) -> &UsageLedger {
        &self.usage
    }

    /// Times `key` was passed to [`TranslationStore::translate`].
    #[must_use]
    pub fn usage_count(&self, key: &str) -> u64 {
        self.usage.count(key)
    }

    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    #[must_use]
    pub const fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Descriptor of the current locale, if the catalog knows it.
    #[must_use]
    pub fn current_descriptor(&self) -> Option<&LocaleDescriptor> {
        self.catalog.canonicalize(self.current_locale.as_deref()?)
    }

    /// Descriptors of the declared locales in header order.
    #[must_use]
    pub fn available_descriptors(&self) -> Vec<Option<&LocaleDescriptor>> {
        self.table.locales().iter().map(|locale| self.catalog.canonicalize(locale)).collect()
    }

    /// Switches to the declared locale that `descriptor` describes.
    pub fn set_current_descriptor(&mut self, descriptor: &LocaleDescriptor) -> bool {
        let Some(locale) = self
            .table
            .locales()
            .iter()
            .find(|locale| locale::same_locale(locale, &descriptor.identifier))
            .cloned()
        else {
            tracing::debug!(locale = %descriptor.identifier, "Ignoring undeclared locale");
            return false;
        };
        self.set_current_locale(&locale)
    }

    /// Re-reads the file and rebuilds the active map.
    ///
    /// Listeners are notified only if the current locale disappeared and
    /// another one was selected. On error the store is left unchanged.
    pub fn reload(&mut self) -> Result<(), TranslatorError> {
        if let Some(table) = TranslationTable::load(&self.path, self.separator)? {
            self.table = table;
            self.loaded_from_file = true;
        } else {
            self.table = TranslationTable::new(self.table.locales().to_vec());
            self.loaded_from_file = false;
        }

        let still_declared = self
            .current_locale
            .as_deref()
            .is_some_and(|locale| self.table.locale_index(locale).is_some());
        if still_declared {
            self.rebuild_active_map();
        } else {
            self.current_locale = None;
            self.active_map.clear();
            self.use_system_locale();
        }
        Ok(())
    }

    /// Rewrites the file from the usage ledger and the current file content.
    ///
    /// Keys requested this run come first, least used first; keys only in
    /// the file follow in their file order. The header and cells are taken
    /// from a fresh read of the file so columns and edits added since
    /// construction survive, falling back to the in-memory table. Creates
    /// the file if it does not exist.
    pub fn regenerate_file(&self) -> Result<(), TranslatorError> {
        tracing::info!(path = %self.path.display(), "Regenerating translations file");

        let on_disk = TranslationTable::load(&self.path, self.separator)?;
        let header = self.rewrite_header(on_disk.as_ref());

        let mut rows = Vec::with_capacity(self.usage.len() + 1);
        rows.push(header.clone());
        for key in self.rewrite_order(on_disk.as_ref()) {
            let row = header
                .iter()
                .enumerate()
                .map(|(index, locale)| {
                    if index == 0 {
                        key.to_owned()
                    } else {
                        self.rewrite_cell(on_disk.as_ref(), key, locale)
                    }
                })
                .collect();
            rows.push(row);
        }

        codec::write_file(&self.path, &rows, self.separator)?;
        tracing::info!(keys = rows.len() - 1, "Translations file written");
        Ok(())
    }

    /// The file's header followed by loaded locales it lacks.
    ///
    /// A synthesized header only applies when the file has none.
    fn rewrite_header(&self, on_disk: Option<&TranslationTable>) -> Vec<String> {
        let Some(on_disk) = on_disk else {
            return self.table.locales().to_vec();
        };

        let mut header = on_disk.locales().to_vec();
        if self.loaded_from_file {
            for locale in self.table.locales() {
                if !header.contains(locale) {
                    tracing::debug!(
                        locale = %locale,
                        "Locale missing from the file, keeping its column"
                    );
                    header.push(locale.clone());
                }
            }
        }
        header
    }

    /// Ledger keys by ascending usage, then keys found only in the file.
    fn rewrite_order<'a>(&'a self, on_disk: Option<&'a TranslationTable>) -> Vec<&'a str> {
        let mut keys = self.usage.keys_by_usage();
        if let Some(on_disk) = on_disk {
            keys.extend(on_disk.keys().filter(|key| !self.usage.contains(key)));
        }
        keys
    }

    /// Cell for `key` in `locale`: the file first, then memory, else empty.
    fn rewrite_cell(&self, on_disk: Option<&TranslationTable>, key: &str, locale: &str) -> String {
        on_disk
            .and_then(|table| table.cell_for_locale(key, locale))
            .or_else(|| self.table.cell_for_locale(key, locale))
            .unwrap_or_default()
            .to_owned()
    }

    /// Selects the declared locale best matching `runtime`, else the first declared.
    fn select_locale(&mut self, runtime: &str) -> bool {
        let matched = locale::best_match(runtime, self.table.locales()).map(str::to_owned);
        let target = matched.or_else(|| {
            let first = self.source_locale().map(str::to_owned);
            tracing::debug!(
                runtime,
                fallback = ?first,
                "No declared locale matches, using the first declared locale"
            );
            first
        });
        target.is_some_and(|locale| self.set_current_locale(&locale))
    }

    /// Refills `active_map` from the current locale's column.
    fn rebuild_active_map(&mut self) {
        let index = self.current_locale.as_deref().and_then(|locale| self.table.locale_index(locale));
        self.active_map = match index {
            Some(index) if index > 0 && self.loaded_from_file => self.table.column(index),
            _ => HashMap::new(),
        };
    }

    /// Runs every listener once.
    fn notify_locale_changed(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(self);
        }
        self.listeners = listeners;
    }
}

impl fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationStore")
            .field("path", &self.path)
            .field("separator", &self.separator)
            .field("locales", &self.table.locales())
            .field("keys", &self.table.len())
            .field("current_locale", &self.current_locale)
            .field("usage", &self.usage.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
