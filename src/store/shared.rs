//! Lock-wrapped store for the host's composition root.

use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError,
};

use super::TranslationStore;
use crate::error::TranslatorError;

/// Cloneable handle to one [`TranslationStore`].
///
/// Every method takes the lock once, so `translate` stays a single step
/// for concurrent callers. Listeners registered on the store run while the
/// lock is held and must not call back into the same handle.
#[derive(Debug, Clone)]
pub struct SharedTranslator {
    /// The wrapped store.
    inner: Arc<Mutex<TranslationStore>>,
}

impl SharedTranslator {
    #[must_use]
    pub fn new(store: TranslationStore) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    /// Locks the store, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, TranslationStore> {
        // A panicking listener leaves the store itself consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.lock().translate(key)
    }

    pub fn set_current_locale(&self, locale: &str) -> bool {
        self.lock().set_current_locale(locale)
    }

    #[must_use]
    pub fn current_locale(&self) -> Option<String> {
        self.lock().current_locale().map(str::to_owned)
    }

    #[must_use]
    pub fn available_locales(&self) -> Vec<String> {
        self.lock().available_locales().to_vec()
    }

    pub fn regenerate_file(&self) -> Result<(), TranslatorError> {
        self.lock().regenerate_file()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut TranslationStore) -> R) -> R {
        f(&mut self.lock())
    }
}

/// Call-site shorthand: `"Hello".translated(&translator)`.
pub trait Translated {
    fn translated(&self, translator: &SharedTranslator) -> String;
}

impl Translated for str {
    fn translated(&self, translator: &SharedTranslator) -> String {
        translator.translate(self)
    }
}
