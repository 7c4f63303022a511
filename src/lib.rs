//! locale-table
//!
//! CSV ファイルを裏に持つランタイム翻訳テーブル
//!
//! The first row of the file lists locale identifiers, every further row is a
//! key followed by one translation per locale. [`TranslationStore`] serves
//! lookups for the current locale, counts which keys were requested and can
//! rewrite the file with the requested keys merged into it.

pub mod codec;
pub mod config;
pub mod error;
pub mod locale;
pub mod store;
mod test_utils;

pub use error::TranslatorError;
pub use store::{
    SharedTranslator,
    StoreOptions,
    Translated,
    TranslationStore,
};
