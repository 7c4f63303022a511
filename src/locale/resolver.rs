//! Matching runtime locales against declared table locales.

use super::catalog::lookup_key;

/// Returns true if `candidate` equals `runtime` or is a prefix of it ending
/// on a subtag boundary. Both are compared normalized and case-insensitively.
///
/// `en` matches `en-US` and `en`, but not `eng`.
#[must_use]
pub fn locale_matches(runtime: &str, candidate: &str) -> bool {
    let (Some(runtime), Some(candidate)) = (lookup_key(runtime), lookup_key(candidate)) else {
        return false;
    };

    runtime
        .strip_prefix(&candidate)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
}

/// Returns true if both identifiers name the same locale, ignoring ASCII
/// case and `_`/`-` differences.
#[must_use]
pub fn same_locale(a: &str, b: &str) -> bool {
    matches!((lookup_key(a), lookup_key(b)), (Some(a), Some(b)) if a == b)
}

/// Picks the declared locale that best fits the runtime locale.
///
/// The longest matching identifier wins, so `en-GB` beats `en` for a runtime
/// locale of `en-GB`. Among equally long matches the first declared wins.
/// Returns `None` when nothing matches; callers fall back to the first
/// declared identifier.
///
/// # Examples
/// ```
/// use locale_table::locale::best_match;
///
/// let declared = ["en", "es", "es-MX"];
/// assert_eq!(best_match("es_MX.UTF-8", &declared), Some("es-MX"));
/// assert_eq!(best_match("en-US", &declared), Some("en"));
/// assert_eq!(best_match("fr-FR", &declared), None);
/// ```
#[must_use]
pub fn best_match<'a, S: AsRef<str>>(runtime_locale: &str, candidates: &'a [S]) -> Option<&'a str> {
    candidates
        .iter()
        .rev()
        .map(AsRef::as_ref)
        .filter(|candidate| locale_matches(runtime_locale, candidate))
        // `max_by_key` keeps the last maximum; iterating in reverse makes that the first declared.
        .max_by_key(|candidate| candidate.trim().len())
}
