//! Submission normalization.
//!
//! Turns a raw decoded submission into the view the required-field and email
//! stages operate on: empty values removed and, when an allow-list is
//! configured, only allow-listed names kept in allow-list order.

use formulator_core::FieldMap;

/// Normalizes a raw submission.
///
/// 1. Cleaning: a pair is kept only if its value is non-empty.
/// 2. Restriction: with an empty `allow_list` the cleaned map is returned as
///    is. Otherwise the allow-list is walked in order and each name present in
///    the cleaned map is copied over; everything else is dropped.
///
/// Pure, infallible, and idempotent.
///
/// # Examples
///
/// ```
/// use formulator_core::FieldMap;
/// use formulator_forms::normalize;
///
/// let raw: FieldMap = [("spam", "x"), ("message", "hi"), ("email", "")].into_iter().collect();
/// let allow = vec!["email".to_string(), "message".to_string()];
///
/// let cleaned = normalize(&raw, &allow);
/// assert_eq!(cleaned.keys().collect::<Vec<_>>(), vec!["message"]);
/// ```
pub fn normalize(raw: &FieldMap, allow_list: &[String]) -> FieldMap {
    let mut cleaned = raw.clone();
    cleaned.retain(|_, value| !value.is_empty());

    if allow_list.is_empty() {
        return cleaned;
    }

    let mut restricted = FieldMap::with_capacity(allow_list.len());
    for name in allow_list {
        if let Some(value) = cleaned.get(name) {
            restricted.insert(name.clone(), value);
        }
    }
    restricted
}
