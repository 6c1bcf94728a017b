//! Query-string and URL-encoded form decoding.
//!
//! Both `?a=1&b=2` query strings and `application/x-www-form-urlencoded`
//! bodies share one grammar, so [`parse`] handles both.

use formulator_core::FieldMap;

/// Parses a URL query string (e.g. `"key1=val1&key2=val2"`) into a [`FieldMap`].
///
/// Handles percent-encoding and `+` as space. A key without `=` maps to the
/// empty string. Repeated keys keep their first position and last value.
///
/// # Examples
///
/// ```
/// use formulator_http::querydict;
///
/// let fields = querydict::parse("name=Ada+Lovelace&email=ada%40example.com");
/// assert_eq!(fields.get("name"), Some("Ada Lovelace"));
/// assert_eq!(fields.get("email"), Some("ada@example.com"));
/// ```
pub fn parse(query_string: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    for pair in query_string.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair
            .find('=')
            .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));

        fields.insert(percent_decode(key), percent_decode(value));
    }

    fields
}

/// Decodes a percent-encoded string.
fn percent_decode(input: &str) -> String {
    // Replace + with space (form encoding), then decode percent sequences
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}
