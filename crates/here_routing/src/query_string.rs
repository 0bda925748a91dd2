use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything but unreserved characters is escaped. Commas separate list
/// values such as `return=polyline,actions` and stay literal.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',');

/// Appends `key=value` to `query`, separated by `&` from what is already there.
///
/// With `encode` set the value is percent-encoded, otherwise it is written verbatim.
pub fn add_query_param(query: &mut String, key: &str, value: &str, encode: bool) {
    if !query.is_empty() {
        query.push('&');
    }

    query.push_str(key);
    query.push('=');

    if encode {
        query.extend(utf8_percent_encode(value, QUERY_VALUE));
    } else {
        query.push_str(value);
    }
}
