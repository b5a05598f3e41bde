use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Every byte except the RFC 3986 unreserved characters
/// (`A-Z a-z 0-9 - . _ ~`) is escaped.
///
/// This is stricter than form encoding: `*` is escaped, space becomes `%20`
/// rather than `+`, and hex digits are uppercase. Anything looser produces
/// signatures the server rejects.
const RFC3986_STRICT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `input` for use in a signature base string or URL
/// component.
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, RFC3986_STRICT).into()
}
