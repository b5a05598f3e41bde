//! Signature base string construction and HMAC-SHA1 signing
//! (RFC 5849 sections 3.4.1 and 3.4.2).

use hmac::{Hmac, Mac};
use http::Method;
use sha1::Sha1;
use url::Url;

use crate::encode::percent_encode;

type HmacSha1 = Hmac<Sha1>;

/// Serializes parameters into the canonical parameter string.
///
/// Every key and value is percent-encoded independently, the pairs are sorted
/// by encoded key with ties broken by encoded value, and the result is joined
/// as `k=v&k=v`. The same serialization is used verbatim for the final query
/// string or form body, so a signed request always matches its own signature.
pub fn parameter_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| {
            (
                percent_encode(k.as_ref()).into_owned(),
                percent_encode(v.as_ref()).into_owned(),
            )
        })
        .collect();
    // byte-wise on the encoded pair, so duplicate keys sort deterministically
    pairs.sort();

    let mut out = String::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Builds the canonical signature base string from the HTTP method, the base
/// URL, and the union of caller and protocol parameters.
///
/// A query string present on `base_url` is merged into the parameter set
/// before the URL is stripped to scheme+host+path. The parameter string is
/// re-encoded wholesale as the third segment.
pub fn signature_base_string<I, K, V>(method: &Method, base_url: &Url, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let merged: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
        .chain(
            base_url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
        .collect();
    let parameter_string = parameter_string(merged);

    let mut stripped = base_url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);

    format!(
        "{}&{}&{}",
        percent_encode(&method.as_str().to_ascii_uppercase()),
        percent_encode(stripped.as_str()),
        percent_encode(&parameter_string)
    )
}

/// Derives the HMAC key: `encode(consumer_secret) & encode(token_secret)`.
///
/// With no token secret the key still ends in the trailing `&`, as required
/// for the token-acquisition handshake.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Computes `oauth_signature`: base64 of the HMAC-SHA1 digest of the base
/// string under the derived key.
///
/// The result is not URL-encoded here; that happens wherever the signature is
/// placed into a parameter set, with the same encoder as everything else.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = signing_key(consumer_secret, token_secret);
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());
    base64::encode(mac.finalize().into_bytes())
}
