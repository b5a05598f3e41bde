//! Hand-off from the authorization engine to `reqwest`.
//!
//! The engine never performs I/O; this module only converts an assembled
//! [`SignedRequest`] into the transport's builder type.

use reqwest::Client;

use crate::request::SignedRequest;

impl SignedRequest {
    /// Converts the signed request into a `reqwest::RequestBuilder` on
    /// `client`. Sending, streaming, and transport errors are the caller's
    /// concern.
    pub fn into_reqwest(self, client: &Client) -> reqwest::RequestBuilder {
        let builder = client.request(self.method, self.url).headers(self.headers);
        match self.body {
            Some(body) => builder.body(body),
            None => builder,
        }
    }
}
