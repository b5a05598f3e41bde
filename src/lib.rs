/*!
oauth1-sign: construct OAuth 1.0a signed HTTP requests.

# Overview

This library is the request authorization engine for a REST/streaming API
speaking OAuth 1.0a. Endpoints are immutable data records; a request is built
by filling a parameter bag through an endpoint descriptor, then handing it to
the assembler together with a set of credentials. The assembler generates the
protocol parameters (nonce, timestamp, ...), computes the HMAC-SHA1 signature
over the canonical base string, and emits a transmittable [`SignedRequest`].

Transport is out of scope: the output is handed to an HTTP client (a `reqwest`
adapter ships behind the default-on `transport` feature). Parameters are
serialized inline — query string for GET, form body for POST — rather than in
an `Authorization` header; the mode is fixed across all endpoints.

# Example

```no_run
use oauth1_sign::{endpoints, Credentials};

let credentials = Credentials::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let request = endpoints::STATUSES_UPDATE
    .request()
    .param("status", "Hello, a signed OAuth request!")?
    .build(&credentials)?;

// hand `request` to the HTTP client of your choice:
// request.into_reqwest(&client).send().await?
# Ok::<(), oauth1_sign::Error>(())
```

Acquiring a token pair works the same way; with no token attached the signing
key simply ends in a bare `&`:

```no_run
use oauth1_sign::{Credentials, ParameterBag, RequestAssembler};

let credentials = Credentials::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let request = RequestAssembler::new()
    .callback("oob")
    .build(
        http::Method::POST,
        "https://api.twitter.com/oauth/request_token",
        &ParameterBag::new(),
        &credentials,
    )?;
# Ok::<(), oauth1_sign::Error>(())
```
*/
mod credentials;
mod encode;
mod endpoint;
mod error;
mod params;
mod request;
mod signer;
#[cfg(feature = "transport")]
mod token_reader;
#[cfg(feature = "transport")]
mod transport;

pub use credentials::Credentials;
pub use encode::percent_encode;
pub use endpoint::{endpoints, Endpoint, EndpointRequest, HttpMethod, ParamSpec, Requirement};
pub use error::{ConfigurationError, EncodingError, Error, Result, ValidationError};
pub use params::ParameterBag;
pub use request::{
    Clock, NonceSource, RandomNonce, RequestAssembler, SignedRequest, SystemClock,
};
pub use signer::{parameter_string, sign, signature_base_string, signing_key};
#[cfg(feature = "transport")]
pub use error::{TokenError, TokenResult};
#[cfg(feature = "transport")]
pub use token_reader::{TokenReader, TokenResponse};

// exposed constant variables
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub(crate) const OAUTH_VERSION_VALUE: &str = "1.0";
