use std::time::{SystemTime, UNIX_EPOCH};

use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method};
use rand::{distributions::Alphanumeric, Rng};
use url::Url;

use crate::credentials::Credentials;
use crate::error::{ConfigurationError, Error};
use crate::params::ParameterBag;
use crate::signer;
use crate::{
    OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
    OAUTH_VERSION_KEY, OAUTH_VERSION_VALUE, SIGNATURE_METHOD,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const NONCE_LEN: usize = 32;

/// Source of `oauth_timestamp` values. Injectable for deterministic tests.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn unix_timestamp(&self) -> u64;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Source of `oauth_nonce` values. Injectable for deterministic tests.
///
/// A nonce must be unique per request with overwhelming probability; a
/// colliding nonce lets the server treat the request as a replay.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> String;
}

/// 32 alphanumeric characters from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect()
    }
}

/// A fully signed, transmittable request.
///
/// This engine serializes parameters inline: for GET the whole parameter set
/// (caller + protocol, signature included) becomes the URL query string; for
/// POST it becomes an `application/x-www-form-urlencoded` body. The mode is
/// fixed across all endpoints.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Generates protocol parameters, signs, and emits [`SignedRequest`] values.
///
/// Purely functional per [`build`](RequestAssembler::build) call: the only
/// state is the injected clock and nonce source, so one assembler may be used
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct RequestAssembler<C = SystemClock, N = RandomNonce> {
    clock: C,
    nonces: N,
    callback: Option<String>,
    verifier: Option<String>,
}

impl RequestAssembler {
    pub fn new() -> Self {
        RequestAssembler::with_sources(SystemClock, RandomNonce)
    }
}

impl Default for RequestAssembler {
    fn default() -> Self {
        RequestAssembler::new()
    }
}

impl<C, N> RequestAssembler<C, N>
where
    C: Clock,
    N: NonceSource,
{
    pub fn with_sources(clock: C, nonces: N) -> Self {
        RequestAssembler {
            clock,
            nonces,
            callback: None,
            verifier: None,
        }
    }

    /// Sets `oauth_callback`, used during the token-acquisition handshake.
    pub fn callback<T: Into<String>>(self, callback: T) -> Self {
        RequestAssembler {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// Sets `oauth_verifier`, used when trading a request token for an
    /// access token.
    pub fn verifier<T: Into<String>>(self, verifier: T) -> Self {
        RequestAssembler {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// Builds a signed request for `method` against `base_url`.
    ///
    /// Caller parameters are consumed read-only from `bag`; protocol
    /// parameters are generated fresh for this call and discarded afterwards.
    pub fn build(
        &self,
        method: Method,
        base_url: &str,
        bag: &ParameterBag,
        credentials: &Credentials<'_>,
    ) -> Result<SignedRequest, Error> {
        credentials.validate()?;
        let url = parse_base_url(base_url)?;

        let mut protocol: Vec<(&str, String)> = vec![
            (OAUTH_CONSUMER_KEY, credentials.consumer_key().to_owned()),
            (OAUTH_NONCE_KEY, self.nonces.nonce()),
            (OAUTH_SIGNATURE_METHOD_KEY, SIGNATURE_METHOD.to_owned()),
            (OAUTH_TIMESTAMP_KEY, self.clock.unix_timestamp().to_string()),
            (OAUTH_TOKEN_KEY, credentials.access_token().to_owned()),
            (OAUTH_VERSION_KEY, OAUTH_VERSION_VALUE.to_owned()),
        ];
        if let Some(callback) = &self.callback {
            protocol.push((OAUTH_CALLBACK_KEY, callback.clone()));
        }
        if let Some(verifier) = &self.verifier {
            protocol.push((OAUTH_VERIFIER_KEY, verifier.clone()));
        }

        // protocol keys are reserved, so the union is disjoint by construction
        let base_string = signer::signature_base_string(
            &method,
            &url,
            bag.entries()
                .chain(protocol.iter().map(|(k, v)| (*k, v.as_str()))),
        );
        let signature = signer::sign(
            &base_string,
            credentials.consumer_secret(),
            credentials.token_secret(),
        );
        protocol.push((OAUTH_SIGNATURE_KEY, signature));

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.extend(bag.entries().map(|(k, v)| (k.to_owned(), v.to_owned())));
        pairs.extend(protocol.into_iter().map(|(k, v)| (k.to_owned(), v)));
        let serialized = signer::parameter_string(pairs);

        Ok(assemble(method, url, serialized))
    }
}

// Serialization of the final request, shared by GET and POST modes.
fn assemble(method: Method, mut url: Url, serialized: String) -> SignedRequest {
    let mut headers = HeaderMap::new();
    if method == Method::POST {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        url.set_query(None);
        SignedRequest {
            method,
            url,
            headers,
            body: Some(serialized.into_bytes()),
        }
    } else {
        let query = if serialized.is_empty() {
            None
        } else {
            Some(serialized.as_str())
        };
        url.set_query(query);
        SignedRequest {
            method,
            url,
            headers,
            body: None,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(raw).map_err(|e| ConfigurationError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigurationError::UnsupportedScheme(other.to_owned())),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FixedClock, FixedNonce};
    use super::*;
    use crate::error::ValidationError;

    fn twitter_example() -> (RequestAssembler<FixedClock, FixedNonce>, Credentials<'static>) {
        let assembler = RequestAssembler::with_sources(
            FixedClock(1_318_622_958),
            FixedNonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
        );
        let credentials = Credentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        (assembler, credentials)
    }

    #[test]
    fn post_body_matches_known_vector() {
        let (assembler, credentials) = twitter_example();
        let mut bag = ParameterBag::new();
        bag.set("status", "Hello Ladies + Gentlemen, a signed OAuth request!");
        bag.set("include_entities", "true");

        let request = assembler
            .build(
                Method::POST,
                "https://api.twitter.com/1/statuses/update.json",
                &bag,
                &credentials,
            )
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.query(), None);
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            FORM_CONTENT_TYPE
        );
        let body = String::from_utf8(request.body.unwrap()).unwrap();
        assert_eq!(
            body,
            "include_entities=true&oauth_consumer_key=xvz1evFS4wEEPTGEFPHBog&oa\
             uth_nonce=kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg&oauth_signatur\
             e=tnnArxj06cWHq44gCs1OSKk%2FjLY%3D&oauth_signature_method=HMAC-SHA1\
             &oauth_timestamp=1318622958&oauth_token=370773112-GmHxMAgYyLbNEtIKZ\
             eRNFsMKPR9EyMZeS9weJAEb&oauth_version=1.0&status=Hello%20Ladies%20%\
             2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
    }

    #[test]
    fn insertion_order_does_not_change_the_signature() {
        let (assembler, credentials) = twitter_example();
        let mut forward = ParameterBag::new();
        forward.set("status", "Hello Ladies + Gentlemen, a signed OAuth request!");
        forward.set("include_entities", "true");
        let mut reverse = ParameterBag::new();
        reverse.set("include_entities", "true");
        reverse.set("status", "Hello Ladies + Gentlemen, a signed OAuth request!");

        let url = "https://api.twitter.com/1/statuses/update.json";
        let a = assembler
            .build(Method::POST, url, &forward, &credentials)
            .unwrap();
        let b = assembler
            .build(Method::POST, url, &reverse, &credentials)
            .unwrap();
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn get_parameters_are_serialized_into_the_query() {
        let (assembler, credentials) = twitter_example();
        let mut bag = ParameterBag::new();
        bag.set("q", "@noradio");

        let request = assembler
            .build(
                Method::GET,
                "https://api.twitter.com/1.1/search/tweets.json",
                &bag,
                &credentials,
            )
            .unwrap();

        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
        let query = request.url.query().unwrap();
        assert!(query.starts_with("oauth_consumer_key=xvz1evFS4wEEPTGEFPHBog&"));
        assert!(query.contains("&oauth_signature="));
        assert!(query.ends_with("&q=%40noradio"));
    }

    #[test]
    fn handshake_request_signs_with_empty_token_secret() {
        let assembler = RequestAssembler::with_sources(
            FixedClock(137_131_200),
            FixedNonce("wIjqoS"),
        )
        .callback("http://printer.example.com/ready");
        let credentials = Credentials::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");

        let request = assembler
            .build(
                Method::POST,
                "https://photos.example.net/initiate",
                &ParameterBag::new(),
                &credentials,
            )
            .unwrap();

        let body = String::from_utf8(request.body.unwrap()).unwrap();
        assert!(body.contains("oauth_callback=http%3A%2F%2Fprinter.example.com%2Fready"));
        assert!(body.contains("oauth_signature=lnYh1zqTMdmkcEF0YzAnO1YSEDw%3D"));
        assert!(body.contains("oauth_token=&"));
    }

    #[test]
    fn relative_base_url_is_a_configuration_error() {
        let (assembler, credentials) = twitter_example();
        let err = assembler
            .build(
                Method::GET,
                "/1.1/search/tweets.json",
                &ParameterBag::new(),
                &credentials,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn unsupported_scheme_is_a_configuration_error() {
        let (assembler, credentials) = twitter_example();
        let err = assembler
            .build(
                Method::GET,
                "ftp://api.twitter.com/1.1/search/tweets.json",
                &ParameterBag::new(),
                &credentials,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn empty_consumer_secret_is_a_configuration_error() {
        let assembler = RequestAssembler::new();
        let credentials = Credentials::new("ck", "");
        let err = assembler
            .build(
                Method::GET,
                "https://api.twitter.com/1.1/search/tweets.json",
                &ParameterBag::new(),
                &credentials,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::MissingCredential("consumer_secret"))
        ));
    }

    #[test]
    fn random_nonces_differ_between_calls() {
        let source = RandomNonce;
        let a = source.nonce();
        let b = source.nonce();
        assert_eq!(a.len(), NONCE_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn validation_error_converts_into_build_error() {
        // the endpoint layer raises these before the assembler runs
        let err: Error = ValidationError::MissingParameter {
            endpoint: "search/tweets",
            name: "q",
        }
        .into();
        assert!(matches!(err, Error::Validation(_)));
    }
}
