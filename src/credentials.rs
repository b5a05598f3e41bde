use std::borrow::Cow;

use crate::error::ConfigurationError;

/// The OAuth client and token credentials.
///
/// Immutable once constructed; a single value may be shared across any number
/// of concurrent builds. A value without a token pair is only useful for the
/// token-acquisition handshake, where the signing key ends in a bare `&`.
#[derive(Debug, Clone)]
pub struct Credentials<'a> {
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
    token: Option<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> Credentials<'a> {
    /// Creates credentials carrying only the consumer key pair.
    pub fn new<K, S>(consumer_key: K, consumer_secret: S) -> Self
    where
        K: Into<Cow<'a, str>>,
        S: Into<Cow<'a, str>>,
    {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    /// Attaches the access token pair.
    pub fn token<T, S>(self, token: T, token_secret: S) -> Self
    where
        T: Into<Cow<'a, str>>,
        S: Into<Cow<'a, str>>,
    {
        Credentials {
            token: Some((token.into(), token_secret.into())),
            ..self
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// The access token, or the empty string before authorization.
    pub fn access_token(&self) -> &str {
        self.token.as_ref().map(|(t, _)| t.as_ref()).unwrap_or("")
    }

    /// The token secret, or the empty string before authorization.
    pub fn token_secret(&self) -> &str {
        self.token.as_ref().map(|(_, s)| s.as_ref()).unwrap_or("")
    }

    /// The consumer key pair must be non-empty; the token pair is optional.
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if self.consumer_key.is_empty() {
            return Err(ConfigurationError::MissingCredential("consumer_key"));
        }
        if self.consumer_secret.is_empty() {
            return Err(ConfigurationError::MissingCredential("consumer_secret"));
        }
        Ok(())
    }
}
