use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
#[cfg(feature = "transport")]
pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Top-level error for request construction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration : {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("request validation failed : {0}")]
    Validation(#[from] ValidationError),
    #[error("encoding failed : {0}")]
    Encoding(#[from] EncodingError),
    #[cfg(feature = "transport")]
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenError),
    #[cfg(feature = "transport")]
    #[error("request failed : {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// The build call was set up with unusable inputs: a malformed base URL or
/// incomplete credentials.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("base URL {url:?} is not usable : {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("credential field {0} must not be empty")]
    MissingCredential(&'static str),
}

/// An endpoint precondition failed before any signing work was done.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("parameter {name:?} is not declared by endpoint {endpoint}")]
    UnknownParameter { endpoint: &'static str, name: String },
    #[error("parameter {0:?} is reserved for the oauth protocol")]
    ReservedParameter(String),
    #[error("endpoint {endpoint} requires parameter {name:?}")]
    MissingParameter {
        endpoint: &'static str,
        name: &'static str,
    },
    #[error("endpoint {endpoint} requires at least one of {any_of:?}")]
    UnmetRequirement {
        endpoint: &'static str,
        any_of: &'static [&'static str],
    },
}

/// A value could not be represented in the final request. Practically
/// unreachable for well-formed UTF-8 input.
#[derive(Error, Debug, Clone)]
pub enum EncodingError {
    #[error("value for {0} cannot be represented in a request")]
    Unrepresentable(&'static str),
}

#[cfg(feature = "transport")]
#[derive(Error, Debug, Clone)]
pub enum TokenError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
}
