//! Endpoint descriptors: per-endpoint metadata as data, not code.
//!
//! Each API resource is an immutable [`Endpoint`] record carrying its verb,
//! URL, and parameter schema. [`EndpointRequest`] is the per-request builder
//! backed by a shared [`ParameterBag`]; requirement checks run before any
//! signing work, so a rejected request consumes no nonce.

use http::Method;

use crate::credentials::Credentials;
use crate::error::{Error, ValidationError};
use crate::params::ParameterBag;
use crate::request::{Clock, NonceSource, RequestAssembler, SignedRequest};
use crate::OAUTH_KEY_PREFIX;

/// The HTTP verbs used by the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// One declared parameter of an endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str) -> Self {
        ParamSpec {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        ParamSpec {
            name,
            required: false,
        }
    }
}

/// The required-parameter predicate of an endpoint, beyond per-parameter
/// `required` flags.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    /// Only the `required` flags of the schema apply.
    Schema,
    /// At least one of the named parameters must be present.
    AnyOf(&'static [&'static str]),
}

/// An immutable endpoint descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub url: &'static str,
    pub schema: &'static [ParamSpec],
    pub requirement: Requirement,
}

impl Endpoint {
    /// Starts a request against this endpoint with an empty parameter bag.
    pub fn request(&self) -> EndpointRequest<'_> {
        EndpointRequest {
            endpoint: self,
            bag: ParameterBag::new(),
        }
    }

    fn declares(&self, name: &str) -> bool {
        self.schema.iter().any(|spec| spec.name == name)
    }

    fn validate(&self, bag: &ParameterBag) -> Result<(), ValidationError> {
        for spec in self.schema {
            if spec.required && !bag.contains(spec.name) {
                return Err(ValidationError::MissingParameter {
                    endpoint: self.name,
                    name: spec.name,
                });
            }
        }
        if let Requirement::AnyOf(names) = self.requirement {
            if !names.iter().any(|name| bag.contains(name)) {
                return Err(ValidationError::UnmetRequirement {
                    endpoint: self.name,
                    any_of: names,
                });
            }
        }
        Ok(())
    }
}

/// A request under construction against one [`Endpoint`].
#[derive(Debug, Clone)]
pub struct EndpointRequest<'e> {
    endpoint: &'e Endpoint,
    bag: ParameterBag,
}

impl<'e> EndpointRequest<'e> {
    /// Sets a declared parameter, overwriting any previous value.
    ///
    /// Undeclared and reserved (`oauth_*`) keys are rejected.
    pub fn param<V: Into<String>>(mut self, name: &str, value: V) -> Result<Self, Error> {
        if name.starts_with(OAUTH_KEY_PREFIX) {
            return Err(ValidationError::ReservedParameter(name.to_owned()).into());
        }
        if !self.endpoint.declares(name) {
            return Err(ValidationError::UnknownParameter {
                endpoint: self.endpoint.name,
                name: name.to_owned(),
            }
            .into());
        }
        self.bag.set(name, value);
        Ok(self)
    }

    /// The parameters collected so far.
    pub fn params(&self) -> &ParameterBag {
        &self.bag
    }

    /// Validates the endpoint's preconditions and builds the signed request
    /// with the default clock and nonce source.
    pub fn build(self, credentials: &Credentials<'_>) -> Result<SignedRequest, Error> {
        self.build_with(&RequestAssembler::new(), credentials)
    }

    /// As [`build`](EndpointRequest::build), with a caller-supplied
    /// assembler.
    pub fn build_with<C, N>(
        self,
        assembler: &RequestAssembler<C, N>,
        credentials: &Credentials<'_>,
    ) -> Result<SignedRequest, Error>
    where
        C: Clock,
        N: NonceSource,
    {
        self.endpoint.validate(&self.bag)?;
        assembler.build(
            self.endpoint.method.as_method(),
            self.endpoint.url,
            &self.bag,
            credentials,
        )
    }
}

/// The descriptor catalog for the API's resource table.
pub mod endpoints {
    use super::{Endpoint, HttpMethod, ParamSpec, Requirement};

    /// Post a status update.
    pub const STATUSES_UPDATE: Endpoint = Endpoint {
        name: "statuses/update",
        method: HttpMethod::Post,
        url: "https://api.twitter.com/1.1/statuses/update.json",
        schema: &[
            ParamSpec::required("status"),
            ParamSpec::optional("in_reply_to_status_id"),
            ParamSpec::optional("lat"),
            ParamSpec::optional("long"),
            ParamSpec::optional("place_id"),
            ParamSpec::optional("display_coordinates"),
            ParamSpec::optional("trim_user"),
            ParamSpec::optional("include_entities"),
        ],
        requirement: Requirement::Schema,
    };

    /// Search for tweets matching a query.
    pub const SEARCH_TWEETS: Endpoint = Endpoint {
        name: "search/tweets",
        method: HttpMethod::Get,
        url: "https://api.twitter.com/1.1/search/tweets.json",
        schema: &[
            ParamSpec::required("q"),
            ParamSpec::optional("geocode"),
            ParamSpec::optional("lang"),
            ParamSpec::optional("locale"),
            ParamSpec::optional("result_type"),
            ParamSpec::optional("count"),
            ParamSpec::optional("until"),
            ParamSpec::optional("since_id"),
            ParamSpec::optional("max_id"),
            ParamSpec::optional("include_entities"),
            ParamSpec::optional("callback"),
        ],
        requirement: Requirement::Schema,
    };

    /// Fetch a single status by its numeric id.
    pub const STATUSES_SHOW: Endpoint = Endpoint {
        name: "statuses/show",
        method: HttpMethod::Get,
        url: "https://api.twitter.com/1.1/statuses/show.json",
        schema: &[
            ParamSpec::required("id"),
            ParamSpec::optional("trim_user"),
            ParamSpec::optional("include_my_retweet"),
            ParamSpec::optional("include_entities"),
        ],
        requirement: Requirement::Schema,
    };

    /// Fetch the most recent statuses posted by one user.
    pub const STATUSES_USER_TIMELINE: Endpoint = Endpoint {
        name: "statuses/user_timeline",
        method: HttpMethod::Get,
        url: "https://api.twitter.com/1.1/statuses/user_timeline.json",
        schema: &[
            ParamSpec::optional("user_id"),
            ParamSpec::optional("screen_name"),
            ParamSpec::optional("since_id"),
            ParamSpec::optional("count"),
            ParamSpec::optional("max_id"),
            ParamSpec::optional("trim_user"),
            ParamSpec::optional("exclude_replies"),
            ParamSpec::optional("contributor_details"),
            ParamSpec::optional("include_rts"),
        ],
        requirement: Requirement::AnyOf(&["user_id", "screen_name"]),
    };

    /// Long-lived filtered status stream.
    pub const STATUSES_FILTER: Endpoint = Endpoint {
        name: "statuses/filter",
        method: HttpMethod::Post,
        url: "https://stream.twitter.com/1.1/statuses/filter.json",
        schema: &[
            ParamSpec::optional("follow"),
            ParamSpec::optional("track"),
            ParamSpec::optional("locations"),
            ParamSpec::optional("delimited"),
            ParamSpec::optional("stall_warnings"),
        ],
        requirement: Requirement::AnyOf(&["follow", "track", "locations"]),
    };
}
