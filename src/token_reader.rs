//! Parsing of token-acquisition responses.
//!
//! The request-token and access-token endpoints answer with an
//! `application/x-www-form-urlencoded` body carrying `oauth_token` and
//! `oauth_token_secret`; everything else lands in `remain`.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;

use crate::error::{Result, TokenError, TokenResult};
use crate::{OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// A parsed token-acquisition response.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    /// Any additional fields, e.g. `oauth_callback_confirmed`.
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

/// Adds `parse_oauth_token` to `reqwest::Response`.
// this trait is sealed
#[async_trait(?Send)]
pub trait TokenReader: private::Sealed {
    async fn parse_oauth_token(self) -> Result<TokenResponse>;
}

#[async_trait(?Send)]
impl TokenReader for Response {
    async fn parse_oauth_token(self) -> Result<TokenResponse> {
        let text = self.text().await?;
        Ok(read_token(&text)?)
    }
}

fn read_token(text: &str) -> TokenResult<TokenResponse> {
    let mut fields = HashMap::new();
    for piece in text.split('&').filter(|piece| !piece.is_empty()) {
        let mut split = piece.splitn(2, '=');
        let key = split.next().unwrap_or_default();
        let value = split.next().unwrap_or_default();
        fields.insert(key.to_owned(), value.to_owned());
    }

    let oauth_token = fields
        .remove(OAUTH_TOKEN_KEY)
        .ok_or_else(|| TokenError::TokenKeyNotFound(OAUTH_TOKEN_KEY, text.to_owned()))?;
    let oauth_token_secret = fields
        .remove(OAUTH_TOKEN_SECRET_KEY)
        .ok_or_else(|| TokenError::TokenKeyNotFound(OAUTH_TOKEN_SECRET_KEY, text.to_owned()))?;

    Ok(TokenResponse {
        oauth_token,
        oauth_token_secret,
        remain: fields,
    })
}

mod private {
    use reqwest::Response;

    pub trait Sealed {}
    impl Sealed for Response {}
}
