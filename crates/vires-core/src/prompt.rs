//! Interactive token entry

use url::Url;

use crate::error::{Error, Result};
use crate::token::SecretToken;

/// Source of a token when none was supplied
pub trait TokenPrompt: Send + Sync {
    /// Ask for the token to register for `endpoint`
    fn prompt(&self, endpoint: &str) -> Result<SecretToken>;
}

/// Reads the token from the controlling terminal without echo
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn prompt(&self, endpoint: &str) -> Result<SecretToken> {
        let token_page = token_page_url(endpoint)?;
        eprintln!("Setting access token for {endpoint}...");
        eprintln!("Generate a token at {token_page}");

        let token = rpassword::prompt_password("Enter token: ")
            .map_err(|e| Error::Prompt(e.to_string()))?;
        Ok(SecretToken::new(token.trim()))
    }
}

/// Page where users manage access tokens for a service endpoint
pub fn token_page_url(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint)
        .and_then(|url| url.join("/accounts/tokens/"))
        .map_err(|e| Error::InvalidEndpoint(format!("{endpoint}: {e}")))
}
