//! Token registration backed by the client configuration file

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::client_config::ClientConfig;
use crate::error::Result;
use crate::prompt::{TerminalPrompt, TokenPrompt};
use crate::registrar::TokenRegistrar;
use crate::token::SecretToken;

/// Writes tokens to the VirES client configuration file
pub struct ClientConfigRegistrar {
    /// Location of the configuration file
    config_path: PathBuf,
    /// Used when no usable token is passed in
    prompt: Arc<dyn TokenPrompt>,
}

impl ClientConfigRegistrar {
    /// Create a registrar for the config file in the user's home directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ClientConfig::default_path()?))
    }

    /// Create with a custom config path (for testing)
    pub fn with_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            prompt: Arc::new(TerminalPrompt),
        }
    }

    /// Replace the prompt used for missing tokens
    pub fn with_prompt(mut self, prompt: Arc<dyn TokenPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Get the config file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

#[async_trait]
impl TokenRegistrar for ClientConfigRegistrar {
    async fn register(
        &self,
        endpoint: &str,
        token: Option<&SecretToken>,
        set_default: bool,
    ) -> Result<()> {
        let prompted;
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => {
                debug!("No token supplied for {}, prompting", endpoint);
                prompted = self.prompt.prompt(endpoint)?;
                &prompted
            }
        };

        let mut config = ClientConfig::load(&self.config_path).await?;
        config.set_site_token(endpoint, token.expose());
        if set_default {
            config.set_default_url(endpoint);
        }
        config.save().await?;

        info!(
            "Token for {} saved to {:?}{}",
            endpoint,
            self.config_path,
            if set_default { " (default)" } else { "" }
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "VirES client config file"
    }
}
