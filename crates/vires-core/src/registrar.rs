//! Token registration trait definitions

use async_trait::async_trait;

use crate::error::Result;
use crate::token::SecretToken;

/// Trait for backends that remember a token for later client calls
#[async_trait]
pub trait TokenRegistrar: Send + Sync {
    /// Register `token` for `endpoint`, optionally marking `endpoint` as the
    /// default service for future calls.
    ///
    /// `token` is `None` when the caller had nothing to pass.
    async fn register(
        &self,
        endpoint: &str,
        token: Option<&SecretToken>,
        set_default: bool,
    ) -> Result<()>;

    /// Get a human-readable name for this backend
    fn backend_name(&self) -> &'static str;
}
