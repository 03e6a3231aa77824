//! Credential token type

use zeroize::{Zeroize, ZeroizeOnDrop};

/// VirES access token - automatically zeroed when dropped
///
/// The value is opaque: nothing here checks its shape or length.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken {
    value: String,
}

impl SecretToken {
    /// Wrap a token value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Whether the token is the empty string
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Consume and return the inner value
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretToken")
            .field("value", &"[REDACTED]")
            .finish()
    }
}
