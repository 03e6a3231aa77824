//! # vires-core
//!
//! Token bootstrap for VirES clients:
//! - Environment snapshot with non-overriding `.env` loading
//! - Pluggable token registration behind [`TokenRegistrar`]
//! - INI client configuration storage (`~/.viresclient.ini`)
//! - Zeroize-on-drop token handling

pub mod bootstrap;
pub mod client_config;
mod config_registrar;
pub mod env;
pub mod error;
pub mod prompt;
pub mod registrar;
mod token;

pub use bootstrap::{bootstrap, TOKEN_ENV_VAR, VIRES_ENDPOINT};
pub use client_config::ClientConfig;
pub use config_registrar::ClientConfigRegistrar;
pub use env::{find_dotenv, Environment};
pub use error::{Error, Result};
pub use prompt::{TerminalPrompt, TokenPrompt};
pub use registrar::TokenRegistrar;
pub use token::SecretToken;
