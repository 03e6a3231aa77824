//! Register the environment's VirES token as the default credential

use tracing::debug;

use crate::env::Environment;
use crate::error::Result;
use crate::registrar::TokenRegistrar;
use crate::token::SecretToken;

/// Environment variable holding the access token
pub const TOKEN_ENV_VAR: &str = "VIRES_TOKEN";

/// VirES OWS endpoint the token is registered for
pub const VIRES_ENDPOINT: &str = "https://vires.services/ows";

/// Read the token from `env` and register it as the default for
/// [`VIRES_ENDPOINT`].
///
/// An unset variable is passed on as `None` and an empty one as an empty
/// token. Whatever the registrar returns is returned unchanged.
pub async fn bootstrap(env: &Environment, registrar: &dyn TokenRegistrar) -> Result<()> {
    let token = env.get(TOKEN_ENV_VAR).map(SecretToken::new);

    debug!(
        "Registering {} token with {} ({})",
        if token.is_some() { "supplied" } else { "missing" },
        registrar.backend_name(),
        VIRES_ENDPOINT
    );

    registrar
        .register(VIRES_ENDPOINT, token.as_ref(), true)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DOTENV_FILENAME;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every call instead of persisting anything
    #[derive(Default)]
    struct RecordingRegistrar {
        calls: Mutex<Vec<(String, Option<String>, bool)>>,
    }

    impl RecordingRegistrar {
        fn calls(&self) -> Vec<(String, Option<String>, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenRegistrar for RecordingRegistrar {
        async fn register(
            &self,
            endpoint: &str,
            token: Option<&SecretToken>,
            set_default: bool,
        ) -> Result<()> {
            self.calls.lock().unwrap().push((
                endpoint.to_string(),
                token.map(|t| t.expose().to_string()),
                set_default,
            ));
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingRegistrar;

    #[async_trait]
    impl TokenRegistrar for FailingRegistrar {
        async fn register(
            &self,
            _endpoint: &str,
            _token: Option<&SecretToken>,
            _set_default: bool,
        ) -> Result<()> {
            Err(Error::Registration("marker".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    fn env_with_dotenv(process: &[(&str, &str)], dotenv: Option<&str>) -> Environment {
        let temp_dir = TempDir::new().unwrap();
        if let Some(contents) = dotenv {
            std::fs::write(temp_dir.path().join(DOTENV_FILENAME), contents).unwrap();
        }

        let mut env = Environment::from_pairs(process.iter().copied());
        env.merge_dotenv(&temp_dir.path().join(DOTENV_FILENAME))
            .unwrap();
        env
    }

    #[tokio::test]
    async fn test_registers_env_token_as_default() {
        let env = env_with_dotenv(&[("VIRES_TOKEN", "abc123")], None);
        let registrar = RecordingRegistrar::default();

        bootstrap(&env, &registrar).await.unwrap();

        assert_eq!(
            registrar.calls(),
            vec![(
                "https://vires.services/ows".to_string(),
                Some("abc123".to_string()),
                true
            )]
        );
    }

    #[tokio::test]
    async fn test_unset_token_still_registers() {
        let env = env_with_dotenv(&[], None);
        let registrar = RecordingRegistrar::default();

        bootstrap(&env, &registrar).await.unwrap();

        assert_eq!(
            registrar.calls(),
            vec![(VIRES_ENDPOINT.to_string(), None, true)]
        );
    }

    #[tokio::test]
    async fn test_empty_token_is_passed_through() {
        let env = env_with_dotenv(&[("VIRES_TOKEN", "")], None);
        let registrar = RecordingRegistrar::default();

        bootstrap(&env, &registrar).await.unwrap();

        assert_eq!(
            registrar.calls(),
            vec![(VIRES_ENDPOINT.to_string(), Some(String::new()), true)]
        );
    }

    #[tokio::test]
    async fn test_token_from_dotenv() {
        let env = env_with_dotenv(&[], Some("VIRES_TOKEN=fromfile\n"));
        let registrar = RecordingRegistrar::default();

        bootstrap(&env, &registrar).await.unwrap();

        assert_eq!(registrar.calls()[0].1.as_deref(), Some("fromfile"));
    }

    #[tokio::test]
    async fn test_process_env_beats_dotenv() {
        let env = env_with_dotenv(&[("VIRES_TOKEN", "direct")], Some("VIRES_TOKEN=fromfile\n"));
        let registrar = RecordingRegistrar::default();

        bootstrap(&env, &registrar).await.unwrap();

        assert_eq!(registrar.calls()[0].1.as_deref(), Some("direct"));
    }

    #[tokio::test]
    async fn test_registrar_error_surfaces_unchanged() {
        let env = env_with_dotenv(&[("VIRES_TOKEN", "abc123")], None);

        let err = bootstrap(&env, &FailingRegistrar).await.unwrap_err();

        assert!(matches!(err, Error::Registration(ref m) if m == "marker"));
    }

    #[tokio::test]
    async fn test_persists_default_credential() {
        use crate::client_config::{ClientConfig, CONFIG_FILENAME};
        use crate::config_registrar::ClientConfigRegistrar;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        let env = env_with_dotenv(&[("VIRES_TOKEN", "abc123")], None);

        bootstrap(&env, &ClientConfigRegistrar::with_path(path.clone()))
            .await
            .unwrap();

        let config = ClientConfig::load(&path).await.unwrap();
        assert_eq!(config.default_url(), Some(VIRES_ENDPOINT));
        assert_eq!(config.site_token(VIRES_ENDPOINT), Some("abc123"));
    }
}
