//! Client credentials for the catalog API

use std::fmt;

use crate::config::{UserConfig, CLIENT_ID_VAR, CLIENT_SECRET_VAR};
use crate::errors::CatalogError;

/// Application id and secret for the client-credentials grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    #[cfg(test)]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Environment variables first, then the settings file
    pub fn resolve(config: &UserConfig) -> Result<Self, CatalogError> {
        Self::resolve_with(config, |key| std::env::var(key).ok())
    }

    fn resolve_with<F>(config: &UserConfig, lookup: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &'static str, fallback: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| Some(fallback.to_string()).filter(|v| !v.trim().is_empty()))
                .ok_or(CatalogError::MissingCredentials(var))
        };

        Ok(Self {
            client_id: pick(CLIENT_ID_VAR, &config.client_id)?,
            client_secret: pick(CLIENT_SECRET_VAR, &config.client_secret)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_config() {
        let mut config = UserConfig::default();
        config.client_id = "from-config".into();
        config.client_secret = "config-secret".into();
        let vars = env(&[(CLIENT_ID_VAR, "from-env")]);

        let creds = Credentials::resolve_with(&config, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds, Credentials::new("from-env", "config-secret"));
    }

    #[test]
    fn test_missing_secret() {
        let vars = env(&[(CLIENT_ID_VAR, "id"), (CLIENT_SECRET_VAR, "  ")]);
        let err = Credentials::resolve_with(&UserConfig::default(), |k| vars.get(k).cloned())
            .unwrap_err();
        assert_eq!(err, CatalogError::MissingCredentials(CLIENT_SECRET_VAR));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", Credentials::new("id", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
