//! Credentials consumed by the collection API.

use crate::config::AccountConfig;
use crate::error::{Error, Result};

/// Access token pair, obtained once at startup and shared read-only by every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub token_secret: String,
}

impl Credential {
    pub fn new(token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Source of the credential used for the whole run.
pub trait CredentialProvider {
    fn current_credential(&self) -> Result<Credential>;
}

/// Reads the credential from the `[account]` configuration section.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    account: AccountConfig,
}

impl ConfigCredentialProvider {
    pub fn new(account: AccountConfig) -> Self {
        Self { account }
    }
}

impl CredentialProvider for ConfigCredentialProvider {
    fn current_credential(&self) -> Result<Credential> {
        if self.account.token.trim().is_empty() || self.account.token_secret.trim().is_empty() {
            return Err(Error::Authentication(
                "no access token configured; authorize the application first".to_string(),
            ));
        }

        Ok(Credential::new(
            self.account.token.clone(),
            self.account.token_secret.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_provider_returns_credential() {
        let provider = ConfigCredentialProvider::new(AccountConfig {
            token: "tok".into(),
            token_secret: "sec".into(),
            ..Default::default()
        });
        let credential = provider.current_credential().unwrap();
        assert_eq!(credential, Credential::new("tok", "sec"));
    }

    #[test]
    fn test_missing_token_is_auth_error() {
        let provider = ConfigCredentialProvider::new(AccountConfig::default());
        assert!(matches!(
            provider.current_credential(),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credential = Credential::new("tok", "sec");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("tok\""));
        assert!(!debug.contains("sec\""));
    }
}
