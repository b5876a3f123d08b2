//! Provider credential lookup.

use std::collections::HashMap;
use std::fmt;

use crate::provider::Provider;

/// An opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Source of provider credentials.
pub trait CredentialSource: Send + Sync {
    /// Look up the credential for a provider. Empty values count as absent.
    fn credential(&self, provider: Provider) -> Option<Credential>;
}

/// Reads credentials from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credential(&self, provider: Provider) -> Option<Credential> {
        std::env::var(provider.credential_var())
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Credential)
    }
}

/// Fixed in-memory credentials.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    keys: HashMap<Provider, Credential>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Provider, value: impl Into<String>) -> Self {
        self.keys.insert(provider, Credential::new(value));
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, provider: Provider) -> Option<Credential> {
        self.keys
            .get(&provider)
            .filter(|c| !c.0.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let cred = Credential::new("sk-secret");
        assert!(!format!("{:?}", cred).contains("sk-secret"));
        assert_eq!(cred.expose(), "sk-secret");
    }

    #[test]
    fn test_static_credentials() {
        let source = StaticCredentials::new().with(Provider::OpenAi, "sk-test");
        assert!(source.credential(Provider::OpenAi).is_some());
        assert!(source.credential(Provider::Google).is_none());
    }

    #[test]
    fn test_static_empty_is_absent() {
        let source = StaticCredentials::new().with(Provider::Anthropic, "  ");
        assert!(source.credential(Provider::Anthropic).is_none());
    }

    #[test]
    fn test_env_credentials() {
        // SAFETY: This test is the only one touching GOOGLE_API_KEY
        unsafe {
            std::env::set_var("GOOGLE_API_KEY", "g-test");
        }
        assert_eq!(
            EnvCredentials.credential(Provider::Google).unwrap().expose(),
            "g-test"
        );
        unsafe {
            std::env::set_var("GOOGLE_API_KEY", "");
        }
        assert!(EnvCredentials.credential(Provider::Google).is_none());
        unsafe {
            std::env::remove_var("GOOGLE_API_KEY");
        }
    }
}
