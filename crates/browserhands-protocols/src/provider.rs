//! LLM provider selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The LLM providers a task may run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

/// Returned when a provider name is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported LLM provider: {0}")]
pub struct UnsupportedProvider(pub String);

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = UnsupportedProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnsupportedProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("google".parse::<Provider>().unwrap(), Provider::Google);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("OpenAI".parse::<Provider>().is_err());
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        assert_eq!(err, UnsupportedProvider("mistral".to_string()));
        assert!(err.to_string().contains("mistral"));
    }

    #[test]
    fn test_credential_vars() {
        assert_eq!(Provider::OpenAi.credential_var(), "OPENAI_API_KEY");
        assert_eq!(Provider::Anthropic.credential_var(), "ANTHROPIC_API_KEY");
        assert_eq!(Provider::Google.credential_var(), "GOOGLE_API_KEY");
    }

    #[test]
    fn test_serde_names_match_display() {
        for provider in Provider::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider));
        }
    }
}
