//! Secret resolution for external service credentials.

/// Name of the secret holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Read-only store of named secrets.
pub trait SecretStore: Send + Sync {
    /// Look up a secret by name. Empty values count as absent.
    fn get(&self, name: &str) -> Option<String>;
}

/// Secret store backed by process environment variables.
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_missing_variable() {
        assert!(EnvSecretStore.get("SVAR_TEST_UNSET_SECRET").is_none());
    }

    #[test]
    fn test_env_store_empty_counts_as_absent() {
        std::env::set_var("SVAR_TEST_EMPTY_SECRET", "");
        assert!(EnvSecretStore.get("SVAR_TEST_EMPTY_SECRET").is_none());
    }

    #[test]
    fn test_env_store_present_variable() {
        std::env::set_var("SVAR_TEST_SET_SECRET", "value");
        assert_eq!(
            EnvSecretStore.get("SVAR_TEST_SET_SECRET"),
            Some("value".to_string())
        );
    }
}
