//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::error::{Result, SvarError};
use crate::secrets::{EnvSecretStore, SecretStore, OPENAI_API_KEY};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Resolving a transcript needs no credentials.
    Resolve,
    /// Asking questions requires the OpenAI API key.
    Ask,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Resolve => {
            // No external requirements for transcript resolution
        }
        Operation::Ask => {
            check_api_key()?;
        }
    }
    Ok(())
}

/// Check that the OpenAI API key secret is configured.
fn check_api_key() -> Result<()> {
    match EnvSecretStore.get(OPENAI_API_KEY) {
        Some(_) => Ok(()),
        None => Err(SvarError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            OPENAI_API_KEY, OPENAI_API_KEY
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_resolve_no_requirements() {
        // Resolve should always pass pre-flight (no external requirements)
        assert!(check(Operation::Resolve).is_ok());
    }
}
