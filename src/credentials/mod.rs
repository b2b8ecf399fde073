use thiserror::Error;

/// Environment variable the GitHub personal access token is read from
pub const ENV_TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "GITHUB_TOKEN environment variable is not set. \
         Please set it with your GitHub personal access token."
    )]
    TokenNotFound,
}

/// Read the GitHub token from the GITHUB_TOKEN environment variable.
///
/// The token is returned to the caller and passed explicitly to
/// [`crate::github::create_client`]; nothing else reads the environment.
pub fn get_token() -> Result<String, CredentialError> {
    normalize_token(std::env::var(ENV_TOKEN_VAR).ok()).ok_or(CredentialError::TokenNotFound)
}

/// Trim a raw token value. Unset and blank values are treated the same.
fn normalize_token(raw: Option<String>) -> Option<String> {
    let trimmed = raw?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token_trims() {
        assert_eq!(
            normalize_token(Some("  ghp_abc123\n".to_string())),
            Some("ghp_abc123".to_string())
        );
    }

    #[test]
    fn test_normalize_token_blank_is_missing() {
        assert_eq!(normalize_token(Some("   ".to_string())), None);
        assert_eq!(normalize_token(None), None);
    }

    #[test]
    fn test_missing_token_message_names_variable() {
        let msg = CredentialError::TokenNotFound.to_string();
        assert!(msg.contains("GITHUB_TOKEN"));
    }
}
