//! Challenge token generation

use crate::error::{DomainProofError, Result};
use crate::types::{Separator, TxtChallenge, MAX_DOMAIN_LENGTH};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Source of random alphanumeric tokens.
///
/// Tokens prove control of a domain, so implementations must draw from a
/// cryptographically secure generator.
pub trait TokenSource: Send + Sync {
    /// Return exactly `length` characters from `[A-Za-z0-9]`
    fn random_alphanumeric(&self, length: usize) -> String;
}

/// Token source backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTokenSource;

impl TokenSource for OsTokenSource {
    fn random_alphanumeric(&self, length: usize) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

/// Check challenge size limits: TXT content is capped at 255 characters
pub(crate) fn check_challenge_args(length: usize, prefix: &str) -> Result<()> {
    if length == 0 || length > MAX_DOMAIN_LENGTH {
        return Err(DomainProofError::invalid_argument(format!(
            "Length must be a positive integer and at most {}, got {}",
            MAX_DOMAIN_LENGTH, length
        )));
    }

    if !prefix.is_empty() {
        // One character for the separator
        let total = length + prefix.chars().count() + 1;
        if total > MAX_DOMAIN_LENGTH {
            return Err(DomainProofError::invalid_argument(format!(
                "TXT record cannot exceed {} characters including prefix and separator, got {}",
                MAX_DOMAIN_LENGTH, total
            )));
        }
    }

    Ok(())
}

/// Build a challenge from a token source after checking the size limits
pub(crate) fn build_challenge(
    source: &dyn TokenSource,
    length: usize,
    prefix: &str,
    separator: Separator,
) -> Result<TxtChallenge> {
    check_challenge_args(length, prefix)?;

    let token = source.random_alphanumeric(length);
    if token.chars().count() != length || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainProofError::internal(
            "Token source returned a token of the wrong shape",
        ));
    }

    Ok(TxtChallenge {
        token,
        prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
        separator,
        issued_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(&'static str);

    impl TokenSource for FixedSource {
        fn random_alphanumeric(&self, length: usize) -> String {
            self.0.chars().take(length).collect()
        }
    }

    #[test]
    fn test_os_source_shape() {
        let token = OsTokenSource.random_alphanumeric(26);
        assert_eq!(token.len(), 26);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_os_source_is_not_seeded() {
        let first = OsTokenSource.random_alphanumeric(26);
        let second = OsTokenSource.random_alphanumeric(26);
        assert_ne!(first, second);
    }

    #[test]
    fn test_length_limits() {
        assert!(check_challenge_args(1, "").is_ok());
        assert!(check_challenge_args(255, "").is_ok());
        assert!(check_challenge_args(0, "").is_err());
        assert!(check_challenge_args(256, "").is_err());
    }

    #[test]
    fn test_prefix_counts_toward_limit() {
        // 250 + 11 + 1 = 262
        assert!(check_challenge_args(250, "test-domain").is_err());
        // 243 + 11 + 1 = 255
        assert!(check_challenge_args(243, "test-domain").is_ok());
        assert!(check_challenge_args(244, "test-domain").is_err());
    }

    #[test]
    fn test_build_challenge_with_fixed_source() {
        let source = FixedSource("84yfCdasrZejOPNeFuBpgGXcvy");
        let challenge = build_challenge(&source, 26, "site_verify", Separator::Equals).unwrap();

        assert_eq!(challenge.token, "84yfCdasrZejOPNeFuBpgGXcvy");
        assert_eq!(challenge.record_value(), "site_verify=84yfCdasrZejOPNeFuBpgGXcvy");
    }

    #[test]
    fn test_build_challenge_rejects_misbehaving_source() {
        let short = FixedSource("abc");
        assert!(build_challenge(&short, 26, "", Separator::Equals).is_err());

        let symbols = FixedSource("ab$d");
        assert!(build_challenge(&symbols, 4, "", Separator::Equals).is_err());
    }
}
