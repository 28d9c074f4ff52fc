//! Domain ownership verifier

use super::challenge::{build_challenge, TokenSource};
use super::OsTokenSource;
use crate::dns::{unquote_txt, DnsResolver};
use crate::domain::FormatValidator;
use crate::error::{DomainProofError, Result};
use crate::types::{DnsAnswer, OwnershipResult, RecordType, Separator, TxtChallenge};
use std::sync::Arc;
use std::time::Instant;

/// Checks that a caller controls a domain by finding a challenge token in
/// its TXT records.
///
/// The domain always passes the full [`FormatValidator::is_valid`] check
/// before any TXT query is made. Lookup failures are never reported as
/// `NotConfirmed`.
#[derive(Clone)]
pub struct OwnershipVerifier {
    validator: FormatValidator,
    resolver: Arc<dyn DnsResolver>,
    tokens: Arc<dyn TokenSource>,
}

impl OwnershipVerifier {
    /// Create a verifier drawing tokens from the OS random source
    pub fn new(validator: FormatValidator, resolver: Arc<dyn DnsResolver>) -> Self {
        Self::with_token_source(validator, resolver, Arc::new(OsTokenSource))
    }

    /// Create a verifier with a custom token source
    pub fn with_token_source(
        validator: FormatValidator,
        resolver: Arc<dyn DnsResolver>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            validator,
            resolver,
            tokens,
        }
    }

    /// Get the wrapped validator
    pub fn validator(&self) -> &FormatValidator {
        &self.validator
    }

    /// Generate TXT record content: `prefix + separator + token`, or the
    /// bare token when `prefix` is empty.
    ///
    /// ```
    /// # use domain_proof::{FormatValidator, MemoryResolver, OwnershipVerifier};
    /// # use domain_proof::{Separator, ValidatorConfig};
    /// # use std::sync::Arc;
    /// let validator = FormatValidator::new(ValidatorConfig::default()).unwrap();
    /// let verifier = OwnershipVerifier::new(validator, Arc::new(MemoryResolver::new()));
    ///
    /// let code = verifier.generate_challenge(30, "site_verify", Separator::Equals).unwrap();
    /// assert!(code.starts_with("site_verify="));
    /// assert_eq!(code.len(), "site_verify=".len() + 30);
    /// ```
    pub fn generate_challenge(
        &self,
        length: usize,
        prefix: &str,
        separator: Separator,
    ) -> Result<String> {
        self.issue_challenge(length, prefix, separator)
            .map(|challenge| challenge.record_value())
    }

    /// Generate a bare 26-character token
    pub fn generate_default_challenge(&self) -> Result<String> {
        self.generate_challenge(crate::types::DEFAULT_TOKEN_LENGTH, "", Separator::default())
    }

    /// Generate a challenge the caller can persist until DNS propagates
    pub fn issue_challenge(
        &self,
        length: usize,
        prefix: &str,
        separator: Separator,
    ) -> Result<TxtChallenge> {
        let challenge = build_challenge(self.tokens.as_ref(), length, prefix, separator)?;
        tracing::debug!(
            length,
            prefixed = challenge.prefix.is_some(),
            separator = %separator,
            "Issued TXT challenge"
        );
        Ok(challenge)
    }

    /// Check whether `expected_token` is published in the TXT records of
    /// `domain`, or of `sub_host.domain` when `sub_host` is non-empty.
    pub async fn verify_ownership(
        &self,
        domain: &str,
        expected_token: &str,
        sub_host: &str,
    ) -> Result<OwnershipResult> {
        let start_time = Instant::now();

        if domain.is_empty() {
            return Err(crate::invalid_input!("Domain cannot be empty"));
        }

        if expected_token.is_empty() {
            return Err(DomainProofError::invalid_argument("Expected token cannot be empty"));
        }

        if !self.validator.is_valid(domain, self.resolver.as_ref()).await? {
            tracing::debug!(domain = %domain, "Ownership check rejected invalid domain");
            return Ok(OwnershipResult::DomainInvalid);
        }

        let query_name = self.query_name(domain, sub_host)?;

        let result = match self.resolver.resolve(&query_name, RecordType::Txt).await {
            DnsAnswer::Found(records) => {
                let matched = records
                    .iter()
                    .any(|record| unquote_txt(record) == expected_token);

                if matched {
                    OwnershipResult::Confirmed
                } else {
                    OwnershipResult::NotConfirmed
                }
            }
            DnsAnswer::NotFound | DnsAnswer::NoAnswer => OwnershipResult::DnsLookupFailed,
            DnsAnswer::TransportError(message) => {
                tracing::warn!(
                    domain = %domain,
                    query_name = %query_name,
                    resolver = self.resolver.name(),
                    error = %message,
                    "TXT lookup failed"
                );
                return Err(DomainProofError::dns_transport(
                    query_name,
                    RecordType::Txt,
                    message,
                ));
            }
        };

        tracing::debug!(
            domain = %domain,
            query_name = %query_name,
            result = %result,
            duration_ms = %start_time.elapsed().as_millis(),
            "Ownership check completed"
        );

        Ok(result)
    }

    /// Verify a previously issued challenge
    pub async fn verify_challenge(
        &self,
        domain: &str,
        challenge: &TxtChallenge,
        sub_host: &str,
    ) -> Result<OwnershipResult> {
        self.verify_ownership(domain, &challenge.record_value(), sub_host)
            .await
    }

    /// Name to query for TXT records, checked against the same grammar and
    /// length ceiling as the domain itself
    fn query_name(&self, domain: &str, sub_host: &str) -> Result<String> {
        if sub_host.is_empty() {
            return Ok(domain.to_string());
        }

        if !self.validator.validate_format(sub_host)? {
            return Err(DomainProofError::invalid_domain(
                sub_host,
                "sub-host does not match the domain grammar",
            ));
        }

        let name = format!("{}.{}", sub_host, domain);
        if !self.validator.validate_length(&name)? {
            return Err(DomainProofError::invalid_domain(
                name,
                format!("exceeds maximum length of {}", self.validator.config().max_length()),
            ));
        }

        Ok(name)
    }
}

impl std::fmt::Debug for OwnershipVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipVerifier")
            .field("validator", &self.validator)
            .field("resolver", &self.resolver.name())
            .finish()
    }
}
