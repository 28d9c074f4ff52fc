//! Domain name validation utilities

use super::{is_ace_label, LabelCodec, PunycodeCodec};
use crate::dns::DnsResolver;
use crate::error::{DomainProofError, Result};
use crate::types::{DnsAnswer, RecordType, ValidatorConfig, MAX_LABEL_LENGTH};
use futures::future::join_all;
use regex::Regex;
use std::sync::Arc;

/// Label pattern for ASCII-only mode
const ASCII_LABEL_PATTERN: &str = r"^[A-Za-z0-9_-]{1,63}$";

/// Label pattern for Unicode mode: word characters plus the Devanagari block
const UNICODE_LABEL_PATTERN: &str = r"^[\w\x{0900}-\x{097F}-]{1,63}$";

/// Domain name validator
///
/// Holds one compiled label pattern chosen by the configuration. Hyphen
/// placement is checked by scanning each label rather than in the pattern.
#[derive(Clone)]
pub struct FormatValidator {
    config: ValidatorConfig,
    label_pattern: Regex,
    codec: Arc<dyn LabelCodec>,
}

impl FormatValidator {
    /// Create a new validator with the built-in Punycode codec
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        Self::with_codec(config, Arc::new(PunycodeCodec))
    }

    /// Create a validator with a custom label codec
    pub fn with_codec(config: ValidatorConfig, codec: Arc<dyn LabelCodec>) -> Result<Self> {
        let pattern = if config.ascii_only() {
            ASCII_LABEL_PATTERN
        } else {
            UNICODE_LABEL_PATTERN
        };

        Ok(Self {
            config,
            label_pattern: Regex::new(pattern)?,
            codec,
        })
    }

    /// Get validator configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check the domain against the label grammar
    pub fn validate_format(&self, domain: &str) -> Result<bool> {
        require_non_empty(domain)?;

        match self.grammar_violation(domain) {
            Some(reason) => {
                tracing::debug!(domain = %domain, reason, "Domain failed format check");
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Check the domain length in characters against `max_length` (inclusive)
    pub fn validate_length(&self, domain: &str) -> Result<bool> {
        require_non_empty(domain)?;

        let length = domain.chars().count();
        if length > self.config.max_length() {
            tracing::debug!(
                domain = %domain,
                length,
                max_length = self.config.max_length(),
                "Domain failed length check"
            );
            return Ok(false);
        }

        Ok(true)
    }

    /// Check that the domain has at least one NS record
    pub async fn validate_dns_resolvable(
        &self,
        domain: &str,
        resolver: &dyn DnsResolver,
    ) -> Result<bool> {
        require_non_empty(domain)?;

        match resolver.resolve(domain, RecordType::Ns).await {
            DnsAnswer::Found(records) => {
                tracing::debug!(
                    domain = %domain,
                    resolver = resolver.name(),
                    records = records.len(),
                    "NS lookup succeeded"
                );
                Ok(!records.is_empty())
            }
            DnsAnswer::NotFound | DnsAnswer::NoAnswer => {
                tracing::debug!(
                    domain = %domain,
                    resolver = resolver.name(),
                    "Domain has no NS records"
                );
                Ok(false)
            }
            DnsAnswer::TransportError(message) => {
                tracing::warn!(
                    domain = %domain,
                    resolver = resolver.name(),
                    error = %message,
                    "NS lookup failed"
                );
                Err(DomainProofError::dns_transport(domain, RecordType::Ns, message))
            }
        }
    }

    /// Run format, length and DNS checks in order, stopping at the first
    /// failure. Empty input and resolver failures are errors, not `false`.
    pub async fn is_valid(&self, domain: &str, resolver: &dyn DnsResolver) -> Result<bool> {
        if !self.validate_format(domain)? {
            return Ok(false);
        }

        if !self.validate_length(domain)? {
            return Ok(false);
        }

        self.validate_dns_resolvable(domain, resolver).await
    }

    /// Validate multiple domains concurrently
    pub async fn validate_batch(
        &self,
        domains: &[String],
        resolver: &dyn DnsResolver,
    ) -> Vec<DomainValidationResult> {
        let futures = domains.iter().map(|domain| self.is_valid(domain, resolver));
        let results = join_all(futures).await;

        let valid = results.iter().filter(|r| matches!(r, Ok(true))).count();
        let errors = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            domains_requested = domains.len(),
            valid,
            errors,
            "Batch domain validation completed"
        );

        domains
            .iter()
            .cloned()
            .zip(results)
            .map(|(domain, result)| DomainValidationResult { domain, result })
            .collect()
    }

    /// Convert a Unicode domain to its ASCII-compatible form
    pub fn to_punycode(&self, domain: &str) -> Result<String> {
        self.require_unicode_mode("Punycode conversion")?;
        self.require_valid_format(domain)?;

        let labels = domain
            .split('.')
            .map(|label| {
                let encoded = self.codec.to_ascii(label)?;
                if encoded.chars().count() > MAX_LABEL_LENGTH {
                    return Err(DomainProofError::encoding(
                        label,
                        format!("encoded label exceeds {} characters", MAX_LABEL_LENGTH),
                    ));
                }
                Ok(encoded)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(labels.join("."))
    }

    /// Convert an ASCII-compatible domain back to Unicode
    pub fn to_unicode(&self, domain: &str) -> Result<String> {
        self.require_unicode_mode("Punycode to Unicode conversion")?;
        self.require_valid_format(domain)?;

        let labels = domain
            .split('.')
            .map(|label| self.codec.to_unicode(label))
            .collect::<Result<Vec<_>>>()?;

        Ok(labels.join("."))
    }

    fn require_unicode_mode(&self, operation: &str) -> Result<()> {
        if self.config.ascii_only() {
            return Err(DomainProofError::unsupported_mode(format!(
                "{} is not supported in ASCII-only mode",
                operation
            )));
        }
        Ok(())
    }

    fn require_valid_format(&self, domain: &str) -> Result<()> {
        if !self.validate_format(domain)? {
            return Err(DomainProofError::invalid_domain(
                domain,
                "does not match the domain grammar",
            ));
        }
        Ok(())
    }

    /// First grammar rule the domain breaks, if any
    fn grammar_violation(&self, domain: &str) -> Option<&'static str> {
        let mut last_label = "";

        for label in domain.split('.') {
            if label.is_empty() {
                return Some("empty label");
            }

            if !self.label_pattern.is_match(label) {
                return Some("label has invalid characters or is longer than 63 characters");
            }

            if label.starts_with('-') || label.ends_with('-') {
                return Some("label starts or ends with a hyphen");
            }

            if has_tagged_hyphens(label) && !is_ace_label(label) {
                return Some("label has hyphens in third and fourth position");
            }

            last_label = label;
        }

        // Rules out dotted-quad IP literals
        if last_label.chars().all(|c| c.is_ascii_digit()) {
            return Some("top-level label is numeric");
        }

        None
    }
}

impl std::fmt::Debug for FormatValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatValidator")
            .field("config", &self.config)
            .field("label_pattern", &self.label_pattern.as_str())
            .finish()
    }
}

/// Domain validation result from a batch run
#[derive(Debug, Clone)]
pub struct DomainValidationResult {
    pub domain: String,
    pub result: Result<bool>,
}

fn require_non_empty(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(DomainProofError::invalid_input("Domain cannot be empty"));
    }
    Ok(())
}

/// `ab--` style labels, reserved for tagged encodings
fn has_tagged_hyphens(label: &str) -> bool {
    let mut rest = label.chars().skip(2);
    rest.next() == Some('-') && rest.next() == Some('-')
}
