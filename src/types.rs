//! Core types and structures for domain-proof

use crate::error::{DomainProofError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for a domain name and for TXT record content
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// Upper bound for a single label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Default challenge token length
pub const DEFAULT_TOKEN_LENGTH: usize = 26;

/// Environment variable toggling ASCII-only validation
pub const ENV_ASCII_ONLY: &str = "DOMAIN_PROOF_ASCII_ONLY";

/// Environment variable overriding the maximum domain length
pub const ENV_MAX_LENGTH: &str = "DOMAIN_PROOF_MAX_LENGTH";

/// DNS record types the validator and verifier query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Ns,
    Txt,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::Ns => write!(f, "NS"),
            RecordType::Txt => write!(f, "TXT"),
        }
    }
}

/// Outcome of a single DNS lookup.
///
/// `NotFound` and `NoAnswer` are ordinary answers, not failures; only
/// `TransportError` means the question could not be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsAnswer {
    /// Record data, one string per record
    Found(Vec<String>),
    /// NXDOMAIN
    NotFound,
    /// The name exists but holds no records of the requested type
    NoAnswer,
    /// Network error, server failure, timeout
    TransportError(String),
}

impl DnsAnswer {
    /// Records carried by the answer, empty for every non-`Found` variant
    pub fn records(&self) -> &[String] {
        match self {
            DnsAnswer::Found(records) => records,
            _ => &[],
        }
    }
}

/// Validator configuration, immutable once built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValidatorConfig")]
pub struct ValidatorConfig {
    ascii_only: bool,
    max_length: usize,
}

#[derive(Deserialize)]
struct RawValidatorConfig {
    #[serde(default = "default_ascii_only")]
    ascii_only: bool,
    #[serde(default = "default_max_length")]
    max_length: usize,
}

fn default_ascii_only() -> bool {
    true
}

fn default_max_length() -> usize {
    MAX_DOMAIN_LENGTH
}

impl TryFrom<RawValidatorConfig> for ValidatorConfig {
    type Error = DomainProofError;

    fn try_from(raw: RawValidatorConfig) -> Result<Self> {
        Self::new(raw.ascii_only, raw.max_length)
    }
}

impl ValidatorConfig {
    /// Create a configuration, rejecting a `max_length` outside `1..=255`
    pub fn new(ascii_only: bool, max_length: usize) -> Result<Self> {
        if !(1..=MAX_DOMAIN_LENGTH).contains(&max_length) {
            return Err(DomainProofError::config(format!(
                "max_length must be between 1 and {}, got {}",
                MAX_DOMAIN_LENGTH, max_length
            )));
        }

        Ok(Self {
            ascii_only,
            max_length,
        })
    }

    /// ASCII-only configuration with a custom length ceiling
    pub fn ascii(max_length: usize) -> Result<Self> {
        Self::new(true, max_length)
    }

    /// Unicode-capable configuration with a custom length ceiling
    pub fn unicode(max_length: usize) -> Result<Self> {
        Self::new(false, max_length)
    }

    /// Build from `DOMAIN_PROOF_ASCII_ONLY` and `DOMAIN_PROOF_MAX_LENGTH`,
    /// falling back to defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let ascii_only = match std::env::var(ENV_ASCII_ONLY) {
            Ok(value) => parse_bool(ENV_ASCII_ONLY, &value)?,
            Err(_) => default_ascii_only(),
        };

        let max_length = match std::env::var(ENV_MAX_LENGTH) {
            Ok(value) => value.trim().parse::<usize>().map_err(|e| {
                DomainProofError::config(format!("{} must be an integer: {}", ENV_MAX_LENGTH, e))
            })?,
            Err(_) => default_max_length(),
        };

        Self::new(ascii_only, max_length)
    }

    pub fn ascii_only(&self) -> bool {
        self.ascii_only
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            ascii_only: default_ascii_only(),
            max_length: default_max_length(),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainProofError::config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

/// Character joining a challenge prefix to its token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Equals,
    Hyphen,
    Underscore,
    Pipe,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Equals => '=',
            Separator::Hyphen => '-',
            Separator::Underscore => '_',
            Separator::Pipe => '|',
        }
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Separator {
    type Error = DomainProofError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '=' => Ok(Separator::Equals),
            '-' => Ok(Separator::Hyphen),
            '_' => Ok(Separator::Underscore),
            '|' => Ok(Separator::Pipe),
            other => Err(DomainProofError::invalid_argument(format!(
                "Unsupported separator '{}', expected one of = - _ |",
                other
            ))),
        }
    }
}

impl FromStr for Separator {
    type Err = DomainProofError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Separator::try_from(c),
            _ => Err(DomainProofError::invalid_argument(format!(
                "Separator must be a single character, got '{}'",
                s
            ))),
        }
    }
}

/// A generated TXT challenge.
///
/// The verifier keeps no state; callers persist this until DNS propagation
/// completes and then hand it back to `verify_challenge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtChallenge {
    pub token: String,
    pub prefix: Option<String>,
    pub separator: Separator,
    pub issued_at: DateTime<Utc>,
}

impl TxtChallenge {
    /// The exact content to publish in the TXT record
    pub fn record_value(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}{}", prefix, self.separator, self.token),
            None => self.token.clone(),
        }
    }
}

impl std::fmt::Display for TxtChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.record_value())
    }
}

/// Domain ownership verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipResult {
    Confirmed,
    NotConfirmed,
    DomainInvalid,
    DnsLookupFailed,
}

impl OwnershipResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, OwnershipResult::Confirmed)
    }
}

impl std::fmt::Display for OwnershipResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnershipResult::Confirmed => write!(f, "confirmed"),
            OwnershipResult::NotConfirmed => write!(f, "not confirmed"),
            OwnershipResult::DomainInvalid => write!(f, "domain invalid"),
            OwnershipResult::DnsLookupFailed => write!(f, "dns lookup failed"),
        }
    }
}

/// Configuration for the system DNS resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Use the host's resolv.conf instead of a public upstream
    pub use_system_conf: bool,
    pub timeout: Duration,
    pub attempts: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            use_system_conf: true,
            timeout: Duration::from_secs(5),
            attempts: 2,
        }
    }
}
