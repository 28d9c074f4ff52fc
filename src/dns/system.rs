//! Production resolver backed by hickory-resolver

use super::DnsResolver;
use crate::error::{DomainProofError, Result};
use crate::types::{DnsAnswer, RecordType, ResolverConfig};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig as UpstreamConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::rdata::TXT;
use hickory_resolver::proto::rr::{RData, RecordType as WireRecordType};
use hickory_resolver::TokioAsyncResolver;

/// DNS resolver using the host configuration or a public upstream
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Create a resolver with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ResolverConfig::default())
    }

    /// Create a resolver with custom configuration
    pub fn with_config(config: &ResolverConfig) -> Result<Self> {
        let (upstream, mut opts) = if config.use_system_conf {
            hickory_resolver::system_conf::read_system_conf().map_err(|e| {
                DomainProofError::config(format!(
                    "Failed to read system resolver configuration: {}",
                    e
                ))
            })?
        } else {
            (UpstreamConfig::cloudflare(), ResolverOpts::default())
        };

        opts.timeout = config.timeout;
        opts.attempts = config.attempts;

        tracing::debug!(
            use_system_conf = config.use_system_conf,
            timeout_ms = %config.timeout.as_millis(),
            attempts = config.attempts,
            "DNS resolver configured"
        );

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(upstream, opts),
        })
    }
}

#[async_trait]
impl DnsResolver for SystemResolver {
    async fn resolve(&self, name: &str, record_type: RecordType) -> DnsAnswer {
        // Absolute name, so search domains are never appended
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        };

        let wire_type = match record_type {
            RecordType::Ns => WireRecordType::NS,
            RecordType::Txt => WireRecordType::TXT,
        };

        let lookup = match self.resolver.lookup(fqdn.as_str(), wire_type).await {
            Ok(lookup) => lookup,
            Err(err) => return classify_error(&err),
        };

        let records: Vec<String> = lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::NS(ns) => Some(ns.to_string()),
                RData::TXT(txt) => Some(txt_text(&fqdn, txt)),
                _ => None,
            })
            .collect();

        if records.is_empty() {
            DnsAnswer::NoAnswer
        } else {
            DnsAnswer::Found(records)
        }
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Concatenate the character-strings of a TXT record.
///
/// Invalid UTF-8 becomes U+FFFD, which can never equal an alphanumeric
/// challenge token.
fn txt_text(name: &str, txt: &TXT) -> String {
    let mut text = String::new();
    for piece in txt.txt_data().iter() {
        match std::str::from_utf8(piece) {
            Ok(segment) => text.push_str(segment),
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "TXT record is not valid UTF-8");
                text.push_str(&String::from_utf8_lossy(piece));
            }
        }
    }
    text
}

fn classify_error(err: &ResolveError) -> DnsAnswer {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NXDomain =>
        {
            DnsAnswer::NotFound
        }
        ResolveErrorKind::NoRecordsFound { .. } => DnsAnswer::NoAnswer,
        _ => DnsAnswer::TransportError(err.to_string()),
    }
}
