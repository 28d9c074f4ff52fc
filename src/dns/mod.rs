//! DNS resolution capability
//!
//! The validator and verifier never talk to the network directly; they ask a
//! [`DnsResolver`] and branch on the tagged [`DnsAnswer`] it returns.

pub mod memory;
#[cfg(feature = "system-resolver")]
pub mod system;

// Re-export main functionality
pub use memory::MemoryResolver;
#[cfg(feature = "system-resolver")]
pub use system::SystemResolver;

use crate::types::{DnsAnswer, RecordType};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for DNS lookups used by validation and ownership checks
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `name` for `record_type`.
    ///
    /// Timeouts and retries belong to the implementation; dropping the
    /// returned future abandons the lookup.
    async fn resolve(&self, name: &str, record_type: RecordType) -> DnsAnswer;

    /// Get the resolver name
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<R: DnsResolver + ?Sized> DnsResolver for Arc<R> {
    async fn resolve(&self, name: &str, record_type: RecordType) -> DnsAnswer {
        (**self).resolve(name, record_type).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Strip surrounding double quotes from TXT record text
pub fn unquote_txt(record: &str) -> &str {
    record.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_txt() {
        assert_eq!(unquote_txt("\"84yfCdasrZejOPNeFuBpgGXcvy\""), "84yfCdasrZejOPNeFuBpgGXcvy");
        assert_eq!(unquote_txt("plain"), "plain");
        assert_eq!(unquote_txt("\"\""), "");
    }

    #[tokio::test]
    async fn test_arc_resolver_delegates() {
        let resolver = Arc::new(MemoryResolver::new().with_txt("example.com", &["abc"]));
        let answer = resolver.resolve("example.com", RecordType::Txt).await;
        assert_eq!(answer, DnsAnswer::Found(vec!["abc".to_string()]));
        assert_eq!(DnsResolver::name(&resolver), "memory");
    }
}
