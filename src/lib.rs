//! Domain Proof - domain name validation and DNS ownership verification
//!
//! Checks that a string is a well-formed, resolvable domain name and that
//! the caller controls it, by publishing a random challenge in a TXT record.

pub mod dns;
pub mod domain;
pub mod error;
pub mod ownership;
pub mod types;

// Re-export commonly used types
pub use error::{DomainProofError, Result};
pub use types::{
    DnsAnswer, OwnershipResult, RecordType, ResolverConfig, Separator, TxtChallenge,
    ValidatorConfig,
};

// Re-export main functionality
pub use dns::{DnsResolver, MemoryResolver};
#[cfg(feature = "system-resolver")]
pub use dns::SystemResolver;
pub use domain::{FormatValidator, LabelCodec, PunycodeCodec};
pub use ownership::{OsTokenSource, OwnershipVerifier, TokenSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
