//! Domain ownership verification via DNS TXT challenges

pub mod challenge;
pub mod verifier;

// Re-export main functionality
pub use challenge::{OsTokenSource, TokenSource};
pub use verifier::OwnershipVerifier;
