//! Domain name validation module

pub mod codec;
pub mod validator;

// Re-export main functionality
pub use codec::PunycodeCodec;
pub use validator::{DomainValidationResult, FormatValidator};

use crate::error::Result;

/// ASCII-compatible encoding prefix of an IDNA label
pub const ACE_PREFIX: &str = "xn--";

/// Trait for converting single labels between Unicode and ASCII form
pub trait LabelCodec: Send + Sync {
    /// Encode one label to its ASCII-compatible form
    fn to_ascii(&self, label: &str) -> Result<String>;

    /// Decode one label back to Unicode
    fn to_unicode(&self, label: &str) -> Result<String>;
}

/// Whether a label carries the `xn--` prefix, ignoring case
pub fn is_ace_label(label: &str) -> bool {
    label
        .get(..ACE_PREFIX.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(ACE_PREFIX))
}
