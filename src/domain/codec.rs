//! Punycode label codec

use super::{is_ace_label, LabelCodec, ACE_PREFIX};
use crate::error::{DomainProofError, Result};

/// RFC 3492 codec applied label by label.
///
/// ASCII labels are passed through untouched in both directions and no
/// case mapping is applied, so decoding an encoded label gives back the
/// exact input. Decoding refuses raw Unicode labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunycodeCodec;

impl LabelCodec for PunycodeCodec {
    fn to_ascii(&self, label: &str) -> Result<String> {
        if label.is_ascii() {
            return Ok(label.to_string());
        }

        idna::punycode::encode_str(label)
            .map(|encoded| format!("{}{}", ACE_PREFIX, encoded))
            .ok_or_else(|| DomainProofError::encoding(label, "Punycode encoding overflowed"))
    }

    fn to_unicode(&self, label: &str) -> Result<String> {
        if !is_ace_label(label) {
            if !label.is_ascii() {
                return Err(DomainProofError::encoding(
                    label,
                    "non-ASCII label is not in ACE form",
                ));
            }
            return Ok(label.to_string());
        }

        let decoded = idna::punycode::decode_to_string(&label[ACE_PREFIX.len()..])
            .ok_or_else(|| DomainProofError::encoding(label, "malformed Punycode"))?;

        if decoded.is_empty() || decoded.is_ascii() {
            return Err(DomainProofError::encoding(
                label,
                "ACE label does not decode to Unicode text",
            ));
        }

        Ok(decoded)
    }
}
