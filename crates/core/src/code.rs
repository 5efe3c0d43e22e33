//! The human-readable product code (`P001`, `P002`, …).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// External product identifier, distinct from the internal row id.
///
/// Codes are assigned sequentially at registration time and are immutable
/// afterwards. Lookups normalize free-form input (trim + uppercase) the same
/// way registration does, so `" p001 "` finds `P001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    /// Format the code for the given sequence number (`1` → `P001`).
    ///
    /// Zero-pads to three digits; larger sequences simply grow wider.
    pub fn from_sequence(seq: i64) -> Self {
        Self(format!("P{seq:03}"))
    }

    /// Normalize and validate free-form user input.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::invalid_code("product code is required"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sequence_with_zero_padding() {
        assert_eq!(ProductCode::from_sequence(1).as_str(), "P001");
        assert_eq!(ProductCode::from_sequence(42).as_str(), "P042");
        assert_eq!(ProductCode::from_sequence(999).as_str(), "P999");
    }

    #[test]
    fn sequence_grows_past_three_digits() {
        assert_eq!(ProductCode::from_sequence(1000).as_str(), "P1000");
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = ProductCode::parse("  p001 ").unwrap();
        assert_eq!(code.as_str(), "P001");
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = ProductCode::parse("   ").unwrap_err();
        match err {
            DomainError::InvalidCode(_) => {}
            other => panic!("expected InvalidCode, got {other:?}"),
        }
    }

    #[test]
    fn parsed_and_generated_codes_compare_equal() {
        let generated = ProductCode::from_sequence(7);
        let parsed: ProductCode = "p007".parse().unwrap();
        assert_eq!(generated, parsed);
    }
}
