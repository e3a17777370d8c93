//! Deposit name supplied with a VIP request.

use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_LEN: usize = 100;

/// Payer name an admin matches against incoming bank transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositName(String);

impl DepositName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("deposit_name"));
        }
        let len = trimmed.chars().count();
        if len > MAX_LEN {
            return Err(ValidationError::length_out_of_range(
                "deposit_name",
                1,
                MAX_LEN,
                len,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepositName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(DepositName::parse("  Kim Jisoo ").unwrap().as_str(), "Kim Jisoo");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            DepositName::parse(" \t "),
            Err(ValidationError::empty_field("deposit_name"))
        );
    }

    #[test]
    fn overlong_name_is_rejected() {
        assert!(DepositName::parse(&"n".repeat(101)).is_err());
        assert!(DepositName::parse(&"n".repeat(100)).is_ok());
    }
}
