//! Membership tier definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Membership tier an account currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    Regular,

    /// Granted by an approved VIP request until `vip_expiry`.
    Vip,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Regular => "regular",
            MembershipTier::Vip => "vip",
        }
    }

    pub fn is_vip(&self) -> bool {
        matches!(self, MembershipTier::Vip)
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(MembershipTier::Regular),
            "vip" => Ok(MembershipTier::Vip),
            other => Err(ValidationError::invalid_format(
                "membership_tier",
                format!("unknown tier '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!("vip".parse::<MembershipTier>(), Ok(MembershipTier::Vip));
        assert_eq!("regular".parse::<MembershipTier>(), Ok(MembershipTier::Regular));
        assert!("gold".parse::<MembershipTier>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MembershipTier::Vip).unwrap(), "\"vip\"");
    }
}
