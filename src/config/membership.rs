//! Membership policy configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Ten years. Keeps every computed expiry well inside chrono's range.
pub const MAX_VIP_DURATION_DAYS: i64 = 3650;

/// VIP workflow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipConfig {
    /// Username that reviews VIP requests. Matched case-insensitively.
    #[serde(default = "default_super_admin_username")]
    pub super_admin_username: String,

    /// Days of VIP granted by an approval, 1 to 3650
    #[serde(default = "default_vip_duration_days")]
    pub vip_duration_days: i64,
}

impl MembershipConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.super_admin_username.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MEMBERSHIP__SUPER_ADMIN_USERNAME",
            ));
        }
        if !(1..=MAX_VIP_DURATION_DAYS).contains(&self.vip_duration_days) {
            return Err(ValidationError::InvalidVipDuration);
        }
        Ok(())
    }
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            super_admin_username: default_super_admin_username(),
            vip_duration_days: default_vip_duration_days(),
        }
    }
}

fn default_super_admin_username() -> String {
    "1111".to_string()
}

fn default_vip_duration_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_defaults() {
        let config = MembershipConfig::default();
        assert_eq!(config.super_admin_username, "1111");
        assert_eq!(config.vip_duration_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_duration() {
        let config = MembershipConfig {
            vip_duration_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidVipDuration));
    }

    #[test]
    fn test_validation_duration_upper_bound() {
        let at_limit = MembershipConfig {
            vip_duration_days: 3650,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        for days in [3651, i64::MAX / 86_400, i64::MAX] {
            let config = MembershipConfig {
                vip_duration_days: days,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidVipDuration));
        }
    }

    #[test]
    fn test_validation_blank_admin() {
        let config = MembershipConfig {
            super_admin_username: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
