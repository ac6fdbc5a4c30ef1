//! Subscription plans and their pricing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Monthly,
    Yearly,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Monthly, Plan::Yearly];

    /// Price per period in cents. Money is never a float.
    pub fn price_cents(&self) -> i64 {
        match self {
            Plan::Free => 0,
            Plan::Monthly => 999,
            Plan::Yearly => 7999,
        }
    }

    /// Length of one billing period. `None` means the plan never lapses.
    pub fn duration_days(&self) -> Option<i64> {
        match self {
            Plan::Free => None,
            Plan::Monthly => Some(30),
            Plan::Yearly => Some(365),
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Monthly => "Monthly Premium",
            Plan::Yearly => "Yearly Premium",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Monthly => "monthly",
            Plan::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "monthly" => Ok(Plan::Monthly),
            "yearly" => Ok(Plan::Yearly),
            other => Err(format!("Invalid plan: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_never_lapses() {
        assert_eq!(Plan::Free.duration_days(), None);
        assert_eq!(Plan::Free.price_cents(), 0);
        assert!(!Plan::Free.is_paid());
    }

    #[test]
    fn yearly_is_cheaper_per_month() {
        let yearly_per_month = Plan::Yearly.price_cents() / 12;
        assert!(yearly_per_month < Plan::Monthly.price_cents());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Monthly".parse::<Plan>().unwrap(), Plan::Monthly);
        assert!("weekly".parse::<Plan>().is_err());
    }
}
