//! Configuration for the settlement engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, SplitError, constants};

/// What to do with an expense that references a member missing from the
/// supplied member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMemberPolicy {
    /// Fail the computation with [`SplitError::UnknownMember`].
    #[default]
    Reject,
    /// Skip the unattributable contribution and log a warning.
    Ignore,
}

/// Settlement engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Balances within this distance of zero count as settled.
    pub tolerance: Decimal,
    /// Decimal places used when presenting amounts.
    pub currency_scale: u32,
    /// Handling of expenses that reference unknown members.
    pub unknown_members: UnknownMemberPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: constants::DEFAULT_TOLERANCE,
            currency_scale: constants::CURRENCY_SCALE,
            unknown_members: UnknownMemberPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document and validate it. Missing fields take their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`SplitError::Configuration`] for a non-positive tolerance or
    /// a scale `rust_decimal` cannot represent.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance <= Decimal::ZERO {
            return Err(SplitError::Configuration(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.currency_scale > constants::MAX_DECIMAL_SCALE {
            return Err(SplitError::Configuration(format!(
                "currency_scale {} exceeds maximum {}",
                self.currency_scale,
                constants::MAX_DECIMAL_SCALE
            )));
        }
        Ok(())
    }
}
