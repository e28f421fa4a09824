//! Field rules for the fund-account form.
//!
//! Every rule treats a zero value as "not entered yet" and reports nothing
//! for it, so a fresh form shows no errors until the user types.

use lit_core::config::FundingRules;
use lit_core::translate::{Localizer, prefixed};
use serde::Serialize;
use thiserror::Error;

/// Catalog prefix for all fund-account messages.
pub const MESSAGE_PREFIX: &str = "views.fundNewAccountView";

/// A failed field rule. The `Display` text is the English fallback; the UI
/// resolves [`FieldError::key`] through a [`Localizer`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("amount is below the account minimum of {account_minimum} sats")]
    AmountTooLow { account_minimum: u64 },

    #[error("amount exceeds the wallet balance")]
    AmountTooHigh,

    #[error("expiration must be at least {blocks} blocks")]
    LowExpireBlocks { blocks: u32 },

    #[error("expiration must be at most {blocks} blocks")]
    HighExpireBlocks { blocks: u32 },

    #[error("confirmation target must be greater than 1")]
    LowConfTarget,
}

impl FieldError {
    /// Message key relative to [`MESSAGE_PREFIX`].
    pub fn key(&self) -> &'static str {
        match self {
            Self::AmountTooLow { .. } => "amountTooLow",
            Self::AmountTooHigh => "amountTooHigh",
            Self::LowExpireBlocks { .. } => "lowExpireBlocks",
            Self::HighExpireBlocks { .. } => "highExpireBlocks",
            Self::LowConfTarget => "lowConfTarget",
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::AmountTooLow { account_minimum } => {
                vec![("accountMinimum", account_minimum.to_string())]
            }
            Self::LowExpireBlocks { blocks } | Self::HighExpireBlocks { blocks } => {
                vec![("blocks", blocks.to_string())]
            }
            Self::AmountTooHigh | Self::LowConfTarget => Vec::new(),
        }
    }

    pub fn localize(&self, localizer: &dyn Localizer) -> String {
        prefixed(localizer, MESSAGE_PREFIX).l(self.key(), &self.params())
    }
}

pub fn check_amount(amount: u64, wallet_balance: u64, rules: &FundingRules) -> Option<FieldError> {
    if amount == 0 {
        return None;
    }
    if amount < rules.account_minimum_sats {
        return Some(FieldError::AmountTooLow {
            account_minimum: rules.account_minimum_sats,
        });
    }
    if wallet_balance < amount {
        return Some(FieldError::AmountTooHigh);
    }
    None
}

pub fn check_expire_blocks(expire_blocks: u32, rules: &FundingRules) -> Option<FieldError> {
    if expire_blocks == 0 {
        return None;
    }
    if expire_blocks < rules.min_expire_blocks() {
        return Some(FieldError::LowExpireBlocks {
            blocks: rules.min_expire_blocks(),
        });
    }
    if expire_blocks > rules.max_expire_blocks() {
        return Some(FieldError::HighExpireBlocks {
            blocks: rules.max_expire_blocks(),
        });
    }
    None
}

/// A target of 1 block is rejected; 0 is "unset".
pub fn check_conf_target(conf_target: u32) -> Option<FieldError> {
    if conf_target == 0 {
        return None;
    }
    if conf_target <= 1 {
        return Some(FieldError::LowConfTarget);
    }
    None
}
