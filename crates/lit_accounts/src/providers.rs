//! Collaborators the fund-account form reads from and delegates to.
//!
//! The surrounding application implements these over its node, account, and
//! pool connections; the form only sees the traits.

use std::fmt;

use async_trait::async_trait;
use lit_core::error_handler::LitError;
use serde::{Deserialize, Serialize};

/// Hex-encoded trader key identifying a pool account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fee estimate returned by the auctioneer for opening an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteAccountResponse {
    /// Sats per kilo-weight used for the estimate.
    pub miner_fee_rate_sat_per_kw: u64,
    pub miner_fee_total: u64,
}

pub trait WalletInfoProvider: Send + Sync {
    /// Confirmed on-chain balance available for funding, in sats.
    fn wallet_balance(&self) -> u64;
}

#[async_trait]
pub trait AccountInfoProvider: Send + Sync {
    fn has_active_account(&self) -> bool;

    /// Available balance of the active account. Only meaningful when
    /// [`has_active_account`](Self::has_active_account) is true.
    fn active_account_balance(&self) -> u64;

    /// Opens and funds a new account. Returns `None` on failure; the
    /// implementation is responsible for reporting that failure to the user.
    async fn create_account(
        &self,
        amount: u64,
        expire_blocks: u32,
        conf_target: u32,
    ) -> Option<AccountKey>;
}

#[async_trait]
pub trait FundingApi: Send + Sync {
    async fn quote_account(
        &self,
        amount: u64,
        conf_target: u32,
    ) -> Result<QuoteAccountResponse, LitError>;
}

/// Screen transitions within the account section. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn show_summary(&self);
    fn show_fund_new_confirm(&self);
}
