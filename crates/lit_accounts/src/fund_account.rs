use std::sync::Arc;

use lit_core::config::FundingRules;
use lit_core::error_handler::ErrorReporter;
use lit_core::translate::Localizer;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::format::format_sats;
use crate::providers::{AccountInfoProvider, FundingApi, Navigator, WalletInfoProvider};
use crate::validation::{FieldError, check_amount, check_conf_target, check_expire_blocks};

/// Context label attached to quote failures sent to the error reporter.
pub const QUOTE_ERROR_CONTEXT: &str = "Unable to estimate miner fee";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Where the form is in the quote/submit workflow. Observational only: no
/// action is refused because of the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingPhase {
    Editing,
    QuoteRequested,
    Confirming,
    Submitting,
}

/// Raw editable values. Zero means the field has not been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
    pub amount: u64,
    pub conf_target: u32,
    pub expire_blocks: u32,
    /// Last quoted fee. Not cleared by resets.
    pub miner_fee: u64,
}

#[derive(Debug)]
struct Inner {
    fields: FormState,
    phase: FundingPhase,
    /// `(amount, conf_target)` the current `miner_fee` was quoted for.
    quoted_for: Option<(u64, u32)>,
}

impl Inner {
    fn quote_is_stale(&self) -> bool {
        self.quoted_for != Some((self.fields.amount, self.fields.conf_target))
    }
}

/// Everything the form needs from the rest of the app.
#[derive(Clone)]
pub struct FundingContext {
    pub wallet: Arc<dyn WalletInfoProvider>,
    pub accounts: Arc<dyn AccountInfoProvider>,
    pub api: Arc<dyn FundingApi>,
    pub errors: Arc<dyn ErrorReporter>,
    pub navigator: Arc<dyn Navigator>,
    pub localizer: Arc<dyn Localizer>,
}

/// One consistent read of every derived value, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundingSummary {
    pub phase: FundingPhase,
    pub fields: FormState,
    pub has_active_account: bool,
    pub wallet_balance: u64,
    pub account_balance: u64,
    pub new_balance: u64,
    pub amount_error: String,
    pub conf_target_error: String,
    pub expire_blocks_error: String,
    pub is_valid: bool,
    pub quote_is_stale: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives the "fund a new account" form: holds the raw inputs, derives
/// balances and errors on every read, and runs the quote -> confirm -> submit
/// workflow against the injected collaborators.
///
/// All methods take `&self` so field edits can interleave with a pending
/// [`confirm`](Self::confirm) or [`fund_account`](Self::fund_account). The
/// state lock is never held across an await point.
pub struct FundAccountForm {
    ctx: FundingContext,
    rules: FundingRules,
    inner: RwLock<Inner>,
}

impl FundAccountForm {
    pub fn new(ctx: FundingContext, rules: FundingRules) -> Self {
        Self {
            ctx,
            rules,
            inner: RwLock::new(Inner {
                fields: FormState::default(),
                phase: FundingPhase::Editing,
                quoted_for: None,
            }),
        }
    }

    pub fn rules(&self) -> &FundingRules {
        &self.rules
    }

    // -- raw fields --------------------------------------------------------

    pub fn state(&self) -> FormState {
        self.inner.read().fields
    }

    pub fn amount(&self) -> u64 {
        self.inner.read().fields.amount
    }

    pub fn conf_target(&self) -> u32 {
        self.inner.read().fields.conf_target
    }

    pub fn expire_blocks(&self) -> u32 {
        self.inner.read().fields.expire_blocks
    }

    pub fn miner_fee(&self) -> u64 {
        self.inner.read().fields.miner_fee
    }

    pub fn phase(&self) -> FundingPhase {
        self.inner.read().phase
    }

    pub fn quoted_for(&self) -> Option<(u64, u32)> {
        self.inner.read().quoted_for
    }

    /// True when no quote exists or the amount/target changed since it was taken.
    pub fn is_quote_stale(&self) -> bool {
        self.inner.read().quote_is_stale()
    }

    // -- setters -----------------------------------------------------------

    pub fn set_amount(&self, amount: u64) {
        debug!(amount, "fund form: amount changed");
        self.inner.write().fields.amount = amount;
    }

    pub fn set_conf_target(&self, conf_target: u32) {
        debug!(conf_target, "fund form: conf target changed");
        self.inner.write().fields.conf_target = conf_target;
    }

    pub fn set_expire_blocks(&self, expire_blocks: u32) {
        debug!(expire_blocks, "fund form: expire blocks changed");
        self.inner.write().fields.expire_blocks = expire_blocks;
    }

    /// Sets the amount to everything currently in the wallet.
    pub fn set_max_amount(&self) {
        let balance = self.ctx.wallet.wallet_balance();
        self.set_amount(balance);
    }

    // -- derived values ----------------------------------------------------

    pub fn has_active_account(&self) -> bool {
        self.ctx.accounts.has_active_account()
    }

    pub fn wallet_balance(&self) -> u64 {
        self.ctx.wallet.wallet_balance()
    }

    pub fn account_balance(&self) -> u64 {
        if self.has_active_account() {
            self.ctx.accounts.active_account_balance()
        } else {
            0
        }
    }

    pub fn new_balance(&self) -> u64 {
        self.account_balance().saturating_add(self.amount())
    }

    pub fn amount_issue(&self) -> Option<FieldError> {
        check_amount(self.amount(), self.wallet_balance(), &self.rules)
    }

    pub fn expire_blocks_issue(&self) -> Option<FieldError> {
        check_expire_blocks(self.expire_blocks(), &self.rules)
    }

    pub fn conf_target_issue(&self) -> Option<FieldError> {
        check_conf_target(self.conf_target())
    }

    /// Localized amount error, or an empty string.
    pub fn amount_error(&self) -> String {
        self.localize(self.amount_issue())
    }

    pub fn expire_blocks_error(&self) -> String {
        self.localize(self.expire_blocks_issue())
    }

    pub fn conf_target_error(&self) -> String {
        self.localize(self.conf_target_issue())
    }

    /// All three fields entered and the amount acceptable. The expiration and
    /// confirmation target rules are not consulted here.
    pub fn is_valid(&self) -> bool {
        let FormState {
            amount,
            conf_target,
            expire_blocks,
            ..
        } = self.state();
        amount != 0 && conf_target != 0 && expire_blocks != 0 && self.amount_issue().is_none()
    }

    pub fn summary(&self) -> FundingSummary {
        let (fields, phase, quote_is_stale) = {
            let inner = self.inner.read();
            (inner.fields, inner.phase, inner.quote_is_stale())
        };
        let has_active_account = self.has_active_account();
        let wallet_balance = self.wallet_balance();
        let account_balance = if has_active_account {
            self.ctx.accounts.active_account_balance()
        } else {
            0
        };
        let amount_issue = check_amount(fields.amount, wallet_balance, &self.rules);
        let is_valid = fields.amount != 0
            && fields.conf_target != 0
            && fields.expire_blocks != 0
            && amount_issue.is_none();

        FundingSummary {
            phase,
            fields,
            has_active_account,
            wallet_balance,
            account_balance,
            new_balance: account_balance.saturating_add(fields.amount),
            amount_error: self.localize(amount_issue),
            conf_target_error: self.localize(check_conf_target(fields.conf_target)),
            expire_blocks_error: self
                .localize(check_expire_blocks(fields.expire_blocks, &self.rules)),
            is_valid,
            quote_is_stale,
        }
    }

    fn localize(&self, issue: Option<FieldError>) -> String {
        issue
            .map(|e| e.localize(self.ctx.localizer.as_ref()))
            .unwrap_or_default()
    }

    // -- actions -----------------------------------------------------------

    /// Clears the inputs and returns to the account summary.
    pub fn cancel(&self) {
        {
            let mut inner = self.inner.write();
            inner.fields.amount = 0;
            inner.fields.conf_target = 0;
            inner.fields.expire_blocks = 0;
            inner.phase = FundingPhase::Editing;
        }
        self.ctx.navigator.show_summary();
    }

    /// Requests a miner fee quote for the current amount and confirmation
    /// target, then shows the confirmation screen. Failures go to the error
    /// reporter and leave the form on the editing screen.
    pub async fn confirm(&self) {
        let (amount, conf_target) = {
            let mut inner = self.inner.write();
            inner.phase = FundingPhase::QuoteRequested;
            (inner.fields.amount, inner.fields.conf_target)
        };

        match self.ctx.api.quote_account(amount, conf_target).await {
            Ok(quote) => {
                info!(
                    amount = %format_sats(amount),
                    conf_target,
                    miner_fee = %format_sats(quote.miner_fee_total),
                    "account quote received"
                );
                {
                    // A quote that arrives after the inputs changed is still
                    // applied; `is_quote_stale` exposes the mismatch.
                    let mut inner = self.inner.write();
                    inner.fields.miner_fee = quote.miner_fee_total;
                    inner.quoted_for = Some((amount, conf_target));
                    inner.phase = FundingPhase::Confirming;
                }
                self.ctx.navigator.show_fund_new_confirm();
            }
            Err(e) => {
                warn!(amount, conf_target, "account quote failed: {e}");
                self.inner.write().phase = FundingPhase::Editing;
                self.ctx.errors.handle_error(&e, QUOTE_ERROR_CONTEXT);
            }
        }
    }

    /// Submits the funding request. On success the form is reset and the
    /// summary shown; on failure the inputs are kept for a retry.
    pub async fn fund_account(&self) {
        let (fields, previous_phase) = {
            let mut inner = self.inner.write();
            let previous = inner.phase;
            inner.phase = FundingPhase::Submitting;
            (inner.fields, previous)
        };

        let key = self
            .ctx
            .accounts
            .create_account(fields.amount, fields.expire_blocks, fields.conf_target)
            .await;

        match key {
            Some(key) if !key.is_empty() => {
                info!(
                    trader_key = %key,
                    amount = %format_sats(fields.amount),
                    expire_blocks = fields.expire_blocks,
                    "account funded"
                );
                self.cancel();
            }
            _ => {
                // createAccount has already reported the failure.
                warn!(amount = fields.amount, "account funding did not complete");
                let mut inner = self.inner.write();
                // A cancel while the request was pending already moved the form on.
                if inner.phase == FundingPhase::Submitting {
                    inner.phase = previous_phase;
                }
            }
        }
    }
}
