// Pool account funding: form state, validation, and the quote/submit workflow.

pub mod format;
pub mod fund_account;
pub mod providers;
pub mod validation;

// Re-export primary types for convenient access.
pub use format::format_sats;
pub use fund_account::{
    FormState, FundAccountForm, FundingContext, FundingPhase, FundingSummary, QUOTE_ERROR_CONTEXT,
};
pub use lit_core::error_handler::ErrorReporter;
pub use providers::{
    AccountInfoProvider, AccountKey, FundingApi, Navigator, QuoteAccountResponse,
    WalletInfoProvider,
};
pub use validation::{FieldError, check_amount, check_conf_target, check_expire_blocks};
