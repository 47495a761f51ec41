//! Form payload for the account page.

use serde::Deserialize;

/// Deposit/withdraw form payload.
///
/// Both fields are raw text; a missing field arrives as an empty string and
/// is rejected by amount parsing rather than by the form extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    /// `deposit` or `withdraw`.
    #[serde(default)]
    pub operation: String,
    /// Amount as typed by the user.
    #[serde(default)]
    pub amount: String,
}
