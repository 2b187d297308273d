use serde::{Deserialize, Serialize};

/// Dialogue stage of one conversation. Each variant is named after the
/// question the machine is waiting to have answered while resting there.
///
/// `LtvResult` is transient: entering it runs the evaluator immediately and
/// moves on to `End` or `HighLtvFollowUp` within the same step, so a session
/// never rests there between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Start,
    PropertyType,
    Purpose,
    Location,
    LoanAmount,
    PropertyValue,
    DepositDecision,
    DepositAmount,
    CollateralDecision,
    CollateralValue,
    ExistingMortgageDecision,
    ExistingMortgageAmount,
    LtvResult,
    HighLtvFollowUp,
    End,
    Goodbye,
}

impl ConversationState {
    /// Terminal stages: the conversation is over apart from a restart or one
    /// of the two `End` follow-up tokens.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End | Self::Goodbye)
    }
}

/// Option tokens the machine recognises. Matching is case-insensitive.
pub mod tokens {
    /// Accepted in every state; wipes the session back to the greeting.
    pub const RESTART: &str = "restart";
    pub const START: &str = "start";
    pub const COMMERCIAL: &str = "commercial";
    pub const RESIDENTIAL: &str = "residential";
    pub const PURCHASE: &str = "purchase";
    pub const REFINANCE: &str = "refinance";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const CHECK_ANOTHER: &str = "check_another";
    pub const GOODBYE: &str = "goodbye";
}
