use serde::{Deserialize, Serialize};

/// The borrower's top-level intent, fixed once chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Purchase,
    Refinance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

/// Everything collected from the user over one conversation.
///
/// Fields are filled in monotonically as the dialogue progresses; the machine
/// validates each value before storing it, so a populated field always
/// satisfies its range constraint (amounts strictly positive, deposit and
/// existing mortgage non-negative).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub flow: Option<Flow>,
    pub location: Option<String>,
    pub loan_amount: Option<f64>,
    pub property_value: Option<f64>,
    /// Purchase flow, deposit path.
    pub deposit: Option<f64>,
    /// Purchase flow, no-deposit path.
    pub collateral_value: Option<f64>,
    /// Refinance flow only.
    pub existing_mortgage: Option<f64>,
    /// Last computed loan-to-value ratio, recomputed on each evaluation.
    pub ltv: Option<f64>,
    /// Answer to the follow-up asked when the ratio exceeds 80.
    pub additional_collateral: Option<YesNo>,
}

impl ConversationContext {
    /// Wipe every field. Used on restart and on "check another property" so
    /// nothing from the previous run can leak into the next evaluation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
