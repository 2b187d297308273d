//! The eligibility evaluator: a pure mapping from a completed
//! [`ConversationContext`] to a loan-to-value ratio or an ineligible signal.
//!
//! Formulas (ratios are percentages):
//! - purchase with a deposit: `loan / (property value + deposit) * 100`
//! - purchase secured by collateral: `loan / collateral value * 100`
//! - purchase with neither: ineligible
//! - refinance with an existing mortgage: `(loan + existing) / property value * 100`
//! - refinance without one: `loan / property value * 100`

use crate::context::{ConversationContext, Flow};
use crate::error::{FlowError, Result};

/// What the evaluator produced for a completed context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LtvOutcome {
    Ratio(f64),
    /// Purchase with neither a deposit nor collateral: a normal business
    /// outcome, not an error.
    Ineligible,
}

/// Band a computed ratio falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LtvBand {
    /// Below 60: eligible, low-LTV message.
    Low,
    /// 60 to 80 inclusive: eligible, standard message.
    Standard,
    /// Above 80: conditional, needs the additional-collateral follow-up.
    High,
}

pub fn classify(ratio: f64) -> LtvBand {
    if ratio < 60.0 {
        LtvBand::Low
    } else if ratio <= 80.0 {
        LtvBand::Standard
    } else {
        LtvBand::High
    }
}

/// Evaluate a completed context.
///
/// The state machine validates every figure before it is stored, so required
/// fields are present and divisors strictly positive by the time this runs.
/// A violation therefore indicates a gating bug upstream and comes back as
/// [`FlowError::PreconditionViolation`], never as a panic or a zero divide.
pub fn evaluate(context: &ConversationContext) -> Result<LtvOutcome> {
    let flow = context
        .flow
        .ok_or(FlowError::PreconditionViolation("flow not set"))?;
    let loan = positive(context.loan_amount, "loan_amount missing or not positive")?;

    match flow {
        Flow::Purchase => {
            if let Some(deposit) = context.deposit.filter(|d| *d > 0.0) {
                let value =
                    positive(context.property_value, "property_value missing or not positive")?;
                Ok(LtvOutcome::Ratio(loan / (value + deposit) * 100.0))
            } else if let Some(collateral) = context.collateral_value.filter(|c| *c > 0.0) {
                Ok(LtvOutcome::Ratio(loan / collateral * 100.0))
            } else {
                Ok(LtvOutcome::Ineligible)
            }
        }
        Flow::Refinance => {
            let value =
                positive(context.property_value, "property_value missing or not positive")?;
            // An absent existing mortgage is treated the same as zero.
            let existing = context.existing_mortgage.unwrap_or(0.0);
            if existing > 0.0 {
                Ok(LtvOutcome::Ratio((loan + existing) / value * 100.0))
            } else {
                Ok(LtvOutcome::Ratio(loan / value * 100.0))
            }
        }
    }
}

fn positive(field: Option<f64>, fault: &'static str) -> Result<f64> {
    match field {
        Some(v) if v > 0.0 => Ok(v),
        _ => Err(FlowError::PreconditionViolation(fault)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase() -> ConversationContext {
        ConversationContext {
            flow: Some(Flow::Purchase),
            ..Default::default()
        }
    }

    fn refinance() -> ConversationContext {
        ConversationContext {
            flow: Some(Flow::Refinance),
            ..Default::default()
        }
    }

    fn ratio(context: &ConversationContext) -> f64 {
        match evaluate(context).unwrap() {
            LtvOutcome::Ratio(r) => r,
            LtvOutcome::Ineligible => panic!("expected a ratio"),
        }
    }

    #[test]
    fn purchase_with_deposit_uses_value_plus_deposit() {
        let mut ctx = purchase();
        ctx.loan_amount = Some(80.0);
        ctx.property_value = Some(20.0);
        ctx.deposit = Some(80.0);
        let r = ratio(&ctx);
        assert!((r - 80.0).abs() < f64::EPSILON);
        assert_eq!(classify(r), LtvBand::Standard);
    }

    #[test]
    fn purchase_without_deposit_uses_collateral() {
        let mut ctx = purchase();
        ctx.loan_amount = Some(90.0);
        ctx.property_value = Some(10.0);
        ctx.collateral_value = Some(100.0);
        let r = ratio(&ctx);
        assert!((r - 90.0).abs() < f64::EPSILON);
        assert_eq!(classify(r), LtvBand::High);
    }

    #[test]
    fn purchase_with_zero_deposit_falls_back_to_collateral() {
        let mut ctx = purchase();
        ctx.loan_amount = Some(50.0);
        ctx.property_value = Some(100.0);
        ctx.deposit = Some(0.0);
        ctx.collateral_value = Some(200.0);
        assert!((ratio(&ctx) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn purchase_with_neither_deposit_nor_collateral_is_ineligible() {
        let mut ctx = purchase();
        ctx.loan_amount = Some(50.0);
        ctx.property_value = Some(100.0);
        assert_eq!(evaluate(&ctx).unwrap(), LtvOutcome::Ineligible);

        ctx.deposit = Some(0.0);
        assert_eq!(evaluate(&ctx).unwrap(), LtvOutcome::Ineligible);
    }

    #[test]
    fn refinance_adds_existing_mortgage_to_the_loan() {
        let mut ctx = refinance();
        ctx.loan_amount = Some(50.0);
        ctx.property_value = Some(100.0);
        ctx.existing_mortgage = Some(30.0);
        let r = ratio(&ctx);
        // Boundary value: exactly 80 still counts as standard eligible.
        assert!((r - 80.0).abs() < f64::EPSILON);
        assert_eq!(classify(r), LtvBand::Standard);
    }

    #[test]
    fn refinance_without_existing_mortgage() {
        let mut ctx = refinance();
        ctx.loan_amount = Some(50.0);
        ctx.property_value = Some(100.0);
        assert!((ratio(&ctx) - 50.0).abs() < f64::EPSILON);

        // Zero is treated the same as absent.
        ctx.existing_mortgage = Some(0.0);
        assert!((ratio(&ctx) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify(59.999), LtvBand::Low);
        assert_eq!(classify(60.0), LtvBand::Standard);
        assert_eq!(classify(80.0), LtvBand::Standard);
        assert_eq!(classify(80.001), LtvBand::High);
    }

    #[test]
    fn missing_required_fields_are_precondition_violations() {
        let ctx = ConversationContext::default();
        assert!(matches!(
            evaluate(&ctx),
            Err(FlowError::PreconditionViolation(_))
        ));

        let mut ctx = refinance();
        ctx.loan_amount = Some(50.0);
        // property_value missing for a refinance: the divisor would be zero.
        assert!(matches!(
            evaluate(&ctx),
            Err(FlowError::PreconditionViolation(_))
        ));

        let mut ctx = purchase();
        ctx.loan_amount = Some(-1.0);
        assert!(matches!(
            evaluate(&ctx),
            Err(FlowError::PreconditionViolation(_))
        ));
    }
}
