//! The conversation state machine.
//!
//! `advance` resolves exactly one user event: validate it against the current
//! state, mutate the context, move to the next state and collect the
//! emissions the presentation layer should render. Nothing here blocks or
//! suspends; each session owns its state+context pair, so independent
//! sessions can run in parallel without coordination.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::catalog::LocationCatalog;
use crate::context::{Flow, YesNo};
use crate::eligibility::{self, LtvBand, LtvOutcome};
use crate::error::Result;
use crate::event::{Choice, Emission, Event, StepOutcome};
use crate::script;
use crate::state::{ConversationState, tokens};
use crate::storage::Session;

/// Amount entry must be a plain decimal number: digits, optional fraction.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid amount pattern"));

#[derive(Clone, Copy)]
enum Sign {
    /// Loan amount, property value, collateral value.
    Positive,
    /// Deposit, existing mortgage.
    NonNegative,
}

fn parse_amount(raw: &str, sign: Sign) -> Option<f64> {
    let raw = raw.trim();
    if !AMOUNT_RE.is_match(raw) {
        return None;
    }
    let value: f64 = raw.parse().ok()?;
    match sign {
        Sign::Positive if value > 0.0 => Some(value),
        Sign::Positive => None,
        Sign::NonNegative => Some(value),
    }
}

fn yes_no_choices() -> Emission {
    Emission::options(vec![
        Choice::new("Yes", tokens::YES),
        Choice::new("No", tokens::NO),
    ])
}

/// The mortgage pre-qualification dialogue.
///
/// Holds only immutable collaborators (the location catalog); all per-user
/// state lives in the [`Session`] passed to each call.
pub struct MortgageFlow {
    catalog: LocationCatalog,
}

impl MortgageFlow {
    pub fn new(catalog: LocationCatalog) -> Self {
        Self { catalog }
    }

    /// Greeting for a session resting in `Start`, i.e. freshly created or
    /// just restarted.
    pub fn open(&self, session: &Session) -> StepOutcome {
        debug!(session_id = %session.id, "opening conversation");
        StepOutcome::awaiting(vec![
            Emission::prompt(script::GREETING_INTRO),
            Emission::prompt(script::GREETING_PITCH),
            Emission::options(vec![Choice::new(script::GET_STARTED_LABEL, tokens::START)]),
        ])
    }

    /// Resolve one user event. On a validation failure the session is left
    /// untouched and the outcome carries the re-prompt.
    pub fn advance(&self, session: &mut Session, event: &Event) -> Result<StepOutcome> {
        // The restart token short-circuits everything, in any state.
        if event.value().trim().eq_ignore_ascii_case(tokens::RESTART) {
            info!(session_id = %session.id, "restart requested, wiping session");
            session.reset();
            return Ok(self.open(session));
        }

        debug!(
            session_id = %session.id,
            state = ?session.state,
            "advancing conversation"
        );

        let value = event.value().trim();
        match session.state {
            ConversationState::Start => Ok(self.on_start(session, value)),
            ConversationState::PropertyType => Ok(self.on_property_type(session, value)),
            ConversationState::Purpose => Ok(self.on_purpose(session, value)),
            ConversationState::Location => Ok(self.on_location(session, value)),
            ConversationState::LoanAmount => Ok(self.on_loan_amount(session, value)),
            ConversationState::PropertyValue => Ok(self.on_property_value(session, value)),
            ConversationState::DepositDecision => Ok(self.on_deposit_decision(session, value)),
            ConversationState::DepositAmount => self.on_deposit_amount(session, value),
            ConversationState::CollateralDecision => {
                Ok(self.on_collateral_decision(session, value))
            }
            ConversationState::CollateralValue => self.on_collateral_value(session, value),
            ConversationState::ExistingMortgageDecision => {
                self.on_existing_mortgage_decision(session, value)
            }
            ConversationState::ExistingMortgageAmount => {
                self.on_existing_mortgage_amount(session, value)
            }
            // Sessions never rest here: the result is produced while entering
            // the state. A stored session deserialized mid-evaluation just
            // gets its result recomputed from the context, which is pure and
            // yields the same answer.
            ConversationState::LtvResult => self.present_result(session),
            ConversationState::HighLtvFollowUp => Ok(self.on_high_ltv_follow_up(session, value)),
            ConversationState::End => Ok(self.on_end(session, value)),
            // Only the restart token does anything once we said goodbye.
            ConversationState::Goodbye => Ok(StepOutcome::rejected(Vec::new())),
        }
    }

    fn on_start(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::START) {
            self.enter(session, ConversationState::PropertyType)
        } else {
            StepOutcome::rejected(vec![Emission::prompt(script::PRESS_START)])
        }
    }

    fn on_property_type(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::COMMERCIAL) {
            // Commercial is handed off to a human; the flow ends here.
            info!(session_id = %session.id, "commercial enquiry, handing off");
            self.finish(
                session,
                vec![Emission::prompt(script::COMMERCIAL_HANDOFF)],
                script::CONTACT_LABEL_COMMERCIAL,
            )
        } else if value.eq_ignore_ascii_case(tokens::RESIDENTIAL) {
            self.enter(session, ConversationState::Purpose)
        } else {
            StepOutcome::rejected(vec![Emission::prompt(script::INVALID_OPTION)])
        }
    }

    fn on_purpose(&self, session: &mut Session, value: &str) -> StepOutcome {
        let flow = if value.eq_ignore_ascii_case(tokens::PURCHASE) {
            Flow::Purchase
        } else if value.eq_ignore_ascii_case(tokens::REFINANCE) {
            Flow::Refinance
        } else {
            return StepOutcome::rejected(vec![Emission::prompt(script::INVALID_OPTION)]);
        };
        info!(session_id = %session.id, flow = ?flow, "flow selected");
        session.context.flow = Some(flow);
        self.enter(session, ConversationState::Location)
    }

    fn on_location(&self, session: &mut Session, value: &str) -> StepOutcome {
        if !self.catalog.contains(value) {
            return StepOutcome::rejected(vec![Emission::prompt(script::INVALID_LOCATION)]);
        }
        session.context.location = Some(value.to_lowercase());
        self.enter(session, ConversationState::LoanAmount)
    }

    fn on_loan_amount(&self, session: &mut Session, value: &str) -> StepOutcome {
        match parse_amount(value, Sign::Positive) {
            Some(amount) => {
                session.context.loan_amount = Some(amount);
                self.enter(session, ConversationState::PropertyValue)
            }
            None => StepOutcome::rejected(vec![Emission::prompt(script::INVALID_AMOUNT)]),
        }
    }

    fn on_property_value(&self, session: &mut Session, value: &str) -> StepOutcome {
        match parse_amount(value, Sign::Positive) {
            Some(amount) => {
                session.context.property_value = Some(amount);
                // Branch point: the two flows ask a different yes/no next.
                let next = if session.context.flow == Some(Flow::Refinance) {
                    ConversationState::ExistingMortgageDecision
                } else {
                    ConversationState::DepositDecision
                };
                self.enter(session, next)
            }
            None => StepOutcome::rejected(vec![Emission::prompt(script::INVALID_AMOUNT)]),
        }
    }

    fn on_deposit_decision(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::YES) {
            self.enter(session, ConversationState::DepositAmount)
        } else if value.eq_ignore_ascii_case(tokens::NO) {
            self.enter(session, ConversationState::CollateralDecision)
        } else {
            StepOutcome::rejected(vec![Emission::prompt(script::INVALID_OPTION)])
        }
    }

    fn on_deposit_amount(&self, session: &mut Session, value: &str) -> Result<StepOutcome> {
        match parse_amount(value, Sign::NonNegative) {
            Some(amount) => {
                session.context.deposit = Some(amount);
                self.evaluate_and_present(session)
            }
            None => Ok(StepOutcome::rejected(vec![Emission::prompt(
                script::INVALID_AMOUNT,
            )])),
        }
    }

    fn on_collateral_decision(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::YES) {
            self.enter(session, ConversationState::CollateralValue)
        } else if value.eq_ignore_ascii_case(tokens::NO) {
            // No deposit and no collateral: not eligible, no evaluation needed.
            info!(session_id = %session.id, "no deposit and no collateral, not eligible");
            self.finish(
                session,
                vec![Emission::prompt(script::NOT_ELIGIBLE)],
                script::CONTACT_LABEL_TEAM,
            )
        } else {
            StepOutcome::rejected(vec![Emission::prompt(script::INVALID_OPTION)])
        }
    }

    fn on_collateral_value(&self, session: &mut Session, value: &str) -> Result<StepOutcome> {
        match parse_amount(value, Sign::Positive) {
            Some(amount) => {
                session.context.collateral_value = Some(amount);
                self.evaluate_and_present(session)
            }
            None => Ok(StepOutcome::rejected(vec![Emission::prompt(
                script::INVALID_AMOUNT,
            )])),
        }
    }

    fn on_existing_mortgage_decision(
        &self,
        session: &mut Session,
        value: &str,
    ) -> Result<StepOutcome> {
        if value.eq_ignore_ascii_case(tokens::YES) {
            Ok(self.enter(session, ConversationState::ExistingMortgageAmount))
        } else if value.eq_ignore_ascii_case(tokens::NO) {
            self.evaluate_and_present(session)
        } else {
            Ok(StepOutcome::rejected(vec![Emission::prompt(
                script::INVALID_OPTION,
            )]))
        }
    }

    fn on_existing_mortgage_amount(
        &self,
        session: &mut Session,
        value: &str,
    ) -> Result<StepOutcome> {
        match parse_amount(value, Sign::NonNegative) {
            Some(amount) => {
                session.context.existing_mortgage = Some(amount);
                self.evaluate_and_present(session)
            }
            None => Ok(StepOutcome::rejected(vec![Emission::prompt(
                script::INVALID_AMOUNT,
            )])),
        }
    }

    fn on_high_ltv_follow_up(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::YES) {
            session.context.additional_collateral = Some(YesNo::Yes);
            self.finish(
                session,
                vec![Emission::prompt(script::HIGH_LTV_YES)],
                script::CONTACT_LABEL_CONNECT,
            )
        } else if value.eq_ignore_ascii_case(tokens::NO) {
            session.context.additional_collateral = Some(YesNo::No);
            self.finish(
                session,
                vec![Emission::prompt(script::HIGH_LTV_NO)],
                script::CONTACT_LABEL_TEAM,
            )
        } else {
            StepOutcome::rejected(vec![Emission::prompt(script::INVALID_YES_NO)])
        }
    }

    fn on_end(&self, session: &mut Session, value: &str) -> StepOutcome {
        if value.eq_ignore_ascii_case(tokens::CHECK_ANOTHER) {
            // A fresh run, not a patch of the old one: the context is wiped
            // and the property-type question is asked again.
            info!(session_id = %session.id, "checking another property");
            session.context.reset();
            self.enter(session, ConversationState::PropertyType)
        } else if value.eq_ignore_ascii_case(tokens::GOODBYE) {
            session.state = ConversationState::Goodbye;
            StepOutcome::completed(vec![
                Emission::prompt(script::GOODBYE_MESSAGE),
                Emission::external_action(script::CONTACT_ACTION_ID, script::CONTACT_LABEL_GOODBYE),
            ])
        } else {
            // Not a terminal error: re-prompt for the legal actions.
            StepOutcome::rejected(vec![Emission::prompt(script::END_REPROMPT)])
        }
    }

    /// Move to a question state and emit its prompt(s) and choices.
    fn enter(&self, session: &mut Session, next: ConversationState) -> StepOutcome {
        session.state = next;
        let refinancing = session.context.flow == Some(Flow::Refinance);
        let emissions = match next {
            ConversationState::PropertyType => vec![
                Emission::prompt(script::PROPERTY_TYPE_QUESTION),
                Emission::options(vec![
                    Choice::new("Commercial", tokens::COMMERCIAL),
                    Choice::new("Residential", tokens::RESIDENTIAL),
                ]),
            ],
            ConversationState::Purpose => vec![
                Emission::prompt(script::RESIDENTIAL_ACK),
                Emission::prompt(script::PURPOSE_QUESTION),
                Emission::options(vec![
                    Choice::new("Purchase", tokens::PURCHASE),
                    Choice::new("Refinance", tokens::REFINANCE),
                ]),
            ],
            ConversationState::Location => vec![Emission::prompt(script::LOCATION_QUESTION)],
            ConversationState::LoanAmount => vec![Emission::prompt(if refinancing {
                script::LOAN_AMOUNT_QUESTION_REFINANCE
            } else {
                script::LOAN_AMOUNT_QUESTION_PURCHASE
            })],
            ConversationState::PropertyValue => vec![Emission::prompt(if refinancing {
                script::PROPERTY_VALUE_QUESTION_REFINANCE
            } else {
                script::PROPERTY_VALUE_QUESTION_PURCHASE
            })],
            ConversationState::DepositDecision => vec![
                Emission::prompt(script::DEPOSIT_DECISION_QUESTION),
                yes_no_choices(),
            ],
            ConversationState::DepositAmount => {
                vec![Emission::prompt(script::DEPOSIT_AMOUNT_QUESTION)]
            }
            ConversationState::CollateralDecision => vec![
                Emission::prompt(script::COLLATERAL_DECISION_QUESTION),
                yes_no_choices(),
            ],
            ConversationState::CollateralValue => {
                vec![Emission::prompt(script::COLLATERAL_VALUE_QUESTION)]
            }
            ConversationState::ExistingMortgageDecision => vec![
                Emission::prompt(script::EXISTING_MORTGAGE_DECISION_QUESTION),
                yes_no_choices(),
            ],
            ConversationState::ExistingMortgageAmount => {
                vec![Emission::prompt(script::EXISTING_MORTGAGE_AMOUNT_QUESTION)]
            }
            ConversationState::HighLtvFollowUp => vec![
                Emission::prompt(script::HIGH_LTV_QUESTION),
                yes_no_choices(),
            ],
            // Start, LtvResult, End and Goodbye are entered through their own
            // dedicated paths, never through here.
            _ => Vec::new(),
        };
        StepOutcome::awaiting(emissions)
    }

    /// Terminal hand-off: the lead message(s), the contact action and the
    /// check-another follow-up, resting in `End`.
    fn finish(
        &self,
        session: &mut Session,
        mut emissions: Vec<Emission>,
        contact_label: &str,
    ) -> StepOutcome {
        session.state = ConversationState::End;
        emissions.push(Emission::external_action(
            script::CONTACT_ACTION_ID,
            contact_label,
        ));
        emissions.push(Emission::prompt(script::CHECK_ANOTHER_QUESTION));
        emissions.push(Emission::options(vec![
            Choice::new("Yes", tokens::CHECK_ANOTHER),
            Choice::new("No", tokens::GOODBYE),
        ]));
        StepOutcome::completed(emissions)
    }

    /// The context is complete for its flow: run the evaluator and present
    /// the outcome. `LtvResult` is passed through transiently here.
    fn evaluate_and_present(&self, session: &mut Session) -> Result<StepOutcome> {
        session.state = ConversationState::LtvResult;
        self.present_result(session)
    }

    fn present_result(&self, session: &mut Session) -> Result<StepOutcome> {
        let outcome = eligibility::evaluate(&session.context)?;
        match outcome {
            LtvOutcome::Ineligible => {
                session.context.ltv = None;
                info!(session_id = %session.id, "evaluated: not eligible");
                Ok(self.finish(
                    session,
                    vec![Emission::prompt(script::NOT_ELIGIBLE)],
                    script::CONTACT_LABEL_TEAM,
                ))
            }
            LtvOutcome::Ratio(ratio) => {
                session.context.ltv = Some(ratio);
                let band = eligibility::classify(ratio);
                info!(session_id = %session.id, ltv = ratio, band = ?band, "evaluated");
                match band {
                    LtvBand::Low => Ok(self.finish(
                        session,
                        vec![
                            Emission::prompt(script::ELIGIBLE_CONGRATS),
                            Emission::prompt(script::ELIGIBLE_NEXT_STEPS_LOW),
                        ],
                        script::CONTACT_LABEL_TEAM,
                    )),
                    LtvBand::Standard => Ok(self.finish(
                        session,
                        vec![
                            Emission::prompt(script::ELIGIBLE_CONGRATS),
                            Emission::prompt(script::ELIGIBLE_NEXT_STEPS),
                        ],
                        script::CONTACT_LABEL_TEAM,
                    )),
                    LtvBand::High => Ok(self.enter(session, ConversationState::HighLtvFollowUp)),
                }
            }
        }
    }
}
