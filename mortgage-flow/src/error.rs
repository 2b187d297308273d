use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

/// Internal faults of the flow engine.
///
/// Rejected user input is not an error: the machine answers it with a
/// [`FlowStatus::Rejected`](crate::event::FlowStatus) step outcome and a
/// re-prompt. Everything here signals a defect or a caller mistake, never a
/// business outcome.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The evaluator was reached with a missing or out-of-range required
    /// field. The state machine gates every numeric input, so this cannot
    /// happen through `advance`; seeing it means a bug.
    #[error("evaluator precondition violated: {0}")]
    PreconditionViolation(&'static str),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("location catalog must not be empty")]
    EmptyCatalog,

    #[error("storage error: {0}")]
    Storage(String),
}
