//! FlowRunner - convenience wrapper that loads a session, resolves exactly
//! one event, and persists the updated session back to storage.
//!
//! A web service usually wants one step per request: feed the user's event
//! in, send the emissions back, and have the session saved for the next
//! roundtrip. `FlowRunner` makes that a one-liner. Callers that need custom
//! persistence (batching, locking) can use [`MortgageFlow::advance`] with a
//! [`SessionStorage`] directly; the two are fully compatible.

use std::sync::Arc;

use crate::error::{FlowError, Result};
use crate::event::{Event, StepOutcome};
use crate::machine::MortgageFlow;
use crate::storage::SessionStorage;

/// High-level helper orchestrating the common load -> advance -> save pattern.
#[derive(Clone)]
pub struct FlowRunner {
    flow: Arc<MortgageFlow>,
    storage: Arc<dyn SessionStorage>,
}

impl FlowRunner {
    pub fn new(flow: Arc<MortgageFlow>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { flow, storage }
    }

    /// Greeting emissions for an existing session resting at the start.
    /// Read-only: nothing to persist.
    pub async fn open(&self, session_id: &str) -> Result<StepOutcome> {
        let session = self
            .storage
            .get(session_id)
            .await?
            .ok_or_else(|| FlowError::SessionNotFound(session_id.to_string()))?;
        Ok(self.flow.open(&session))
    }

    /// Resolve **exactly one** event for the given session and persist the
    /// updated state so the next call starts where this one left off.
    pub async fn run(&self, session_id: &str, event: &Event) -> Result<StepOutcome> {
        let mut session = self
            .storage
            .get(session_id)
            .await?
            .ok_or_else(|| FlowError::SessionNotFound(session_id.to_string()))?;

        let outcome = self.flow.advance(&mut session, event)?;

        self.storage.save(session).await?;

        Ok(outcome)
    }
}
