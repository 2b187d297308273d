//! Conversation engine for mortgage pre-qualification chat.
//!
//! Two cooperating pieces: [`MortgageFlow`], the state machine that walks a
//! user through the purchase or refinance question sequence, and the
//! [`eligibility`] evaluator, a pure function turning the collected figures
//! into a loan-to-value ratio. Presentation (rendering, typing animation,
//! the contact channel) stays outside: the machine only emits intents.

pub mod catalog;
pub mod context;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod machine;
pub mod runner;
pub mod script;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use catalog::LocationCatalog;
pub use context::{ConversationContext, Flow, YesNo};
pub use eligibility::{LtvBand, LtvOutcome, classify, evaluate};
pub use error::{FlowError, Result};
pub use event::{Choice, Emission, Event, FlowStatus, StepOutcome};
pub use machine::MortgageFlow;
pub use runner::FlowRunner;
pub use state::{ConversationState, tokens};
pub use storage::{InMemorySessionStorage, Session, SessionStorage};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn runner() -> (FlowRunner, Arc<InMemorySessionStorage>) {
        let flow = Arc::new(MortgageFlow::new(
            LocationCatalog::new(["Toronto", "Ottawa"]).unwrap(),
        ));
        let storage = Arc::new(InMemorySessionStorage::new());
        (FlowRunner::new(flow, storage.clone()), storage)
    }

    #[tokio::test]
    async fn storage_round_trip() {
        let storage = InMemorySessionStorage::new();

        let session = Session::new("session1");
        storage.save(session.clone()).await.unwrap();

        let retrieved = storage.get("session1").await.unwrap().unwrap();
        assert_eq!(retrieved.state, ConversationState::Start);
        assert_eq!(retrieved.context, ConversationContext::default());

        storage.delete("session1").await.unwrap();
        assert!(storage.get("session1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn runner_persists_each_step() {
        let (runner, storage) = runner();
        storage.save(Session::new("s1")).await.unwrap();

        let greeting = runner.open("s1").await.unwrap();
        assert_eq!(greeting.status, FlowStatus::AwaitingInput);

        runner.run("s1", &Event::select("start")).await.unwrap();
        runner
            .run("s1", &Event::select("residential"))
            .await
            .unwrap();
        runner.run("s1", &Event::select("refinance")).await.unwrap();

        // The resting state survives the save/load on every step.
        let stored = storage.get("s1").await.unwrap().unwrap();
        assert_eq!(stored.state, ConversationState::Location);
        assert_eq!(stored.context.flow, Some(Flow::Refinance));

        runner.run("s1", &Event::select("ottawa")).await.unwrap();
        runner.run("s1", &Event::text("50")).await.unwrap();
        runner.run("s1", &Event::text("100")).await.unwrap();
        let outcome = runner.run("s1", &Event::select("no")).await.unwrap();
        assert_eq!(outcome.status, FlowStatus::Completed);

        let stored = storage.get("s1").await.unwrap().unwrap();
        assert_eq!(stored.state, ConversationState::End);
        assert_eq!(stored.context.ltv, Some(50.0));
    }

    #[tokio::test]
    async fn runner_reports_missing_sessions() {
        let (runner, _storage) = runner();
        let err = runner.run("nope", &Event::select("start")).await;
        assert!(matches!(err, Err(FlowError::SessionNotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn parallel_sessions_do_not_share_state() {
        let (runner, storage) = runner();
        storage.save(Session::new("a")).await.unwrap();
        storage.save(Session::new("b")).await.unwrap();

        // Interleave two conversations on different branches.
        for event in ["start", "residential", "purchase"] {
            runner.run("a", &Event::select(event)).await.unwrap();
        }
        for event in ["start", "residential", "refinance"] {
            runner.run("b", &Event::select(event)).await.unwrap();
        }
        runner.run("a", &Event::select("toronto")).await.unwrap();
        runner.run("b", &Event::select("ottawa")).await.unwrap();
        runner.run("a", &Event::text("90")).await.unwrap();
        runner.run("b", &Event::text("50")).await.unwrap();

        let a = storage.get("a").await.unwrap().unwrap();
        let b = storage.get("b").await.unwrap().unwrap();
        assert_eq!(a.context.flow, Some(Flow::Purchase));
        assert_eq!(b.context.flow, Some(Flow::Refinance));
        assert_eq!(a.context.loan_amount, Some(90.0));
        assert_eq!(b.context.loan_amount, Some(50.0));
        assert_eq!(a.context.location.as_deref(), Some("toronto"));
        assert_eq!(b.context.location.as_deref(), Some("ottawa"));
    }

    #[test]
    fn events_and_emissions_use_the_documented_wire_shape() {
        let event: Event = serde_json::from_str(r#"{"kind":"option","token":"yes"}"#).unwrap();
        assert_eq!(event, Event::select("yes"));
        let event: Event = serde_json::from_str(r#"{"kind":"text","raw":"1200"}"#).unwrap();
        assert_eq!(event, Event::text("1200"));

        let action = Emission::external_action("open_contact_form", "Get in Touch");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "externalAction");
        assert_eq!(json["actionId"], "open_contact_form");

        let options = Emission::options(vec![Choice::new("Yes", "yes")]);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["kind"], "options");
        assert_eq!(json["choices"][0]["token"], "yes");
    }
}
