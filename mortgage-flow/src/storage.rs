use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::error::Result;
use crate::state::ConversationState;

/// One conversation: the resting state plus everything collected so far.
/// The state+context pair is the entire session; there is no other hidden
/// state, so sessions can be created, stored and dropped independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: ConversationState,
    pub context: ConversationContext,
}

impl Session {
    /// A fresh session resting at the greeting.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: ConversationState::Start,
            context: ConversationContext::default(),
        }
    }

    /// Back to the greeting with an empty context, keeping the id.
    pub fn reset(&mut self) {
        self.state = ConversationState::Start;
        self.context.reset();
    }
}

/// Trait for storing and retrieving sessions.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory implementation of [`SessionStorage`]. Sessions live as long as
/// the process; nothing is persisted across runs.
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}
