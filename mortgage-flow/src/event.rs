use serde::{Deserialize, Serialize};

/// One unit of user input fed into the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    /// A predefined option token, typically a button press.
    #[serde(rename = "option")]
    Select { token: String },
    /// Free-form text, used for numeric entry. Typing an option token in a
    /// choice state works the same as pressing the button.
    Text { raw: String },
}

impl Event {
    pub fn select(token: impl Into<String>) -> Self {
        Self::Select {
            token: token.into(),
        }
    }

    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text { raw: raw.into() }
    }

    /// The raw payload, whichever kind carried it.
    pub fn value(&self) -> &str {
        match self {
            Self::Select { token } => token,
            Self::Text { raw } => raw,
        }
    }
}

/// A selectable answer offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub token: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// One unit of output for the presentation layer to render. The machine only
/// states intent; when and how it is displayed (typing delays, widgets, the
/// actual contact URL) is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Emission {
    Prompt { text: String },
    Options { choices: Vec<Choice> },
    ExternalAction { action_id: String, label: String },
}

impl Emission {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::Prompt { text: text.into() }
    }

    pub fn options(choices: Vec<Choice>) -> Self {
        Self::Options { choices }
    }

    pub fn external_action(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::ExternalAction {
            action_id: action_id.into(),
            label: label.into(),
        }
    }
}

/// Where the conversation stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    /// Waiting for the next user event.
    AwaitingInput,
    /// A terminal stage was reached; only the restart tokens do anything now.
    Completed,
    /// The event failed validation. State and context are untouched and the
    /// emissions carry the re-prompt.
    Rejected,
}

/// Result of feeding one event into the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub status: FlowStatus,
    pub emissions: Vec<Emission>,
}

impl StepOutcome {
    pub fn awaiting(emissions: Vec<Emission>) -> Self {
        Self {
            status: FlowStatus::AwaitingInput,
            emissions,
        }
    }

    pub fn completed(emissions: Vec<Emission>) -> Self {
        Self {
            status: FlowStatus::Completed,
            emissions,
        }
    }

    pub fn rejected(emissions: Vec<Emission>) -> Self {
        Self {
            status: FlowStatus::Rejected,
            emissions,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == FlowStatus::Rejected
    }
}
