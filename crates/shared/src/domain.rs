use serde::{Deserialize, Serialize};

/// Well-known gateway states. The set is not closed; interactors may accept
/// values outside of it.
pub mod known_states {
    pub const SETUP: &str = "setup";
    pub const READY: &str = "ready";
    pub const RUNNING: &str = "running";
    pub const OFFLINE: &str = "offline";
}

/// Current operational mode as reported by the get-state use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub state_type: String,
}

impl State {
    pub fn new(state_type: impl Into<String>) -> Self {
        Self {
            state_type: state_type.into(),
        }
    }
}

/// Wire shape shared by the update request and both responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateData {
    #[serde(default)]
    pub state: String,
}

impl From<State> for StateData {
    fn from(value: State) -> Self {
        Self {
            state: value.state_type,
        }
    }
}
