use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::State, error::InteractorError};
use tokio::sync::RwLock;
use tracing::debug;

/// Use case that replaces the current gateway state.
#[async_trait]
pub trait UpdateStateExecutor: Send + Sync {
    async fn execute(&self, state: &str) -> Result<(), InteractorError>;
}

/// Use case that reads the current gateway state.
#[async_trait]
pub trait GetStateExecutor: Send + Sync {
    async fn execute(&self) -> Result<State, InteractorError>;
}

/// Process-local holder for the current state value.
#[derive(Clone, Debug)]
pub struct StateCell {
    inner: Arc<RwLock<String>>,
}

impl StateCell {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub async fn load(&self) -> String {
        self.inner.read().await.clone()
    }

    pub async fn store(&self, value: &str) {
        let mut guard = self.inner.write().await;
        guard.clear();
        guard.push_str(value);
    }
}

#[derive(Clone)]
pub struct UpdateStateInteractor {
    cell: StateCell,
}

impl UpdateStateInteractor {
    pub fn new(cell: StateCell) -> Self {
        Self { cell }
    }
}

#[async_trait]
impl UpdateStateExecutor for UpdateStateInteractor {
    async fn execute(&self, state: &str) -> Result<(), InteractorError> {
        if state.trim().is_empty() {
            return Err(InteractorError::rejected("state must not be blank"));
        }
        self.cell.store(state).await;
        debug!(%state, "gateway state updated");
        Ok(())
    }
}

#[derive(Clone)]
pub struct GetStateInteractor {
    cell: StateCell,
}

impl GetStateInteractor {
    pub fn new(cell: StateCell) -> Self {
        Self { cell }
    }
}

#[async_trait]
impl GetStateExecutor for GetStateInteractor {
    async fn execute(&self) -> Result<State, InteractorError> {
        let current = self.cell.load().await;
        if current.trim().is_empty() {
            return Err(InteractorError::unavailable("state has not been initialized"));
        }
        Ok(State::new(current))
    }
}

/// Builds the default update/get pair over one shared cell.
pub fn in_process_interactors(
    initial_state: &str,
) -> (Arc<UpdateStateInteractor>, Arc<GetStateInteractor>) {
    let cell = StateCell::new(initial_state);
    (
        Arc::new(UpdateStateInteractor::new(cell.clone())),
        Arc::new(GetStateInteractor::new(cell)),
    )
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
