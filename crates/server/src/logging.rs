use tracing::error;
use tracing_subscriber::EnvFilter;

/// Error sink handed to controllers.
pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        error!(component = self.component, "{message}");
    }
}

pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}
