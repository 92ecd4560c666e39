use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` port backed by `tracing`, tagging every event with the
/// component that emitted it.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("extraction")
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "trend_radar", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "trend_radar", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "trend_radar", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "trend_radar", component = self.component, "{}", message);
    }
}
