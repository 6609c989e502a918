use crate::runtime::process::spawn_detached;
use std::process::Command;
use tracing::{debug, error};

/// Channel for errors the user should see
pub trait Notifier: Send + Sync {
    fn notify_error(&self, summary: &str, body: &str);
}

/// Notifier that only writes errors to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, summary: &str, body: &str) {
        error!("{}: {}", summary, body);
    }
}

/// Notifier that logs and shows a desktop notification through `notify-send`
///
/// Without `notify-send` on `PATH` errors are only logged.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    program: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            program: "notify-send".to_string(),
        }
    }

    /// Use another `notify-send` compatible program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn arguments(&self, summary: &str, body: &str) -> Vec<String> {
        vec![
            format!("--app-name={}", self.app_name),
            "--urgency=normal".to_string(),
            summary.to_string(),
            body.to_string(),
        ]
    }

    /// Show the notification, returning the process id of the notifier
    fn send(&self, summary: &str, body: &str) -> Option<u32> {
        let Ok(program) = which::which(&self.program) else {
            debug!("{} not available, error only logged", self.program);
            return None;
        };
        match spawn_detached(Command::new(program).args(self.arguments(summary, body))) {
            Ok(pid) => Some(pid),
            Err(e) => {
                debug!("Failed to run {}: {}", self.program, e);
                None
            }
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify_error(&self, summary: &str, body: &str) {
        TracingNotifier.notify_error(summary, body);
        self.send(summary, body);
    }
}
