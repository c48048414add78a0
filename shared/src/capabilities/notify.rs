use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Fire-and-forget toasts. The shell never acknowledges them.
#[derive(crux_core::macros::Capability)]
pub struct Notify<Ev> {
    context: CapabilityContext<NotifyOperation, Ev>,
}

impl<Ev> Notify<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NotifyOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn show(&self, notification: Notification) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(NotifyOperation::Show(notification)).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotifyOperation {
    Show(Notification),
}

impl Operation for NotifyOperation {
    type Output = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub priority: Priority,
    pub duration_ms: u64,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            priority: Priority::Normal,
            duration_ms,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            priority: Priority::Normal,
            duration_ms,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
