use std::fmt;

/// One-shot controller lifecycle: `Idle -> Running -> Stopped`.
///
/// `Stopped` is terminal. Stopping an idle controller moves it straight to
/// `Stopped` without ever scheduling a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Idle => "idle",
            Lifecycle::Running => "running",
            Lifecycle::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
