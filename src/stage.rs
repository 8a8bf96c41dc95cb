//! Provisioning run stages
//!
//! ```text
//! Start → ResolveArgs → Validate → FindInterpreter → Launch → Drain → Completed
//!
//! (Validate, FindInterpreter, Launch and Drain can transition to Failed)
//! ```
//!
//! Both `Completed` and `Failed` are terminal. There are no retries.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStage {
    Start,
    ResolveArgs,
    Validate,
    FindInterpreter,
    Launch,
    Drain,
    Completed,
    Failed,
}

impl RunStage {
    /// Returns true if this is a terminal state (Completed or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if a failure may occur while in this stage
    #[inline]
    pub const fn can_fail(self) -> bool {
        matches!(
            self,
            Self::Validate | Self::FindInterpreter | Self::Launch | Self::Drain
        )
    }

    /// Returns the next stage on the success path, or None if terminal
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::ResolveArgs),
            Self::ResolveArgs => Some(Self::Validate),
            Self::Validate => Some(Self::FindInterpreter),
            Self::FindInterpreter => Some(Self::Launch),
            Self::Launch => Some(Self::Drain),
            Self::Drain => Some(Self::Completed),
            Self::Completed | Self::Failed => None,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Start => "Starting",
            Self::ResolveArgs => "Resolving arguments",
            Self::Validate => "Validating payloads",
            Self::FindInterpreter => "Locating PowerShell",
            Self::Launch => "Launching PowerShell",
            Self::Drain => "Waiting for PowerShell",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Tracks the current stage of a run and refuses to move backwards
#[derive(Debug)]
pub struct StageTracker {
    current: RunStage,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: RunStage::Start,
        }
    }

    pub fn current(&self) -> RunStage {
        self.current
    }

    /// Move to the next stage on the success path
    pub fn advance(&mut self) -> RunStage {
        if let Some(next) = self.current.next() {
            tracing::debug!("Stage: {} -> {}", self.current, next);
            self.current = next;
        }
        self.current
    }

    /// Record a failure in the current stage
    pub fn fail(&mut self) {
        debug_assert!(
            self.current.can_fail() || self.current.is_terminal(),
            "unexpected failure while {}",
            self.current
        );
        if !self.current.is_terminal() {
            tracing::debug!("Stage: {} -> {}", self.current, RunStage::Failed);
            self.current = RunStage::Failed;
        }
    }
}
