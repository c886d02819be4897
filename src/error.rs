//! Error types for the planning engine.

use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors surfaced by planning operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Required input was missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The AI backend was invoked without the settings it needs.
    #[error("AI backend not configured: {0}")]
    NotConfigured(String),

    /// The AI backend call failed or its response could not be parsed.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// A referenced plan or task does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Either `"plan"` or `"task"`.
        kind: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The plan store could not be read or written.
    #[error("store error: {0}")]
    Store(String),
}

impl PlanError {
    /// Shorthand for a missing plan.
    pub fn plan_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { kind: "plan", id: id.into() }
    }

    /// Shorthand for a missing task.
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { kind: "task", id: id.into() }
    }

    /// Whether the rule-based strategy may stand in after this failure.
    ///
    /// Only failures of the AI path qualify; everything else reaches the caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotConfigured(_) | Self::Analysis(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ai_failures_are_recoverable() {
        assert!(PlanError::NotConfigured("missing key".into()).is_recoverable());
        assert!(PlanError::Analysis("bad json".into()).is_recoverable());
        assert!(!PlanError::Validation("empty".into()).is_recoverable());
        assert!(!PlanError::plan_not_found("plan_1").is_recoverable());
        assert!(!PlanError::Store("disk full".into()).is_recoverable());
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = PlanError::task_not_found("task_9");
        assert_eq!(err.to_string(), "task not found: task_9");
    }
}
