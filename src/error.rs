use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by a rostering run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Input collections are empty or inconsistent. Detected before any
    /// optimization work.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The search finished but the best assignment is still unacceptable,
    /// usually because there are too few drivers for the routes.
    #[error(
        "no acceptable schedule found (best fitness {best_fitness} < {threshold}); \
         there are probably too few drivers for these routes"
    )]
    SchedulingFailure { best_fitness: i64, threshold: i64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("scheduling run was cancelled")]
    Cancelled,

    #[error("scheduling run timed out after {timeout:?}")]
    TimedOut { timeout: Duration },

    #[error("scheduling worker failed: {0}")]
    Worker(String),
}

impl ScheduleError {
    /// Whether the error is the caller's fault (bad input or an
    /// under-resourced instance) rather than an execution problem.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidInput(_)
                | ScheduleError::SchedulingFailure { .. }
                | ScheduleError::InvalidConfig(_)
        )
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_input_error_message_lists_all_problems() {
        let err = ScheduleError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::EmptyCollection, "No drivers supplied"),
            ValidationError::new(ValidationErrorKind::EmptyCollection, "No routes supplied"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("No drivers supplied"));
        assert!(msg.contains("No routes supplied"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_failure_message() {
        let err = ScheduleError::SchedulingFailure {
            best_fitness: -250,
            threshold: -99,
        };
        assert!(err.to_string().contains("-250"));
        assert!(err.is_client_error());
        assert!(!ScheduleError::Cancelled.is_client_error());
    }
}
