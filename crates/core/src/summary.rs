//! Count-based outcome shared by every bulk operation.

use serde::Serialize;

/// How a fan-out of remote calls ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOutcome {
    /// No remote call was needed.
    NothingToDo,
    FullSuccess,
    Partial,
    TotalFailure,
}

impl BulkOutcome {
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (0, 0) => Self::NothingToDo,
            (_, 0) => Self::FullSuccess,
            (0, _) => Self::TotalFailure,
            _ => Self::Partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_counts() {
        assert_eq!(BulkOutcome::from_counts(0, 0), BulkOutcome::NothingToDo);
        assert_eq!(BulkOutcome::from_counts(4, 0), BulkOutcome::FullSuccess);
        assert_eq!(BulkOutcome::from_counts(3, 1), BulkOutcome::Partial);
        assert_eq!(BulkOutcome::from_counts(0, 2), BulkOutcome::TotalFailure);
    }
}
