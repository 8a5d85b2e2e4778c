use thiserror::Error;

/// Raised when required columns are structurally absent from a table.
///
/// Fatal to the current run's analytics stage: the orchestrator logs it and
/// aborts rather than feeding an incomplete table to the aggregations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required columns: [{}]", .missing.join(", "))]
pub struct SchemaViolation {
    /// The absent column names, in canonical schema order.
    pub missing: Vec<String>,
}
