//! Schema Validator: the required-column gate between normalization and
//! aggregation.
//!
//! Typed [`CanonicalTable`] rows always carry every canonical column, so
//! [`validate`] is the defensive contract check the orchestrator runs before
//! analytics. The column-level entry points exist for genuinely loose data:
//! the store crate runs [`missing_columns`] against CSV headers when
//! re-ingesting persisted tables.

use smap_core::{CanonicalTable, CANONICAL_COLUMNS};

use crate::error::SchemaViolation;

/// Columns from `required` that do not appear in `present`, preserving
/// `required` order.
pub fn missing_columns<I, S>(required: &[&str], present: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<String> = present
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    required
        .iter()
        .filter(|col| !present.iter().any(|p| p == *col))
        .map(|col| (*col).to_string())
        .collect()
}

/// Check a column set against the canonical schema.
///
/// # Errors
///
/// Returns [`SchemaViolation`] naming exactly the absent canonical columns.
pub fn check_required_columns<I, S>(present: I) -> Result<(), SchemaViolation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing = missing_columns(&CANONICAL_COLUMNS, present);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaViolation { missing })
    }
}

/// Verify a normalized table satisfies the required-column contract.
///
/// Non-mutating. An empty table is a vacuous pass, matching the
/// normalizer's short-circuit so an all-platforms-empty collection cycle
/// completes without aborting the run.
///
/// # Errors
///
/// Returns [`SchemaViolation`] if any canonical column is absent. With rows
/// already in [`CanonicalRecord`](smap_core::CanonicalRecord) form this
/// cannot happen; the check remains as the contract gate ahead of the
/// aggregation engine.
pub fn validate(table: &CanonicalTable) -> Result<bool, SchemaViolation> {
    if table.is_empty() {
        return Ok(true);
    }
    check_required_columns(CANONICAL_COLUMNS)?;
    Ok(true)
}
