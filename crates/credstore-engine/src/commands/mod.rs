//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Every public operation here emits:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod catalog;
pub mod credentials;

/// Milliseconds since `start`, for `duration_ms` fields
pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
