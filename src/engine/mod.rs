//! Streak computation and log reconciliation.
//!
//! Everything in here is synchronous and free of I/O: functions take the full history as an
//! argument and return new values. Loading and persisting is done by [crate::storage].
//!
//!  - [validation] checks single records.
//!  - [log_store::merge] folds new records into the history, last write for a day wins.
//!  - [streak::compute] derives the current streak of every habit.
//!  - [reconcile::check_in] ties the three together for one check-in.

pub mod habit;
pub mod log_store;
pub mod reconcile;
pub mod record;
pub mod streak;
pub mod validation;
