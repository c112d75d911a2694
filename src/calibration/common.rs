//! Common utilities module
//!
//! This module contains the error type and small helpers shared by the
//! calibration components.

pub mod error;

pub use error::{CalibrationError, Result};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the guard if a previous holder panicked.
///
/// Every value guarded in this crate is replaced wholesale under the lock, so a
/// poisoned guard still holds a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
