//! # Callback scheduling.
//!
//! [`ExecutionContext`] decides *where* a notification callback runs: an
//! observer holding one hands callbacks to the context's worker task and
//! returns immediately; an observer without one runs them inline.

mod executor;

pub use executor::ExecutionContext;
