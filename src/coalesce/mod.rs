//! Call Coalescing Module
//!
//! Protects the load path against cache stampedes: when many callers miss on the same key at
//! the same time, only one of them runs the expensive load and the rest wait for its result.
//!
//! ## Core Concepts
//! - **Leader**: The first caller for a key. It registers an in-flight record and runs the load.
//! - **Waiters**: Later callers for the same key. They subscribe to the leader's record and
//!   receive a clone of whatever the load produced, value or error.
//! - **Window**: Results are shared only while the load is in flight. Once the record is
//!   removed, the next caller starts a fresh load.

pub mod flight;

pub use flight::Coalescer;

#[cfg(test)]
mod tests;
