//! Domain model for the task list and reference data.
//!
//! # Responsibility
//! - Define the records persisted in the session store.
//! - Provide seed data used when nothing is persisted yet.
//!
//! # Invariants
//! - Records validate on deserialization; malformed data never reaches views.
//! - Persisted JSON round-trips: `load(save(list)) == list`.

pub mod project;
pub mod seed;
pub mod task;
