//! Repository layer for persisted note lines.
//!
//! # Responsibility
//! - Define the load/save contract the services depend on.
//! - Isolate file-format details from service orchestration.
//!
//! # Invariants
//! - Repositories hold no handle between calls; each call opens, reads or
//!   writes fully, and closes.

pub mod line_repo;
