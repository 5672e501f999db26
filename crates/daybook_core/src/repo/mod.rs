//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by services.
//! - Isolate JSON document details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to I/O
//!   and encoding errors.
//! - Read failures degrade to empty collections; write failures propagate.

pub mod json_store;
