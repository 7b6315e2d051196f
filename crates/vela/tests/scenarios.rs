// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end scenarios through the public `vela` API.
//!
//! - `expressions/` - resolving type expressions and their display names
//! - `constrained/` - bounded, length and predicate types on their own
//! - `records/` - record classes using all of the above as field types

#[path = "scenarios/common.rs"]
mod common;

#[path = "scenarios/expressions.rs"]
mod expressions;

#[path = "scenarios/constrained.rs"]
mod constrained;

#[path = "scenarios/records.rs"]
mod records;
