//! Vela Value - Runtime values for the Vela validation layer.
//!
//! This crate provides:
//! - The dynamic value model (`Value`, `Heap`)
//! - Named native functions usable as keys and predicates (`Callable`)
//! - Value-level operational errors (`ValueError`, `ValueErrorKind`)
//!
//! # Value Model
//!
//! Values mirror the primitive and container values of a dynamically typed
//! host language: `None`, booleans, integers, floats, text, bytes, lists,
//! tuples and insertion-ordered maps, plus opaque user objects (record
//! instances). Every value renders a host-style
//! `repr` (`'abc'`, `True`, `[1, 'a']`) that error messages and generated
//! record reprs rely on.
//!
//! Heap-backed variants go through `Value::` factory methods; `Heap<T>` has
//! a crate-private constructor so external code cannot build them directly.

pub mod builtins;
mod callable;
mod errors;
mod heap;
mod object;
mod value;

pub use callable::{Callable, NativeFn, BUILTINS_MODULE};
pub use errors::{call_failed, no_length, unorderable, ValueError, ValueErrorKind};
pub use heap::Heap;
pub use object::Object;
pub use value::{compare_sequences, Value};
