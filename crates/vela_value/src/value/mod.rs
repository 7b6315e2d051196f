//! Runtime values.
//!
//! # Factory Methods
//!
//! ```text
//! let s = Value::string("hello");                    // OK
//! let list = Value::list(vec![Value::int(1)]);       // OK
//! let s = Value::Str(Heap::new(...));                // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Equality and Hashing
//!
//! Numeric values compare across representations the way the host language
//! does: `True == 1` and `1 == 1.0`. Hashing follows equality, so equal
//! numbers hash identically regardless of variant.

mod ordering;
mod repr;

pub use ordering::compare_sequences;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::{no_length, ValueError};
use crate::heap::Heap;
use crate::object::Object;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The nullable sentinel.
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),

    // Heap Types
    /// Text value.
    Str(Heap<String>),
    /// Byte string value.
    Bytes(Heap<Vec<u8>>),
    /// Mutable-sequence value.
    List(Heap<Vec<Value>>),
    /// Fixed sequence value.
    Tuple(Heap<Vec<Value>>),
    /// Insertion-ordered mapping.
    Map(Heap<Vec<(Value, Value)>>),
    /// User-level object such as a record instance.
    Object(Heap<dyn Object>),
}

// Factory Methods

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a text value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a byte string value.
    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Heap::new(b.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a tuple value.
    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create a map value. Entry order is preserved.
    ///
    /// A later entry with a key equal to an earlier one replaces the earlier
    /// value in place.
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        let mut deduped: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match deduped.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => deduped.push((key, value)),
            }
        }
        Value::Map(Heap::new(deduped))
    }

    /// Wrap a user-level object.
    pub fn object<O: Object>(obj: O) -> Self {
        let inner: Arc<dyn Object> = Arc::new(obj);
        Value::Object(Heap::from_arc(inner))
    }
}

// Value Methods

impl Value {
    /// Get the type name used in messages (`int`, `str`, `NoneType`, ...).
    ///
    /// Objects report their class name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "dict",
            Value::Object(obj) => obj.class_name(),
        }
    }

    /// Check if this value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Length of a sized value.
    ///
    /// Text length counts characters, not bytes.
    pub fn len(&self) -> Result<usize, ValueError> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::Bytes(b) => Ok(b.len()),
            Value::List(items) | Value::Tuple(items) => Ok(items.len()),
            Value::Map(entries) => Ok(entries.len()),
            _ => Err(no_length(self.type_name())),
        }
    }

    /// Check if this is the nullable sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to read a numeric value as a float.
    #[allow(
        clippy::cast_precision_loss,
        reason = "int to float widening matches host numeric semantics"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a map, in insertion order.
    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Value::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    /// Host-language `repr()` of this value.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        repr::write_repr(self, &mut out);
        out
    }

    /// Host-language `str()` of this value: text is returned bare, every
    /// other value renders as its `repr`.
    pub fn to_str(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            _ => self.repr(),
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (ordering::numeric(self), ordering::numeric(other)) {
            return a == b;
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| k == bk && v == bv))
            }
            (Value::Object(a), Value::Object(b)) => a.eq_object(&**b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(num) = ordering::numeric(self) {
            num.hash(state);
            return;
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Str(s) => s.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::List(items) | Value::Tuple(items) => {
                for item in items.iter() {
                    item.hash(state);
                }
            }
            // Map equality ignores entry order, so only the size is hashed.
            Value::Map(entries) => entries.len().hash(state),
            Value::Object(obj) => obj.hash_object().hash(state),
            Value::None | Value::Bool(_) | Value::Int(_) | Value::Float(_) => {}
        }
    }
}
