//! Value-level operational errors.
//!
//! These are the failures a value can raise on its own, independent of any
//! declared type: ordering two values that have no common ordering, asking
//! for the length of an unsized value, or a native function rejecting its
//! argument. Higher layers wrap them into validation errors.

use std::fmt;

/// Typed category for value-level failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// Ordering comparison between values without a common ordering.
    Unorderable {
        op: &'static str,
        left: String,
        right: String,
    },
    /// `len()` applied to a value without a length.
    NoLength { type_name: String },
    /// A native function returned an error.
    CallFailed { function: String, message: String },
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unorderable { op, left, right } => write!(
                f,
                "'{op}' not supported between instances of '{left}' and '{right}'"
            ),
            Self::NoLength { type_name } => {
                write!(f, "object of type '{type_name}' has no len()")
            }
            Self::CallFailed { function, message } => write!(f, "{function}(): {message}"),
        }
    }
}

/// Value-level error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueError {
    /// Structured error category.
    pub kind: ValueErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
}

impl ValueError {
    fn from_kind(kind: ValueErrorKind) -> Self {
        let message = kind.to_string();
        ValueError { kind, message }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValueError {}

/// Ordering comparison between incompatible values.
#[cold]
pub fn unorderable(op: &'static str, left: &str, right: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::Unorderable {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// Length requested for an unsized value.
#[cold]
pub fn no_length(type_name: &str) -> ValueError {
    ValueError::from_kind(ValueErrorKind::NoLength {
        type_name: type_name.to_string(),
    })
}

/// A native function rejected its argument.
#[cold]
pub fn call_failed(function: &str, message: impl Into<String>) -> ValueError {
    ValueError::from_kind(ValueErrorKind::CallFailed {
        function: function.to_string(),
        message: message.into(),
    })
}
