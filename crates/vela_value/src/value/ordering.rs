//! Numeric normalization and fallible ordering.
//!
//! Ordering is partial in two ways: values of unrelated types cannot be
//! ordered at all (an error), and `NaN` compares as unordered (`Ok(None)`),
//! which makes every ordering test on it false.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::Value;
use crate::errors::{unorderable, ValueError};

/// Numeric view of a value: booleans and integers are exact, floats are
/// kept as-is.
#[derive(Clone, Copy, Debug)]
pub(super) enum Number {
    Int(i64),
    Float(f64),
}

pub(super) fn numeric(value: &Value) -> Option<Number> {
    match value {
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

impl Number {
    /// Integral floats inside the `i64` range collapse to integers so that
    /// `1 == 1.0` hashes consistently.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "guarded by the integral and range checks"
    )]
    fn normalized(self) -> Number {
        match self {
            Number::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Number::Int(f as i64)
            }
            other => other,
        }
    }

    fn partial_cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }
}

/// Exact comparison of an integer with a float. The integer is never
/// rounded, so `2**53 + 1` and `2.0**53` stay distinct.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "the float is truncated only once it is known to fit in i64"
)]
fn cmp_int_float(a: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    let two_pow_63 = 2.0_f64.powi(63);
    if f >= two_pow_63 {
        return Some(Ordering::Less);
    }
    if f < -two_pow_63 {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal if f > whole => Some(Ordering::Less),
        Ordering::Equal if f < whole => Some(Ordering::Greater),
        ord => Some(ord),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(*other) == Some(Ordering::Equal)
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.normalized() {
            Number::Int(n) => {
                state.write_u8(b'i');
                n.hash(state);
            }
            Number::Float(f) => {
                state.write_u8(b'f');
                f.to_bits().hash(state);
            }
        }
    }
}

impl Value {
    /// Compare two values for ordering.
    ///
    /// `op` is the operator symbol reported if the values cannot be ordered.
    /// Returns `Ok(None)` for unordered numeric pairs (`NaN`).
    pub fn try_partial_cmp(
        &self,
        other: &Value,
        op: &'static str,
    ) -> Result<Option<Ordering>, ValueError> {
        if let (Some(a), Some(b)) = (numeric(self), numeric(other)) {
            return Ok(a.partial_cmp(b));
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.as_str().cmp(b.as_str()))),
            (Value::Bytes(a), Value::Bytes(b)) => Ok(Some(a.as_slice().cmp(b.as_slice()))),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                compare_sequences(a, b, op)
            }
            (Value::Object(a), Value::Object(b)) => a.cmp_object(&**b, op),
            _ => Err(unorderable(op, self.type_name(), other.type_name())),
        }
    }

    /// `self < other`.
    pub fn lt(&self, other: &Value) -> Result<bool, ValueError> {
        Ok(self.try_partial_cmp(other, "<")? == Some(Ordering::Less))
    }

    /// `self > other`.
    pub fn gt(&self, other: &Value) -> Result<bool, ValueError> {
        Ok(self.try_partial_cmp(other, ">")? == Some(Ordering::Greater))
    }
}

/// Lexicographic ordering of two sequences.
///
/// Equal prefixes are skipped using equality, so only the first differing
/// pair has to be orderable.
pub fn compare_sequences(
    a: &[Value],
    b: &[Value],
    op: &'static str,
) -> Result<Option<Ordering>, ValueError> {
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            return x.try_partial_cmp(y, op);
        }
    }
    Ok(Some(a.len().cmp(&b.len())))
}
