//! Bounds and key functions.

use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

use vela_types::{invalid_bound, unsupported_bound, ConfigError};
use vela_value::{builtins, Callable, Value, ValueError};

/// What a value is reduced to before it is compared against the bounds.
#[derive(Clone, Debug)]
pub enum KeyFn {
    /// Compare the value itself.
    Identity,
    /// Compare the value's length.
    Length,
    Custom(Callable),
}

impl KeyFn {
    pub fn apply(&self, value: &Value) -> Result<Value, ValueError> {
        match self {
            KeyFn::Identity => Ok(value.clone()),
            KeyFn::Length => builtins::len().call(value),
            KeyFn::Custom(func) => func.call(value),
        }
    }

    /// Name shown in messages and type names; `None` for identity.
    pub fn full_name(&self) -> Option<String> {
        match self {
            KeyFn::Identity => None,
            KeyFn::Length => Some("len".to_string()),
            KeyFn::Custom(func) => Some(func.full_name()),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, KeyFn::Identity)
    }
}

impl From<Callable> for KeyFn {
    fn from(func: Callable) -> Self {
        if func.is_builtin("len") {
            KeyFn::Length
        } else {
            KeyFn::Custom(func)
        }
    }
}

/// Inclusive bounds on a key.
///
/// Either end may be absent. `lower <= upper` is not enforced; an inverted
/// range accepts nothing.
#[derive(Clone, Debug)]
pub struct Range {
    pub lower: Option<Value>,
    pub upper: Option<Value>,
    pub key: KeyFn,
}

impl Range {
    pub fn new(lower: Option<Value>, upper: Option<Value>) -> Self {
        Range {
            lower,
            upper,
            key: KeyFn::Identity,
        }
    }

    pub fn between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self::new(Some(lower.into()), Some(upper.into()))
    }

    pub fn at_least(lower: impl Into<Value>) -> Self {
        Self::new(Some(lower.into()), None)
    }

    pub fn at_most(upper: impl Into<Value>) -> Self {
        Self::new(None, Some(upper.into()))
    }

    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<KeyFn>) -> Self {
        self.key = key.into();
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// `lower:upper` with absent ends left blank.
    pub fn render(&self) -> String {
        let end = |bound: &Option<Value>| bound.as_ref().map(Value::repr).unwrap_or_default();
        format!("{}:{}", end(&self.lower), end(&self.upper))
    }

    /// Reject bounds that can never take part in an ordering comparison,
    /// and bounds that [`render`](Self::render) could not write back as a
    /// type expression literal.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for bound in [&self.lower, &self.upper].into_iter().flatten() {
            match bound {
                Value::Bool(_) | Value::Int(_) | Value::Str(_) => {}
                Value::Float(f) if f.is_finite() => {}
                Value::Float(_) | Value::Bytes(_) | Value::List(_) | Value::Tuple(_) => {
                    return Err(unsupported_bound(&bound.repr()));
                }
                Value::None | Value::Map(_) | Value::Object(_) => {
                    return Err(invalid_bound(&bound.repr()));
                }
            }
        }
        Ok(())
    }
}

impl From<RangeInclusive<i64>> for Range {
    fn from(range: RangeInclusive<i64>) -> Self {
        let (lower, upper) = range.into_inner();
        Range::between(lower, upper)
    }
}

impl From<RangeFrom<i64>> for Range {
    fn from(range: RangeFrom<i64>) -> Self {
        Range::at_least(range.start)
    }
}

impl From<RangeToInclusive<i64>> for Range {
    fn from(range: RangeToInclusive<i64>) -> Self {
        Range::at_most(range.end)
    }
}

impl From<RangeFull> for Range {
    fn from(_: RangeFull) -> Self {
        Range::unbounded()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_blanks_absent_ends() {
        assert_eq!(Range::from(10..=20).render(), "10:20");
        assert_eq!(Range::from(1..).render(), "1:");
        assert_eq!(Range::from(..=5).render(), ":5");
        assert_eq!(Range::from(..).render(), ":");
        assert_eq!(Range::between(0, 0).render(), "0:0");
        assert_eq!(Range::between("a", "f").render(), "'a':'f'");
    }

    #[test]
    fn length_key() {
        let len = KeyFn::Length.apply(&Value::string("abc")).unwrap();
        assert_eq!(len, Value::Int(3));
        assert_eq!(KeyFn::Length.full_name().as_deref(), Some("len"));
        assert_eq!(KeyFn::Identity.full_name(), None);
    }

    #[test]
    fn unorderable_bounds_are_rejected() {
        let err = Range::at_most(Value::None).validate().unwrap_err();
        assert_eq!(err.message, "Bound None does not support ordering comparisons.");
        assert!(Range::between(1.5, 2).validate().is_ok());
    }

    #[test]
    fn bounds_without_a_literal_form_are_rejected() {
        let cases = [
            (Value::bytes(b"a".to_vec()), "b'a'"),
            (Value::list(vec![Value::Int(1)]), "[1]"),
            (Value::tuple(vec![Value::Int(1), Value::Int(2)]), "(1, 2)"),
            (Value::Float(f64::NAN), "nan"),
            (Value::Float(f64::INFINITY), "inf"),
        ];
        for (bound, repr) in cases {
            let err = Range::at_least(bound).validate().unwrap_err();
            assert_eq!(
                err.message,
                format!("Bound {repr} cannot be written in a type expression.")
            );
        }
    }

    #[test]
    fn extreme_literal_bounds_are_accepted() {
        assert!(Range::between(i64::MIN, i64::MAX).validate().is_ok());
        assert!(Range::between(false, true).validate().is_ok());
        assert!(Range::between(-1e300, 1e16).validate().is_ok());
    }

    #[test]
    fn builtin_len_is_the_length_key() {
        assert!(matches!(KeyFn::from(builtins::len()), KeyFn::Length));
        assert!(matches!(KeyFn::from(builtins::abs()), KeyFn::Custom(_)));
        let lookalike = Callable::new("text", "len", |v| Ok(v.clone()));
        assert!(matches!(KeyFn::from(lookalike), KeyFn::Custom(_)));
    }
}
