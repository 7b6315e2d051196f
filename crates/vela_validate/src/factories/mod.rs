//! The `Bounded`, `Length`, `Valid` and `String` factories.
//!
//! Each factory is parameterized with a list of `Param`s, exactly as it is
//! when subscripted in a type expression, and also offers typed
//! constructors for use from code:
//!
//! ```text
//! Bounded[int, 10:20]          Bounded::new(Type::Int, 10..=20)
//! Bounded[str, 1:5, len]       Bounded::with_key(Type::Str, 1..=5, len())
//! Length[list, 1:]             Length::new(Type::list(Type::Any), 1..)
//! Valid[int, checks.positive]  Valid::typed(Type::Int, positive)
//! String[1:]                   Str::new(1..)
//! ```
//!
//! A bare bound in place of a slice is an upper bound: `Bounded[int, 20]`
//! is `Bounded[int, :20]`.

use vela_types::{
    invalid_parameter, too_many_parameters, too_many_positional, wrong_arity, ConfigError, Error,
    Param, Type, TypeFactory,
};
use vela_value::{Callable, Value};

use crate::range::{KeyFn, Range};
use crate::synth::{assemble, build, BaseType, Constraint, Flavor, SynthesizedType};

fn base_param(factory: &str, param: &Param) -> Result<BaseType, ConfigError> {
    match param {
        Param::Type(ty) => Ok(BaseType::from(ty.clone())),
        Param::Callable(func) => Ok(BaseType::Converter(func.clone())),
        other => Err(invalid_parameter(factory, "a type", &other.describe())),
    }
}

fn range_param(factory: &str, param: &Param) -> Result<Range, ConfigError> {
    match param {
        Param::Slice { lower, upper } => Ok(Range::new(lower.clone(), upper.clone())),
        Param::Value(bound) => Ok(Range::at_most(bound.clone())),
        other => Err(invalid_parameter(factory, "a slice", &other.describe())),
    }
}

fn callable_param(factory: &str, param: &Param) -> Result<Callable, ConfigError> {
    match param {
        Param::Callable(func) => Ok(func.clone()),
        other => Err(invalid_parameter(factory, "a function", &other.describe())),
    }
}

/// `Bounded[type, range]` and `Bounded[type, range, key]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bounded;

impl Bounded {
    pub const NAME: &'static str = "Bounded";

    pub fn new(
        base: impl Into<BaseType>,
        range: impl Into<Range>,
    ) -> Result<SynthesizedType, ConfigError> {
        build(
            base.into(),
            Constraint::Bounds(range.into()),
            Flavor::Bounded,
        )
    }

    /// Bounds applied to `key(value)` instead of the value.
    pub fn with_key(
        base: impl Into<BaseType>,
        range: impl Into<Range>,
        key: Callable,
    ) -> Result<SynthesizedType, ConfigError> {
        Self::new(base, range.into().with_key(key))
    }
}

impl TypeFactory for Bounded {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        let ty = match params {
            [base, bound] => Self::new(
                base_param(Self::NAME, base)?,
                range_param(Self::NAME, bound)?,
            )?,
            [base, bound, key] => Self::with_key(
                base_param(Self::NAME, base)?,
                range_param(Self::NAME, bound)?,
                callable_param(Self::NAME, key)?,
            )?,
            [] | [_] => return Err(wrong_arity(Self::NAME, "two or three arguments")),
            _ => return Err(too_many_parameters(Self::NAME)),
        };
        Ok(ty.to_type())
    }
}

/// `Length[type, range]`: bounds on `len(value)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Length;

impl Length {
    pub const NAME: &'static str = "Length";

    pub fn new(
        base: impl Into<BaseType>,
        range: impl Into<Range>,
    ) -> Result<SynthesizedType, ConfigError> {
        build(
            base.into(),
            Constraint::Bounds(range.into().with_key(KeyFn::Length)),
            Flavor::Length,
        )
    }
}

impl TypeFactory for Length {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        match params {
            [base, bound] => {
                let ty = Self::new(
                    base_param(Self::NAME, base)?,
                    range_param(Self::NAME, bound)?,
                )?;
                Ok(ty.to_type())
            }
            _ => Err(wrong_arity(Self::NAME, "exactly two arguments")),
        }
    }
}

/// `Valid[predicate]` and `Valid[type, predicate]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Valid;

impl Valid {
    pub const NAME: &'static str = "Valid";

    /// Any value for which `predicate` is truthy.
    pub fn new(predicate: Callable) -> SynthesizedType {
        Self::typed(BaseType::Any, predicate)
    }

    pub fn typed(base: impl Into<BaseType>, predicate: Callable) -> SynthesizedType {
        assemble(base.into(), Constraint::Predicate(predicate), Flavor::Valid)
    }
}

impl TypeFactory for Valid {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        let ty = match params {
            [predicate] => Self::new(callable_param(Self::NAME, predicate)?),
            [base, predicate] => Self::typed(
                base_param(Self::NAME, base)?,
                callable_param(Self::NAME, predicate)?,
            ),
            _ => return Err(wrong_arity(Self::NAME, "one or two arguments")),
        };
        Ok(ty.to_type())
    }
}

/// `String[range]`: text with a bounded length.
///
/// Unsubscripted, `String(value)` converts a value to text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Str;

impl Str {
    pub const NAME: &'static str = "String";

    pub fn new(range: impl Into<Range>) -> Result<SynthesizedType, ConfigError> {
        build(
            BaseType::Type(Type::Str),
            Constraint::Bounds(range.into().with_key(KeyFn::Length)),
            Flavor::String,
        )
    }
}

impl TypeFactory for Str {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        match params {
            [bound] => Ok(Self::new(range_param(Self::NAME, bound)?)?.to_type()),
            _ => Err(wrong_arity(Self::NAME, "exactly one argument")),
        }
    }

    fn instantiate(&self, args: &[Value]) -> Result<Value, Error> {
        match args {
            [] => Ok(Value::string("")),
            [value] => Ok(Value::string(value.to_str())),
            _ => Err(too_many_positional(Self::NAME, 1, args.len()).into()),
        }
    }
}

/// `String[1:]`.
pub fn non_empty_string() -> SynthesizedType {
    assemble(
        BaseType::Type(Type::Str),
        Constraint::Bounds(Range::at_least(1).with_key(KeyFn::Length)),
        Flavor::String,
    )
}
