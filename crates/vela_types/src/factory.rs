//! Parameterizable type factories.
//!
//! A factory is a name that produces a type when subscripted:
//! `Bounded[int, 1:10]`, `List[str]`. The subscript arguments arrive as a
//! list of `Param`s, whether they were written in a type expression or built
//! in code, so arity and shape errors are reported the same way for both.

use std::fmt;

use vela_value::{Callable, Value};

use crate::errors::{uninstantiable, ConfigError, Error};
use crate::ty::Type;

/// One subscript argument.
#[derive(Clone, Debug)]
pub enum Param {
    Type(Type),
    Callable(Callable),
    /// `lower:upper`; either end may be absent.
    Slice {
        lower: Option<Value>,
        upper: Option<Value>,
    },
    /// A bare literal.
    Value(Value),
    /// `...`
    Ellipsis,
    /// `()`
    Unit,
}

impl Param {
    pub fn slice(lower: Option<Value>, upper: Option<Value>) -> Self {
        Param::Slice { lower, upper }
    }

    /// Short description used in parameter-shape errors.
    pub fn describe(&self) -> String {
        match self {
            Param::Type(ty) => format!("type {ty}"),
            Param::Callable(func) => format!("function {}", func.full_name()),
            Param::Slice { .. } => "a slice".to_string(),
            Param::Value(v) => format!("value {}", v.repr()),
            Param::Ellipsis => "...".to_string(),
            Param::Unit => "()".to_string(),
        }
    }
}

impl From<Type> for Param {
    fn from(ty: Type) -> Self {
        Param::Type(ty)
    }
}

impl From<Callable> for Param {
    fn from(func: Callable) -> Self {
        Param::Callable(func)
    }
}

/// A named type constructor registered in a `Namespace`.
pub trait TypeFactory: Send + Sync + 'static {
    /// Name used in expressions and messages.
    fn name(&self) -> &str;

    /// Build a type from subscript arguments.
    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError>;

    /// Call the unsubscripted factory with positional arguments.
    ///
    /// Factories are uninstantiable unless they say otherwise.
    fn instantiate(&self, _args: &[Value]) -> Result<Value, Error> {
        Err(uninstantiable(self.name()).into())
    }
}

impl fmt::Debug for dyn TypeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<factory {}>", self.name())
    }
}
