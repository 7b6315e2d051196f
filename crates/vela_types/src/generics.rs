//! Builtin generic aliases: `List`, `Tuple`, `Dict`, `Optional`, `Union`.
//!
//! Unsubscripted, `List`, `Tuple` and `Dict` mean their `Any`-parameterized
//! forms; `Optional` and `Union` need arguments.

use crate::errors::{invalid_parameter, wrong_arity, ConfigError};
use crate::factory::{Param, TypeFactory};
use crate::ty::Type;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generic {
    List,
    Tuple,
    Dict,
    Optional,
    Union,
}

impl Generic {
    pub const ALL: [Generic; 5] = [
        Generic::List,
        Generic::Tuple,
        Generic::Dict,
        Generic::Optional,
        Generic::Union,
    ];
}

fn type_param(factory: &str, param: &Param) -> Result<Type, ConfigError> {
    match param {
        Param::Type(ty) => Ok(ty.clone()),
        other => Err(invalid_parameter(factory, "a type", &other.describe())),
    }
}

impl TypeFactory for Generic {
    fn name(&self) -> &str {
        match self {
            Generic::List => "List",
            Generic::Tuple => "Tuple",
            Generic::Dict => "Dict",
            Generic::Optional => "Optional",
            Generic::Union => "Union",
        }
    }

    fn parameterize(&self, params: &[Param]) -> Result<Type, ConfigError> {
        let name = self.name();
        match (self, params) {
            (Generic::List, []) => Ok(Type::list(Type::Any)),
            (Generic::List, [elem]) => Ok(Type::list(type_param(name, elem)?)),
            (Generic::List, _) => Err(wrong_arity(name, "exactly one argument")),

            (Generic::Tuple, []) => Ok(Type::tuple_of(Type::Any)),
            (Generic::Tuple, [Param::Unit]) => Ok(Type::Tuple(Vec::new())),
            (Generic::Tuple, [elem, Param::Ellipsis]) => {
                Ok(Type::tuple_of(type_param(name, elem)?))
            }
            (Generic::Tuple, items) => items
                .iter()
                .map(|p| type_param(name, p))
                .collect::<Result<Vec<_>, _>>()
                .map(Type::Tuple),

            (Generic::Dict, []) => Ok(Type::map(Type::Any, Type::Any)),
            (Generic::Dict, [key, value]) => Ok(Type::map(
                type_param(name, key)?,
                type_param(name, value)?,
            )),
            (Generic::Dict, _) => Err(wrong_arity(name, "exactly two arguments")),

            (Generic::Optional, [inner]) => Ok(Type::optional(type_param(name, inner)?)),
            (Generic::Optional, _) => Err(wrong_arity(name, "exactly one argument")),

            (Generic::Union, []) => Err(wrong_arity(name, "at least one argument")),
            (Generic::Union, members) => Ok(Type::union(
                members
                    .iter()
                    .map(|p| type_param(name, p))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        }
    }
}
