//! The type model.
//!
//! `Type` covers the host language's primitive types, parameterized
//! containers and unions. Anything defined at runtime (synthesized
//! constrained types, record classes) enters the model as a
//! `Type::Object` wrapping a `TypeObject`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use vela_value::Value;

use crate::errors::ValidationError;

/// A type defined at runtime.
///
/// Implementors answer instance checks themselves and know how to build a
/// value of their type from an arbitrary value.
pub trait TypeObject: Send + Sync + 'static {
    /// Display name, module-qualified where applicable.
    fn name(&self) -> String;

    /// Pure membership test. Never mutates `value`.
    fn is_instance(&self, value: &Value) -> bool;

    /// Build a value of this type from `value`.
    fn construct(&self, value: &Value) -> Result<Value, ValidationError>;

    /// Upcast for downcasting back to the concrete handle.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Declared type of a value.
#[derive(Clone)]
pub enum Type {
    Any,
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    /// Homogeneous list.
    List(Box<Type>),
    /// Fixed-arity tuple, checked positionally.
    Tuple(Vec<Type>),
    /// Variable-length homogeneous tuple (`Tuple[T, ...]`).
    TupleOf(Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// Any of the members. Never nested and never a single member.
    Union(Vec<Type>),
    Object(Arc<dyn TypeObject>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn tuple_of(elem: Type) -> Self {
        Type::TupleOf(Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn object(obj: impl TypeObject) -> Self {
        Type::Object(Arc::new(obj))
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    ///
    /// A union containing `Any` is `Any`; a single distinct member is
    /// returned as-is.
    pub fn union(members: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for member in members {
            let nested = match member {
                Type::Union(inner) => inner,
                other => vec![other],
            };
            for ty in nested {
                if matches!(ty, Type::Any) {
                    return Type::Any;
                }
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
        match flat.len() {
            0 => Type::NoneType,
            1 => flat.pop().unwrap_or(Type::NoneType),
            _ => Type::Union(flat),
        }
    }

    /// `Union[ty, None]`.
    pub fn optional(ty: Type) -> Self {
        Type::union([ty, Type::NoneType])
    }

    /// Check whether the nullable sentinel is a member of this type.
    pub fn accepts_none(&self) -> bool {
        match self {
            Type::Any | Type::NoneType => true,
            Type::Union(members) => members.iter().any(Type::accepts_none),
            Type::Object(obj) => obj.is_instance(&Value::None),
            _ => false,
        }
    }

    /// The runtime type object, if this is one.
    pub fn as_object(&self) -> Option<&dyn TypeObject> {
        match self {
            Type::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    /// Downcast a runtime type object to its concrete type.
    pub fn downcast_object<T: TypeObject>(&self) -> Option<Arc<T>> {
        match self {
            Type::Object(obj) => Arc::clone(obj).into_any().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Whether this type is a plain builtin (rendered without a module).
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Type::Object(_))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Any, Type::Any)
            | (Type::NoneType, Type::NoneType)
            | (Type::Bool, Type::Bool)
            | (Type::Int, Type::Int)
            | (Type::Float, Type::Float)
            | (Type::Str, Type::Str)
            | (Type::Bytes, Type::Bytes) => true,
            (Type::List(a), Type::List(b)) | (Type::TupleOf(a), Type::TupleOf(b)) => a == b,
            (Type::Tuple(a), Type::Tuple(b)) => a == b,
            (Type::Map(ak, av), Type::Map(bk, bv)) => ak == bk && av == bv,
            (Type::Union(a), Type::Union(b)) => {
                a.len() == b.len() && a.iter().all(|t| b.contains(t))
            }
            // Runtime types are equal only to themselves.
            (Type::Object(a), Type::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("Any"),
            Type::NoneType => f.write_str("None"),
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::Str => f.write_str("str"),
            Type::Bytes => f.write_str("bytes"),
            Type::List(elem) => match **elem {
                Type::Any => f.write_str("list"),
                ref elem => write!(f, "List[{elem}]"),
            },
            Type::TupleOf(elem) => match **elem {
                Type::Any => f.write_str("tuple"),
                ref elem => write!(f, "Tuple[{elem}, ...]"),
            },
            Type::Tuple(items) if items.is_empty() => f.write_str("Tuple[()]"),
            Type::Tuple(items) => {
                f.write_str("Tuple[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Type::Map(key, value) => match (&**key, &**value) {
                (Type::Any, Type::Any) => f.write_str("dict"),
                (key, value) => write!(f, "Dict[{key}, {value}]"),
            },
            Type::Union(members) => {
                let others: Vec<Type> = members
                    .iter()
                    .filter(|t| !matches!(t, Type::NoneType))
                    .cloned()
                    .collect();
                if others.len() == 1 && others.len() < members.len() {
                    write!(f, "Optional[{}]", others[0])
                } else {
                    f.write_str("Union[")?;
                    write_joined(f, members)?;
                    f.write_str("]")
                }
            }
            Type::Object(obj) => f.write_str(&obj.name()),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
