//! The type synthesis engine.
//!
//! `synthesize` turns a base type and a constraint into a new runtime type.
//! Building a value of that type runs three steps:
//!
//! 1. Lenient conversion into the base type. A failed conversion falls back
//!    to the raw value; nothing is rejected at this step.
//! 2. The key function is applied to the converted value.
//! 3. The key result is compared against the bounds, or, for predicate
//!    types, the predicate result is tested for truthiness.
//!
//! The instance check runs the same comparisons without converting, so it
//! agrees with construction and never changes the value it inspects.
//!
//! Every call produces a fresh type; identical parameters never share one.

mod naming;

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use vela_types::{
    above_maximum, below_minimum, coerce, is_instance, predicate_failed, BoundSubject,
    ConfigError, Type, TypeObject, ValidationError,
};
use vela_value::{Callable, Value};

use crate::range::{KeyFn, Range};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// What values are converted into before they are checked.
#[derive(Clone, Debug)]
pub enum BaseType {
    /// No conversion; every value is a member.
    Any,
    Type(Type),
    /// A conversion function. Membership means the function maps the value
    /// to itself.
    Converter(Callable),
}

impl BaseType {
    /// Name used inside generated type names.
    pub fn name(&self) -> String {
        match self {
            BaseType::Any => "Any".to_string(),
            BaseType::Type(ty) => ty.to_string(),
            BaseType::Converter(func) => func.full_name(),
        }
    }

    fn convert(&self, raw: &Value) -> Value {
        let converted = match self {
            BaseType::Any => return raw.clone(),
            BaseType::Type(ty) => coerce(ty, raw).map_err(|e| e.message),
            BaseType::Converter(func) => func.call(raw).map_err(|e| e.message),
        };
        converted.unwrap_or_else(|error| {
            tracing::trace!(base = %self.name(), %error, "conversion failed, keeping raw value");
            raw.clone()
        })
    }

    fn contains(&self, value: &Value) -> bool {
        match self {
            BaseType::Any => true,
            BaseType::Type(ty) => is_instance(value, ty),
            BaseType::Converter(func) => func.call(value).is_ok_and(|v| v == *value),
        }
    }
}

impl From<Type> for BaseType {
    fn from(ty: Type) -> Self {
        if matches!(ty, Type::Any) {
            BaseType::Any
        } else {
            BaseType::Type(ty)
        }
    }
}

impl From<Callable> for BaseType {
    fn from(func: Callable) -> Self {
        BaseType::Converter(func)
    }
}

/// What a converted value must satisfy.
#[derive(Clone, Debug)]
pub enum Constraint {
    Bounds(Range),
    /// The predicate's result must be truthy.
    Predicate(Callable),
}

impl From<Range> for Constraint {
    fn from(range: Range) -> Self {
        Constraint::Bounds(range)
    }
}

impl From<Callable> for Constraint {
    fn from(predicate: Callable) -> Self {
        Constraint::Predicate(predicate)
    }
}

/// Which factory a type came from. Only affects its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    Bounded,
    Length,
    Valid,
    String,
}

/// Create a type from a base and a constraint.
///
/// Bounds produce a `Bounded[...]` type and predicates a `Valid[...]` type.
#[tracing::instrument(level = "debug", skip_all)]
pub fn synthesize(
    base: impl Into<BaseType>,
    constraint: impl Into<Constraint>,
) -> Result<SynthesizedType, ConfigError> {
    let constraint = constraint.into();
    let flavor = match constraint {
        Constraint::Bounds(_) => Flavor::Bounded,
        Constraint::Predicate(_) => Flavor::Valid,
    };
    build(base.into(), constraint, flavor)
}

pub(crate) fn build(
    base: BaseType,
    constraint: Constraint,
    flavor: Flavor,
) -> Result<SynthesizedType, ConfigError> {
    if let Constraint::Bounds(range) = &constraint {
        range.validate()?;
    }
    Ok(assemble(base, constraint, flavor))
}

/// `build` for constraints already known to be valid.
pub(crate) fn assemble(base: BaseType, constraint: Constraint, flavor: Flavor) -> SynthesizedType {
    let name = naming::display_name(flavor, &base, &constraint);
    SynthesizedType::from_def(TypeDef {
        id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        base,
        constraint,
        flavor,
        name,
    })
}

struct TypeDef {
    id: u64,
    base: BaseType,
    constraint: Constraint,
    flavor: Flavor,
    name: String,
}

impl TypeDef {
    fn construct(&self, raw: &Value) -> Result<Value, ValidationError> {
        let instance = self.base.convert(raw);
        self.check(raw, &instance)?;
        tracing::trace!(ty = %self.name, value = %instance.repr(), "constructed");
        Ok(instance)
    }

    /// Test `instance` against the constraint. `raw` is what the caller
    /// passed in and is only used for messages.
    fn check(&self, raw: &Value, instance: &Value) -> Result<(), ValidationError> {
        match &self.constraint {
            Constraint::Bounds(range) => {
                let cmp = range.key.apply(instance)?;
                let subject = || match range.key.full_name() {
                    None => BoundSubject::Value { value: raw.repr() },
                    Some(key) => BoundSubject::Keyed {
                        key,
                        value: raw.repr(),
                        result: cmp.repr(),
                    },
                };
                if let Some(lower) = &range.lower {
                    if cmp.lt(lower)? {
                        return Err(below_minimum(subject(), &lower.to_str()));
                    }
                }
                if let Some(upper) = &range.upper {
                    if cmp.gt(upper)? {
                        return Err(above_maximum(subject(), &upper.to_str()));
                    }
                }
                Ok(())
            }
            Constraint::Predicate(predicate) => {
                if predicate.call(instance)?.is_truthy() {
                    Ok(())
                } else {
                    Err(predicate_failed(&predicate.full_name(), &instance.repr()))
                }
            }
        }
    }

    fn is_instance(&self, value: &Value) -> bool {
        self.base.contains(value) && self.check(value, value).is_ok()
    }
}

impl TypeObject for TypeDef {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_instance(&self, value: &Value) -> bool {
        TypeDef::is_instance(self, value)
    }

    fn construct(&self, value: &Value) -> Result<Value, ValidationError> {
        TypeDef::construct(self, value)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A type produced by `synthesize` or one of the factories.
///
/// Cheap to clone; clones are the same type.
#[derive(Clone)]
pub struct SynthesizedType(Arc<TypeDef>);

impl SynthesizedType {
    fn from_def(def: TypeDef) -> Self {
        tracing::debug!(id = def.id, name = %def.name, "synthesized type");
        SynthesizedType(Arc::new(def))
    }

    /// Recover the synthesized type behind a `Type::Object`.
    pub fn from_type(ty: &Type) -> Option<Self> {
        ty.downcast_object::<TypeDef>().map(SynthesizedType)
    }

    /// Convert `value` and check it, returning the converted value.
    pub fn construct(&self, value: &Value) -> Result<Value, ValidationError> {
        self.0.construct(value)
    }

    /// Check `value` as is, reporting why it is rejected.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        self.0.check(value, value)
    }

    /// Whether `value` already belongs to this type. Never fails.
    pub fn is_instance(&self, value: &Value) -> bool {
        self.0.is_instance(value)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn base(&self) -> &BaseType {
        &self.0.base
    }

    pub fn constraint(&self) -> &Constraint {
        &self.0.constraint
    }

    pub fn flavor(&self) -> Flavor {
        self.0.flavor
    }

    /// Full name of the key function, or of the predicate for predicate
    /// types. `None` when values are compared directly.
    pub fn key_function_name(&self) -> Option<String> {
        match &self.0.constraint {
            Constraint::Bounds(range) => range.key.full_name(),
            Constraint::Predicate(predicate) => Some(predicate.full_name()),
        }
    }

    pub fn range(&self) -> Option<&Range> {
        match &self.0.constraint {
            Constraint::Bounds(range) => Some(range),
            Constraint::Predicate(_) => None,
        }
    }

    pub fn is_length_derived(&self) -> bool {
        self.range().is_some_and(|r| matches!(r.key, KeyFn::Length))
    }

    pub fn is_predicate_only(&self) -> bool {
        matches!(self.0.constraint, Constraint::Predicate(_))
    }

    /// A copy of this type with a fixed display name.
    #[must_use]
    pub fn renamed(&self, name: &str) -> Self {
        Self::from_def(TypeDef {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            base: self.0.base.clone(),
            constraint: self.0.constraint.clone(),
            flavor: self.0.flavor,
            name: name.to_string(),
        })
    }

    /// This type as a member of the type model.
    pub fn to_type(&self) -> Type {
        Type::Object(Arc::clone(&self.0) as Arc<dyn TypeObject>)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<SynthesizedType> for Type {
    fn from(ty: SynthesizedType) -> Self {
        ty.to_type()
    }
}

impl fmt::Display for SynthesizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl fmt::Debug for SynthesizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<type {} #{}>", self.0.name, self.0.id)
    }
}
