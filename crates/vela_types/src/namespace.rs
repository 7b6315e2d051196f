//! Symbol table for resolving type expressions.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use vela_value::{builtins, Callable};

use crate::errors::ConfigError;
use crate::factory::TypeFactory;
use crate::generics::Generic;
use crate::resolve;
use crate::ty::Type;

/// What a name refers to.
#[derive(Clone, Debug)]
pub enum Symbol {
    Type(Type),
    Callable(Callable),
    Factory(Arc<dyn TypeFactory>),
}

/// Names visible to type expressions.
///
/// `Namespace::new()` starts with the builtin types, the generic aliases and
/// the builtin callables. Later definitions replace earlier ones.
#[derive(Clone, Debug)]
pub struct Namespace {
    symbols: FxHashMap<String, Symbol>,
}

impl Namespace {
    /// A namespace with no symbols at all.
    pub fn empty() -> Self {
        Namespace {
            symbols: FxHashMap::default(),
        }
    }

    /// A namespace with the builtins registered.
    pub fn new() -> Self {
        let mut ns = Self::empty();
        for (name, ty) in [
            ("Any", Type::Any),
            ("None", Type::NoneType),
            ("NoneType", Type::NoneType),
            ("bool", Type::Bool),
            ("int", Type::Int),
            ("float", Type::Float),
            ("str", Type::Str),
            ("bytes", Type::Bytes),
            ("list", Type::list(Type::Any)),
            ("tuple", Type::tuple_of(Type::Any)),
            ("dict", Type::map(Type::Any, Type::Any)),
        ] {
            ns.define_type(name, ty);
        }
        for generic in Generic::ALL {
            ns.define_factory(generic);
        }
        for func in builtins::callables() {
            ns.define_callable(func);
        }
        ns
    }

    pub fn define_type(&mut self, name: &str, ty: Type) {
        self.symbols.insert(name.to_string(), Symbol::Type(ty));
    }

    /// Register a callable under its full name (`len`, `my.module.pred`).
    pub fn define_callable(&mut self, func: Callable) {
        self.symbols.insert(func.full_name(), Symbol::Callable(func));
    }

    pub fn define_factory(&mut self, factory: impl TypeFactory) {
        let name = factory.name().to_string();
        self.symbols.insert(name, Symbol::Factory(Arc::new(factory)));
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Look up a factory by name.
    pub fn factory(&self, name: &str) -> Option<&Arc<dyn TypeFactory>> {
        match self.symbols.get(name) {
            Some(Symbol::Factory(factory)) => Some(factory),
            _ => None,
        }
    }

    /// Resolve a textual type expression.
    pub fn resolve(&self, expression: &str) -> Result<Type, ConfigError> {
        resolve::resolve(expression, self)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}
