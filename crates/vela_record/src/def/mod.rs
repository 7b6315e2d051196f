//! Record definitions.
//!
//! A `RecordDef` collects the declarations of a record class and turns them
//! into a `RecordClass` in four stages:
//!
//! ```text
//! CollectAnnotations -> ClassifyFields -> SynthesizeAccessors -> Finalize
//! ```
//!
//! - **CollectAnnotations** resolves declared types (textual ones through a
//!   `Namespace`) and merges them with the parent's fields.
//! - **ClassifyFields** decides which annotated names become managed fields.
//!   A name is managed unless it starts with `_`, is all uppercase, has a
//!   `__name` attribute next to it, or is also a method.
//! - **SynthesizeAccessors** fixes each field's declared type (a `None`
//!   default widens it to `Optional`), validates its default under the
//!   class policy and works out whether it is required.
//! - **Finalize** builds the class.

mod stages;

use vela_types::{ConfigError, Namespace, Type};
use vela_value::{Callable, Value};

use crate::class::{Instancing, Policy, RecordClass};

/// A declared field type.
#[derive(Clone, Debug)]
pub enum Annotation {
    Type(Type),
    /// A type expression resolved when the record is defined.
    Expr(String),
}

impl From<Type> for Annotation {
    fn from(ty: Type) -> Self {
        Annotation::Type(ty)
    }
}

impl From<&str> for Annotation {
    fn from(expr: &str) -> Self {
        Annotation::Expr(expr.to_string())
    }
}

impl From<RecordClass> for Annotation {
    fn from(class: RecordClass) -> Self {
        Annotation::Type(class.to_type())
    }
}

/// Builder for a record class.
#[derive(Clone, Debug)]
pub struct RecordDef {
    pub(crate) name: String,
    pub(crate) module: Option<String>,
    pub(crate) policy: Policy,
    pub(crate) comparable: bool,
    pub(crate) parent: Option<RecordClass>,
    pub(crate) instancing: Instancing,
    /// Annotated names in declaration order.
    pub(crate) annotations: Vec<(String, Annotation)>,
    /// Values assigned in the class body, annotated or not.
    pub(crate) attributes: Vec<(String, Value)>,
    pub(crate) methods: Vec<(String, Callable)>,
}

impl RecordDef {
    pub fn new(name: &str, policy: Policy) -> Self {
        RecordDef {
            name: name.to_string(),
            module: None,
            policy,
            comparable: false,
            parent: None,
            instancing: Instancing::Fresh,
            annotations: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Fields only accept values that are already of their type.
    pub fn strict(name: &str) -> Self {
        Self::new(name, Policy::Strict)
    }

    /// Fields convert what they are given.
    pub fn coercing(name: &str) -> Self {
        Self::new(name, Policy::Coercing)
    }

    /// A subclass of `parent`, sharing its policy, comparison opt-in and
    /// instancing. A singleton subclass keeps its own instance.
    pub fn extending(name: &str, parent: &RecordClass) -> Self {
        let mut def = Self::new(name, parent.policy());
        def.comparable = parent.is_comparable();
        def.instancing = parent.instancing();
        def.module = parent.0.module.clone();
        def.parent = Some(parent.clone());
        def
    }

    /// Qualify the class name with a module.
    #[must_use]
    pub fn module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }

    /// Opt in to field-wise equality, ordering and hashing.
    #[must_use]
    pub fn comparable(mut self) -> Self {
        self.comparable = true;
        self
    }

    /// Choose whether calling the class makes new records or hands out a
    /// single shared one.
    #[must_use]
    pub fn instancing(mut self, instancing: Instancing) -> Self {
        self.instancing = instancing;
        self
    }

    /// Declare a field without a default.
    #[must_use]
    pub fn field(mut self, name: &str, annotation: impl Into<Annotation>) -> Self {
        let annotation = annotation.into();
        match self.annotations.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = annotation,
            None => self.annotations.push((name.to_string(), annotation)),
        }
        self
    }

    /// Declare a field with a default value.
    #[must_use]
    pub fn field_with_default(
        self,
        name: &str,
        annotation: impl Into<Annotation>,
        default: impl Into<Value>,
    ) -> Self {
        self.field(name, annotation).attribute(name, default)
    }

    /// Assign a class attribute.
    #[must_use]
    pub fn attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
        self
    }

    /// Attach a method, called with the record as its argument.
    #[must_use]
    pub fn method(mut self, name: &str, func: Callable) -> Self {
        self.methods.retain(|(n, _)| n != name);
        self.methods.push((name.to_string(), func));
        self
    }

    /// Resolved field annotations in declaration order, inherited ones
    /// first, before classification.
    pub fn field_annotations(
        &self,
        namespace: &Namespace,
    ) -> Result<Vec<(String, Type)>, ConfigError> {
        let collected = stages::collect_annotations(self, namespace)?;
        Ok(collected.into_iter().map(|d| (d.name, d.ty)).collect())
    }

    /// Define the class, resolving textual annotations against the builtins.
    pub fn define(self) -> Result<RecordClass, ConfigError> {
        self.define_with(&Namespace::new())
    }

    /// Define the class, resolving textual annotations in `namespace`.
    #[tracing::instrument(level = "debug", skip_all, fields(record = %self.name))]
    pub fn define_with(self, namespace: &Namespace) -> Result<RecordClass, ConfigError> {
        let collected = stages::collect_annotations(&self, namespace)?;
        let classified = stages::classify_fields(&self, collected);
        let fields = stages::synthesize_accessors(&self, classified.managed)?;
        Ok(stages::finalize(self, fields, classified.attributes))
    }

    /// Define the class and register it in `namespace` under its
    /// qualified name.
    pub fn define_in(self, namespace: &mut Namespace) -> Result<RecordClass, ConfigError> {
        let class = self.define_with(namespace)?;
        namespace.define_type(&class.qualified_name(), class.to_type());
        Ok(class)
    }
}
