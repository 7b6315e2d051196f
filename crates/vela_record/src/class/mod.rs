//! Record classes.
//!
//! A `RecordClass` is the finished product of a `RecordDef`: the ordered
//! managed fields with their declared types, the validation policy, the
//! comparison opt-in, and whatever class-level attributes and methods the
//! definition carried. It is also a runtime type, so record classes can be
//! used as field types of other records.

mod flags;

pub use flags::FieldFlags;

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use vela_types::{cannot_convert, Error, Type, TypeObject, ValidationError};
use vela_value::{Callable, Value};

use crate::args::Args;
use crate::record::Record;

/// How a record treats values assigned to its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Reject values that are not already instances of the declared type.
    Strict,
    /// Convert values into the declared type.
    Coercing,
}

/// How many instances calling a record class produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Instancing {
    /// Every call constructs a new record.
    #[default]
    Fresh,
    /// The first call constructs the record; later calls return it and
    /// ignore their arguments.
    Singleton,
    /// Like `Singleton`, but later calls run the constructor again on the
    /// existing record with their arguments.
    IdempotentSingleton,
}

/// A managed field.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: String,
    /// Type enforced on assignment, after `None`-default widening.
    pub declared: Type,
    /// Default after validation against `declared`.
    pub default: Option<Value>,
    pub flags: FieldFlags,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    pub fn has_default(&self) -> bool {
        self.flags.contains(FieldFlags::HAS_DEFAULT)
    }
}

pub(crate) struct ClassDef {
    pub(crate) name: String,
    pub(crate) module: Option<String>,
    pub(crate) policy: Policy,
    pub(crate) comparable: bool,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) index: FxHashMap<String, usize>,
    pub(crate) attributes: FxHashMap<String, Value>,
    pub(crate) methods: FxHashMap<String, Callable>,
    pub(crate) parent: Option<RecordClass>,
    pub(crate) instancing: Instancing,
    /// The one instance of a singleton class, once constructed. The class
    /// and its instance keep each other alive.
    pub(crate) instance: Mutex<Option<Record>>,
    /// Back-reference to the owning allocation.
    pub(crate) this: Weak<ClassDef>,
}

impl ClassDef {
    fn handle(&self) -> Option<RecordClass> {
        self.this.upgrade().map(RecordClass)
    }

    fn qualified_name(&self) -> String {
        match &self.module {
            Some(module) => format!("{module}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl TypeObject for ClassDef {
    fn name(&self) -> String {
        self.qualified_name()
    }

    fn is_instance(&self, value: &Value) -> bool {
        Record::from_value(value)
            .is_some_and(|record| record.class().lineage().any(|c| std::ptr::eq(&*c.0, self)))
    }

    fn construct(&self, value: &Value) -> Result<Value, ValidationError> {
        if self.is_instance(value) {
            return Ok(value.clone());
        }
        let Some(entries) = value.as_entries() else {
            return Err(cannot_convert(&value.repr(), &self.qualified_name()));
        };
        let mut args = Args::new();
        for (key, item) in entries {
            match key.as_str() {
                Some(name) => args = args.kwarg(name, item.clone()),
                None => return Err(cannot_convert(&value.repr(), &self.qualified_name())),
            }
        }
        let Some(class) = self.handle() else {
            return Err(cannot_convert(&value.repr(), &self.qualified_name()));
        };
        match class.call(args) {
            Ok(record) => Ok(record.to_value()),
            Err(Error::Validation(err)) => Err(err),
            Err(Error::Config(_)) => Err(cannot_convert(&value.repr(), &self.qualified_name())),
        }
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A defined record type. Cheap to clone; clones are the same class.
#[derive(Clone)]
pub struct RecordClass(pub(crate) Arc<ClassDef>);

impl RecordClass {
    /// Recover the record class behind a `Type::Object`.
    pub fn from_type(ty: &Type) -> Option<Self> {
        ty.downcast_object::<ClassDef>().map(RecordClass)
    }

    /// Bare class name, as used in reprs and constructor errors.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// `module.Name`, or the bare name without a module.
    pub fn qualified_name(&self) -> String {
        self.0.qualified_name()
    }

    pub fn policy(&self) -> Policy {
        self.0.policy
    }

    pub fn is_comparable(&self) -> bool {
        self.0.comparable
    }

    pub fn parent(&self) -> Option<&RecordClass> {
        self.0.parent.as_ref()
    }

    /// Managed fields in declaration order, inherited ones first.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.0.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.0.index.get(name).map(|&i| &self.0.fields[i])
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.0.index.get(name).copied()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.fields.iter().map(|f| f.name.as_str())
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.0
            .fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
    }

    /// Class-level attribute, including inherited ones.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.attributes.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&Callable> {
        self.0.methods.get(name)
    }

    /// This class followed by its ancestors.
    pub fn lineage(&self) -> impl Iterator<Item = &RecordClass> {
        std::iter::successors(Some(self), |c| c.parent())
    }

    pub fn is_subclass_of(&self, other: &RecordClass) -> bool {
        self.lineage().any(|c| c.ptr_eq(other))
    }

    pub fn instancing(&self) -> Instancing {
        self.0.instancing
    }

    /// The instance of a singleton class, if it has been constructed.
    pub fn instance(&self) -> Option<Record> {
        self.0.instance.lock().clone()
    }

    /// Construct an instance, or hand out the existing one of a singleton
    /// class.
    pub fn call(&self, args: Args) -> Result<Record, Error> {
        if self.0.instancing == Instancing::Fresh {
            return crate::record::construct(self, args);
        }
        let existing = self.0.instance.lock().clone();
        if let Some(record) = existing {
            if self.0.instancing == Instancing::IdempotentSingleton {
                record.reinitialize(args)?;
            }
            return Ok(record);
        }
        // Built without the lock held, so field conversions may call back
        // into this class. The first instance stored wins.
        let record = crate::record::construct(self, args)?;
        let mut slot = self.0.instance.lock();
        if slot.is_none() {
            tracing::debug!(record = %self.name(), "singleton instance created");
        }
        Ok(slot.get_or_insert(record).clone())
    }

    /// This class as a member of the type model.
    pub fn to_type(&self) -> Type {
        Type::Object(Arc::clone(&self.0) as Arc<dyn TypeObject>)
    }

    pub fn ptr_eq(&self, other: &RecordClass) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<RecordClass> for Type {
    fn from(class: RecordClass) -> Self {
        class.to_type()
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

impl fmt::Debug for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<record class {}>", self.qualified_name())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
