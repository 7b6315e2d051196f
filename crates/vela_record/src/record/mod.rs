//! Record instances.
//!
//! Field values live in per-instance slots behind a lock and are reached
//! only through `get` and `set`, which apply the class's policy. Records
//! travel through the value model as `Value::Object`.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use vela_types::{
    coerce, is_instance, missing_arguments, multiple_values, not_comparable, too_many_positional,
    unexpected_keyword, unknown_attribute, unset_attribute, wrong_type, Error, ValidationError,
};
use vela_value::{compare_sequences, unorderable, Object, Value, ValueError};

use crate::args::Args;
use crate::class::{Policy, RecordClass};

type Slots = SmallVec<[Option<Value>; 8]>;

struct Instance {
    class: RecordClass,
    slots: RwLock<Slots>,
}

/// A record instance. Cheap to clone; clones share field storage.
#[derive(Clone)]
pub struct Record(Arc<Instance>);

/// Run the generated constructor of `class`.
pub(crate) fn construct(class: &RecordClass, args: Args) -> Result<Record, Error> {
    let slots = bind(class, args)?;
    let record = Record(Arc::new(Instance {
        class: class.clone(),
        slots: RwLock::new(slots),
    }));
    tracing::trace!(record = %class.name(), "constructed");
    Ok(record)
}

/// Match constructor arguments to fields and convert them.
///
/// Fields left out take their defaults.
fn bind(class: &RecordClass, args: Args) -> Result<Slots, Error> {
    let function = class.name();
    let fields = class.fields();
    if args.positional.len() > fields.len() {
        return Err(too_many_positional(function, fields.len(), args.positional.len()).into());
    }

    let mut supplied: Slots = fields.iter().map(|_| None).collect();
    for (name, value) in args.keywords {
        let Some(i) = class.field_index(&name) else {
            return Err(unexpected_keyword(function, &name).into());
        };
        if supplied[i].is_some() {
            return Err(multiple_values(function, &name).into());
        }
        supplied[i] = Some(value);
    }
    for (i, value) in args.positional.into_iter().enumerate() {
        if supplied[i].is_some() {
            return Err(multiple_values(function, &fields[i].name).into());
        }
        supplied[i] = Some(value);
    }

    let missing: Vec<String> = fields
        .iter()
        .zip(&supplied)
        .filter(|(field, value)| field.is_required() && value.is_none())
        .map(|(field, _)| field.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(missing_arguments(function, missing).into());
    }

    let mut slots: Slots = fields.iter().map(|f| f.default.clone()).collect();
    for (i, value) in supplied.into_iter().enumerate() {
        if let Some(value) = value {
            slots[i] = Some(convert(class, i, value)?);
        }
    }
    Ok(slots)
}

/// Apply the class policy to a value bound for field `index`.
fn convert(class: &RecordClass, index: usize, value: Value) -> Result<Value, ValidationError> {
    let field = &class.fields()[index];
    match class.policy() {
        Policy::Strict if is_instance(&value, &field.declared) => Ok(value),
        Policy::Strict => Err(wrong_type(value.type_name(), &field.declared.to_string())),
        Policy::Coercing => coerce(&field.declared, &value),
    }
}

impl Record {
    pub fn class(&self) -> &RecordClass {
        &self.0.class
    }

    /// Recover a record from its value form.
    pub fn from_value(value: &Value) -> Option<Record> {
        value.as_object()?.as_any().downcast_ref::<Record>().cloned()
    }

    pub fn to_value(&self) -> Value {
        Value::object(self.clone())
    }

    /// Read a field or class attribute.
    pub fn get(&self, name: &str) -> Result<Value, ValidationError> {
        let class = self.class();
        if let Some(i) = class.field_index(name) {
            let declared = &class.fields()[i].declared;
            return self.0.slots.read()[i]
                .clone()
                .ok_or_else(|| unset_attribute(&declared.to_string(), name));
        }
        class
            .attribute(name)
            .cloned()
            .ok_or_else(|| unknown_attribute(class.name(), name))
    }

    /// Assign a field through the class's policy.
    ///
    /// On failure the previous value is kept.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), ValidationError> {
        match self.class().field_index(name) {
            Some(i) => self.assign(i, value.into()),
            None => Err(unknown_attribute(self.class().name(), name)),
        }
    }

    fn assign(&self, index: usize, value: Value) -> Result<(), ValidationError> {
        let stored = convert(self.class(), index, value)?;
        let field = &self.class().fields()[index];
        tracing::trace!(record = %self.class().name(), field = %field.name, "assigned");
        self.0.slots.write()[index] = Some(stored);
        Ok(())
    }

    /// Run the constructor again on this instance.
    ///
    /// Every field is rebound from `args` and the defaults. On failure no
    /// field changes.
    pub(crate) fn reinitialize(&self, args: Args) -> Result<(), Error> {
        let slots = bind(self.class(), args)?;
        *self.0.slots.write() = slots;
        tracing::trace!(record = %self.class().name(), "reinitialized");
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.class()
            .field_index(name)
            .is_some_and(|i| self.0.slots.read()[i].is_some())
    }

    /// Field values in declaration order; `None` for unset fields.
    pub fn values(&self) -> Vec<Option<Value>> {
        self.0.slots.read().iter().cloned().collect()
    }

    /// Field values as used for comparison and hashing. Unset fields count
    /// as `None`.
    fn key(&self) -> Vec<Value> {
        self.0
            .slots
            .read()
            .iter()
            .map(|slot| slot.clone().unwrap_or(Value::None))
            .collect()
    }

    /// Call a method defined on the class with this record as argument.
    pub fn invoke(&self, method: &str) -> Result<Value, ValidationError> {
        let class = self.class();
        let func = class
            .method(method)
            .ok_or_else(|| unknown_attribute(class.name(), method))?;
        Ok(func.call(&self.to_value())?)
    }

    /// Order two records by their field values.
    ///
    /// Only instances of the same comparable class can be ordered.
    pub fn try_cmp(&self, other: &Record) -> Result<Option<Ordering>, ValidationError> {
        if !self.same_comparable_class(other) {
            return Err(not_comparable(self.class().name(), other.class().name()));
        }
        Ok(compare_sequences(&self.key(), &other.key(), "<")?)
    }

    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn same_comparable_class(&self, other: &Record) -> bool {
        self.class().is_comparable() && self.class().ptr_eq(other.class())
    }

    /// `Name(a=1, b='x')`, with `<unset>` for unassigned fields.
    pub fn repr(&self) -> String {
        let slots = self.0.slots.read();
        let fields: Vec<String> = self
            .class()
            .fields()
            .iter()
            .zip(slots.iter())
            .map(|(field, slot)| match slot {
                Some(value) => format!("{}={}", field.name, value.repr()),
                None => format!("{}=<unset>", field.name),
            })
            .collect();
        format!("{}({})", self.class().name(), fields.join(", "))
    }
}

impl Object for Record {
    fn class_name(&self) -> &str {
        self.class().name()
    }

    fn repr(&self) -> String {
        Record::repr(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        match other.as_any().downcast_ref::<Record>() {
            Some(other) if self.same_comparable_class(other) => self.key() == other.key(),
            Some(other) => self.ptr_eq(other),
            None => false,
        }
    }

    fn hash_object(&self) -> u64 {
        if self.class().is_comparable() {
            let mut hasher = FxHasher::default();
            self.key().hash(&mut hasher);
            hasher.finish()
        } else {
            Arc::as_ptr(&self.0) as usize as u64
        }
    }

    fn cmp_object(
        &self,
        other: &dyn Object,
        op: &'static str,
    ) -> Result<Option<Ordering>, ValueError> {
        match other.as_any().downcast_ref::<Record>() {
            Some(other) if self.same_comparable_class(other) => {
                compare_sequences(&self.key(), &other.key(), op)
            }
            _ => Err(unorderable(op, self.class_name(), other.class_name())),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_object().hash(state);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Record::repr(self))
    }
}
