//! The definition stages.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use vela_types::{coerce, invalid_field, is_instance, ConfigError, Namespace, Type};
use vela_value::Value;

use super::{Annotation, RecordDef};
use crate::class::{ClassDef, FieldFlags, FieldSpec, Policy, RecordClass};

/// An annotated name with everything known about it before classification.
pub(super) struct Declared {
    pub(super) name: String,
    pub(super) ty: Type,
    default: Option<Value>,
    inherited: bool,
}

pub(super) struct Classified {
    pub(super) managed: Vec<Declared>,
    pub(super) attributes: FxHashMap<String, Value>,
}

fn default_of<'a>(def: &'a RecordDef, name: &str) -> Option<&'a Value> {
    def.attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
}

/// Resolve the annotations and merge them with the inherited fields.
///
/// A redeclared field keeps the parent's position and takes the new type.
pub(super) fn collect_annotations(
    def: &RecordDef,
    namespace: &Namespace,
) -> Result<Vec<Declared>, ConfigError> {
    let mut declared: Vec<Declared> = def
        .parent
        .iter()
        .flat_map(RecordClass::fields)
        .map(|field| Declared {
            name: field.name.clone(),
            ty: field.declared.clone(),
            default: default_of(def, &field.name)
                .cloned()
                .or_else(|| field.default.clone()),
            inherited: true,
        })
        .collect();

    for (name, annotation) in &def.annotations {
        let ty = match annotation {
            Annotation::Type(ty) => ty.clone(),
            Annotation::Expr(expr) => namespace
                .resolve(expr)
                .map_err(|err| invalid_field(&def.name, name, &err.message))?,
        };
        let own_default = default_of(def, name).cloned();
        match declared.iter_mut().find(|d| d.name == *name) {
            Some(existing) => {
                existing.ty = ty;
                existing.default = own_default.or(existing.default.take());
                existing.inherited = false;
            }
            None => declared.push(Declared {
                name: name.clone(),
                ty,
                default: own_default,
                inherited: false,
            }),
        }
    }
    tracing::debug!(stage = "CollectAnnotations", count = declared.len());
    Ok(declared)
}

/// Python-style `isupper`: at least one cased character, none lowercase.
fn is_constant_name(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// Split annotated names into managed fields and class attributes.
pub(super) fn classify_fields(def: &RecordDef, collected: Vec<Declared>) -> Classified {
    let names: FxHashSet<&str> = def
        .annotations
        .iter()
        .map(|(n, _)| n.as_str())
        .chain(def.attributes.iter().map(|(n, _)| n.as_str()))
        .chain(def.methods.iter().map(|(n, _)| n.as_str()))
        .collect();
    let is_method = |name: &str| def.methods.iter().any(|(n, _)| n == name);
    let is_manageable = |name: &str| {
        !name.starts_with('_')
            && !is_constant_name(name)
            && !names.contains(format!("__{name}").as_str())
            && !is_method(name)
    };

    let mut attributes: FxHashMap<String, Value> = def
        .parent
        .as_ref()
        .map(|parent| parent.0.attributes.clone())
        .unwrap_or_default();
    let mut managed = Vec::with_capacity(collected.len());
    for item in collected {
        if item.inherited || is_manageable(&item.name) {
            managed.push(item);
        } else {
            tracing::trace!(name = %item.name, "annotated name left unmanaged");
        }
    }
    for (name, value) in &def.attributes {
        if !managed.iter().any(|d| d.name == *name) {
            attributes.insert(name.clone(), value.clone());
        }
    }
    tracing::debug!(
        stage = "ClassifyFields",
        managed = managed.len(),
        attributes = attributes.len()
    );
    Classified {
        managed,
        attributes,
    }
}

/// Fix declared types, validate defaults and mark required fields.
pub(super) fn synthesize_accessors(
    def: &RecordDef,
    managed: Vec<Declared>,
) -> Result<Vec<FieldSpec>, ConfigError> {
    let mut fields = Vec::with_capacity(managed.len());
    for item in managed {
        let mut flags = FieldFlags::empty();
        if item.inherited {
            flags |= FieldFlags::INHERITED;
        }
        let declared = match &item.default {
            Some(Value::None) if !item.ty.accepts_none() => {
                flags |= FieldFlags::WIDENED;
                Type::optional(item.ty)
            }
            _ => item.ty,
        };
        let default = match item.default {
            Some(value) => {
                flags |= FieldFlags::HAS_DEFAULT;
                Some(check_default(def, &item.name, &declared, value)?)
            }
            None => {
                if !declared.accepts_none() {
                    flags |= FieldFlags::REQUIRED;
                }
                None
            }
        };
        fields.push(FieldSpec {
            name: item.name,
            declared,
            default,
            flags,
        });
    }
    tracing::debug!(stage = "SynthesizeAccessors", fields = fields.len());
    Ok(fields)
}

fn check_default(
    def: &RecordDef,
    field: &str,
    declared: &Type,
    value: Value,
) -> Result<Value, ConfigError> {
    match def.policy {
        Policy::Strict if is_instance(&value, declared) => Ok(value),
        Policy::Strict => Err(invalid_field(
            &def.name,
            field,
            &format!("default {} is not an instance of {declared}", value.repr()),
        )),
        Policy::Coercing => {
            coerce(declared, &value).map_err(|err| invalid_field(&def.name, field, &err.message))
        }
    }
}

/// Assemble the class.
pub(super) fn finalize(
    def: RecordDef,
    fields: Vec<FieldSpec>,
    attributes: FxHashMap<String, Value>,
) -> RecordClass {
    let index = fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.name.clone(), i))
        .collect();
    let mut methods = def
        .parent
        .as_ref()
        .map(|parent| parent.0.methods.clone())
        .unwrap_or_default();
    methods.extend(def.methods);
    let required = fields.iter().filter(|f| f.is_required()).count();
    tracing::debug!(
        stage = "Finalize",
        record = %def.name,
        fields = fields.len(),
        required,
        "defined record"
    );
    RecordClass(Arc::new_cyclic(|this| ClassDef {
        name: def.name,
        module: def.module,
        policy: def.policy,
        comparable: def.comparable,
        fields,
        index,
        attributes,
        methods,
        parent: def.parent,
        instancing: def.instancing,
        instance: Mutex::new(None),
        this: this.clone(),
    }))
}
