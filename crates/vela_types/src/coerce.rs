//! Best-effort conversion of values into declared types.
//!
//! Conversion follows the host language's constructors: `str(x)`, `int(x)`
//! (truncating floats, parsing text), `float(x)`, `bool(x)`. Containers are
//! rebuilt element by element; text counts as a sequence of characters.
//! Values that already satisfy the target are returned unchanged.

use vela_value::Value;

use crate::check::is_instance;
use crate::errors::{cannot_convert, element_count, ValidationError};
use crate::stack::ensure_sufficient_stack;
use crate::ty::Type;

/// Convert `value` into `target`.
///
/// Element conversion failures inside containers propagate as-is, so the
/// message names the element that could not be converted.
pub fn coerce(target: &Type, value: &Value) -> Result<Value, ValidationError> {
    ensure_sufficient_stack(|| coerce_inner(target, value))
}

fn coerce_inner(target: &Type, value: &Value) -> Result<Value, ValidationError> {
    if is_instance(value, target) {
        return Ok(value.clone());
    }
    let fail = || cannot_convert(&value.repr(), &target.to_string());
    match target {
        Type::Any => Ok(value.clone()),
        Type::NoneType => Err(fail()),
        Type::Bool => Ok(Value::Bool(value.is_truthy())),
        Type::Int => to_int(value).map(Value::Int).ok_or_else(fail),
        Type::Float => to_float(value).map(Value::Float).ok_or_else(fail),
        Type::Str => match value {
            Value::Bytes(b) => std::str::from_utf8(b)
                .map(Value::string)
                .map_err(|_| fail()),
            other => Ok(Value::string(other.to_str())),
        },
        Type::Bytes => match value {
            Value::Str(s) => Ok(Value::bytes(s.as_bytes())),
            other => Ok(Value::bytes(other.to_str())),
        },
        Type::List(elem) => {
            let items = iterate(value).ok_or_else(fail)?;
            let cast = coerce_all(elem, &items)?;
            Ok(Value::list(cast))
        }
        Type::TupleOf(elem) => {
            let items = iterate(value).ok_or_else(fail)?;
            let cast = coerce_all(elem, &items)?;
            Ok(Value::tuple(cast))
        }
        Type::Tuple(types) => {
            let items = iterate(value).ok_or_else(fail)?;
            if items.len() != types.len() {
                return Err(element_count(items.len(), &target.to_string()));
            }
            let cast = types
                .iter()
                .zip(items.iter())
                .map(|(t, v)| coerce(t, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::tuple(cast))
        }
        Type::Map(key, val) => {
            let entries = value.as_entries().ok_or_else(fail)?;
            let cast = entries
                .iter()
                .map(|(k, v)| Ok((coerce(key, k)?, coerce(val, v)?)))
                .collect::<Result<Vec<_>, ValidationError>>()?;
            Ok(Value::map(cast))
        }
        Type::Union(members) => {
            for member in members {
                if let Ok(cast) = coerce(member, value) {
                    tracing::trace!(target_type = %member, "coerced through union member");
                    return Ok(cast);
                }
            }
            Err(fail())
        }
        Type::Object(obj) => obj.construct(value),
    }
}

fn coerce_all(elem: &Type, items: &[Value]) -> Result<Vec<Value>, ValidationError> {
    items.iter().map(|item| coerce(elem, item)).collect()
}

/// Elements of an iterable value: sequences yield their items, text its
/// characters, bytes their integer values and maps their keys.
fn iterate(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::List(items) | Value::Tuple(items) => Some(items.to_vec()),
        Value::Str(s) => Some(s.chars().map(|c| Value::string(c.to_string())).collect()),
        Value::Bytes(b) => Some(b.iter().map(|&byte| Value::Int(i64::from(byte))).collect()),
        Value::Map(entries) => Some(entries.iter().map(|(k, _)| k.clone()).collect()),
        _ => None,
    }
}

/// `int(x)`.
fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(f) => float_to_int(*f),
        Value::Str(s) => parse_int(s),
        Value::Bytes(b) => std::str::from_utf8(b).ok().and_then(parse_int),
        _ => None,
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let truncated = f.trunc();
    // -2^63 <= truncated < 2^63 is exactly the i64 range.
    let two_pow_63 = 2.0_f64.powi(63);
    if truncated >= two_pow_63 || truncated < -two_pow_63 {
        return None;
    }
    format!("{truncated:.0}").parse::<i64>().ok()
}

/// Integer text: surrounding whitespace, an optional sign and single
/// underscores between digits are accepted.
fn parse_int(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    let digits = trimmed.trim_start_matches(['+', '-']);
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }
    trimmed.replace('_', "").parse::<i64>().ok()
}

/// `float(x)`.
fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(_) | Value::Bool(_) => to_int(value).and_then(int_to_float),
        Value::Str(s) => s.trim().parse::<f64>().ok(),
        Value::Bytes(b) => std::str::from_utf8(b)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok()),
        _ => None,
    }
}

fn int_to_float(n: i64) -> Option<f64> {
    match i32::try_from(n) {
        Ok(small) => Some(f64::from(small)),
        Err(_) => format!("{n}").parse::<f64>().ok(),
    }
}
