//! Error types for type definition and value validation.
//!
//! Two failure families are kept apart everywhere:
//!
//! - `ConfigError` is raised while *defining* things: parameterizing a
//!   factory, resolving a type expression, declaring a record, or calling a
//!   record constructor with the wrong argument shape. It is a programmer
//!   mistake.
//! - `ValidationError` is raised while *handling values*: a bound or
//!   predicate rejects a value, a strict field refuses a value of the wrong
//!   type, or a value cannot be converted.
//!
//! Factory functions (e.g. `wrong_arity()`, `below_minimum()`) are the public
//! construction API; they populate both `kind` and `message`.

use std::fmt;

use vela_value::ValueError;

// Configuration errors

/// Typed category for definition-time failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A factory was parameterized with the wrong number of arguments.
    WrongArity {
        factory: String,
        expected: &'static str,
    },
    /// A factory was given more parameters than it ever accepts.
    TooManyParameters { factory: String },
    /// A factory parameter has the wrong shape.
    InvalidParameter {
        factory: String,
        expected: &'static str,
        found: String,
    },
    /// A bound cannot take part in comparisons.
    InvalidBound { bound: String },
    /// A bound has no literal form in a type expression.
    UnsupportedBound { bound: String },
    /// A name in a type expression is not registered.
    UnresolvedName { name: String },
    /// A type expression could not be parsed.
    MalformedExpression {
        expression: String,
        position: usize,
        detail: String,
    },
    /// A subscript was applied to a name that takes no parameters.
    NotSubscriptable { name: String },
    /// A type that can only be parameterized was called directly.
    Uninstantiable { type_name: String },
    /// A record field declaration is invalid.
    InvalidField {
        record: String,
        field: String,
        detail: String,
    },
    /// A constructor argument was given both positionally and by keyword.
    MultipleValues { function: String, argument: String },
    /// A constructor received a keyword that is not a field.
    UnexpectedKeyword { function: String, argument: String },
    /// A constructor received more positional arguments than fields.
    TooManyPositional {
        function: String,
        max: usize,
        given: usize,
    },
    /// Required constructor arguments were not supplied.
    MissingArguments {
        function: String,
        names: Vec<String>,
    },
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArity { factory, expected } => {
                write!(f, "{factory}[...] takes {expected}.")
            }
            Self::TooManyParameters { factory } => {
                write!(f, "Too many parameters given to {factory}[...]")
            }
            Self::InvalidParameter {
                factory,
                expected,
                found,
            } => write!(f, "{factory}[...] expected {expected}, found {found}."),
            Self::InvalidBound { bound } => {
                write!(f, "Bound {bound} does not support ordering comparisons.")
            }
            Self::UnsupportedBound { bound } => {
                write!(f, "Bound {bound} cannot be written in a type expression.")
            }
            Self::UnresolvedName { name } => write!(f, "name '{name}' is not defined"),
            Self::MalformedExpression {
                expression,
                position,
                detail,
            } => write!(
                f,
                "invalid type expression '{expression}' at offset {position}: {detail}"
            ),
            Self::NotSubscriptable { name } => write!(f, "'{name}' is not subscriptable"),
            Self::Uninstantiable { type_name } => {
                write!(f, "Type {type_name} cannot be instantiated.")
            }
            Self::InvalidField {
                record,
                field,
                detail,
            } => write!(f, "invalid field '{field}' on {record}: {detail}"),
            Self::MultipleValues { function, argument } => {
                write!(f, "{function}() got multiple values for argument '{argument}'")
            }
            Self::UnexpectedKeyword { function, argument } => {
                write!(f, "{function}() got an unexpected keyword argument '{argument}'")
            }
            Self::TooManyPositional {
                function,
                max,
                given,
            } => write!(
                f,
                "{function}() takes {max} positional argument{} but {given} {} given",
                if *max == 1 { "" } else { "s" },
                if *given == 1 { "was" } else { "were" },
            ),
            Self::MissingArguments { function, names } => write!(
                f,
                "{function}() missing {} required argument{}: {}",
                names.len(),
                if names.len() == 1 { "" } else { "s" },
                natural_list(names),
            ),
        }
    }
}

/// Quote and join names as `'a', 'b' and 'c'`.
pub fn natural_list(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(|n| format!("'{n}'")).collect();
            format!("{} and '{last}'", head.join(", "))
        }
    }
}

/// Definition-time error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    /// Structured error category.
    pub kind: ConfigErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
}

impl ConfigError {
    fn from_kind(kind: ConfigErrorKind) -> Self {
        let message = kind.to_string();
        ConfigError { kind, message }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cold]
pub fn wrong_arity(factory: &str, expected: &'static str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::WrongArity {
        factory: factory.to_string(),
        expected,
    })
}

#[cold]
pub fn too_many_parameters(factory: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::TooManyParameters {
        factory: factory.to_string(),
    })
}

#[cold]
pub fn invalid_parameter(factory: &str, expected: &'static str, found: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::InvalidParameter {
        factory: factory.to_string(),
        expected,
        found: found.to_string(),
    })
}

#[cold]
pub fn invalid_bound(bound: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::InvalidBound {
        bound: bound.to_string(),
    })
}

#[cold]
pub fn unsupported_bound(bound: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::UnsupportedBound {
        bound: bound.to_string(),
    })
}

#[cold]
pub fn unresolved_name(name: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::UnresolvedName {
        name: name.to_string(),
    })
}

#[cold]
pub fn malformed_expression(expression: &str, position: usize, detail: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::MalformedExpression {
        expression: expression.to_string(),
        position,
        detail: detail.to_string(),
    })
}

#[cold]
pub fn not_subscriptable(name: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::NotSubscriptable {
        name: name.to_string(),
    })
}

#[cold]
pub fn uninstantiable(type_name: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::Uninstantiable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_field(record: &str, field: &str, detail: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::InvalidField {
        record: record.to_string(),
        field: field.to_string(),
        detail: detail.to_string(),
    })
}

#[cold]
pub fn multiple_values(function: &str, argument: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::MultipleValues {
        function: function.to_string(),
        argument: argument.to_string(),
    })
}

#[cold]
pub fn unexpected_keyword(function: &str, argument: &str) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::UnexpectedKeyword {
        function: function.to_string(),
        argument: argument.to_string(),
    })
}

#[cold]
pub fn too_many_positional(function: &str, max: usize, given: usize) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::TooManyPositional {
        function: function.to_string(),
        max,
        given,
    })
}

#[cold]
pub fn missing_arguments(function: &str, names: Vec<String>) -> ConfigError {
    ConfigError::from_kind(ConfigErrorKind::MissingArguments {
        function: function.to_string(),
        names,
    })
}

// Validation errors

/// The value a bound was checked against.
///
/// With a non-identity key, messages show the key application and its
/// result (`len('abc') [3]`) instead of the bare value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundSubject {
    Value { value: String },
    Keyed {
        key: String,
        value: String,
        result: String,
    },
}

impl fmt::Display for BoundSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { value } => write!(f, "The value {value}"),
            Self::Keyed { key, value, result } => {
                write!(f, "The value of {key}({value}) [{result}]")
            }
        }
    }
}

/// Typed category for value-time failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    BelowMinimum { subject: BoundSubject, bound: String },
    AboveMaximum { subject: BoundSubject, bound: String },
    /// A predicate returned a falsy result.
    PredicateFailed { predicate: String, value: String },
    /// Applying a key or comparing against a bound failed.
    Operation(ValueError),
    /// No conversion from the value to the target type exists.
    CannotConvert { value: String, target: String },
    /// A fixed tuple target received the wrong number of elements.
    ElementCount { found: usize, target: String },
    /// A strict field refused a value of another type.
    WrongType { found: String, expected: String },
    /// A field was read before being assigned.
    Unset { type_name: String, field: String },
    /// An attribute name that the record does not declare.
    UnknownAttribute { record: String, field: String },
    /// Ordering between instances of different record classes.
    NotComparable { left: String, right: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum { subject, bound } => {
                write!(f, "{subject} is below the minimum allowed value of {bound}.")
            }
            Self::AboveMaximum { subject, bound } => {
                write!(f, "{subject} is above the maximum allowed value of {bound}.")
            }
            Self::PredicateFailed { predicate, value } => {
                write!(f, "{predicate}({value}) is False")
            }
            Self::Operation(err) => write!(f, "{err}"),
            Self::CannotConvert { value, target } => {
                write!(f, "Cannot convert {value} to {target}.")
            }
            Self::ElementCount { found, target } => write!(
                f,
                "The number of elements [{found}] does not match the type {target}"
            ),
            Self::WrongType { found, expected } => write!(
                f,
                "Cannot assign value of type {found} to attribute of type {expected}."
            ),
            Self::Unset { type_name, field } => {
                write!(f, "'{type_name}' object has no attribute '{field}'")
            }
            Self::UnknownAttribute { record, field } => {
                write!(f, "'{record}' object has no attribute '{field}'")
            }
            Self::NotComparable { left, right } => {
                write!(f, "{left} and {right} instances are not comparable")
            }
        }
    }
}

/// Value-time error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Structured error category.
    pub kind: ValidationErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
}

impl ValidationError {
    fn from_kind(kind: ValidationErrorKind) -> Self {
        let message = kind.to_string();
        ValidationError { kind, message }
    }

    /// True for failures produced by a bound or predicate check.
    pub fn is_constraint_failure(&self) -> bool {
        matches!(
            self.kind,
            ValidationErrorKind::BelowMinimum { .. }
                | ValidationErrorKind::AboveMaximum { .. }
                | ValidationErrorKind::PredicateFailed { .. }
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValueError> for ValidationError {
    fn from(err: ValueError) -> Self {
        ValidationError::from_kind(ValidationErrorKind::Operation(err))
    }
}

#[cold]
pub fn below_minimum(subject: BoundSubject, bound: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::BelowMinimum {
        subject,
        bound: bound.to_string(),
    })
}

#[cold]
pub fn above_maximum(subject: BoundSubject, bound: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::AboveMaximum {
        subject,
        bound: bound.to_string(),
    })
}

#[cold]
pub fn predicate_failed(predicate: &str, value: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::PredicateFailed {
        predicate: predicate.to_string(),
        value: value.to_string(),
    })
}

/// `value` is the rendered value (usually its `repr`).
#[cold]
pub fn cannot_convert(value: &str, target: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::CannotConvert {
        value: value.to_string(),
        target: target.to_string(),
    })
}

#[cold]
pub fn element_count(found: usize, target: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::ElementCount {
        found,
        target: target.to_string(),
    })
}

#[cold]
pub fn wrong_type(found: &str, expected: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::WrongType {
        found: found.to_string(),
        expected: expected.to_string(),
    })
}

#[cold]
pub fn unset_attribute(type_name: &str, field: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::Unset {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn unknown_attribute(record: &str, field: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::UnknownAttribute {
        record: record.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn not_comparable(left: &str, right: &str) -> ValidationError {
    ValidationError::from_kind(ValidationErrorKind::NotComparable {
        left: left.to_string(),
        right: right.to_string(),
    })
}

// Combined

/// Either failure family, for operations that can fail both ways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Config(ConfigError),
    Validation(ValidationError),
}

impl Error {
    pub fn message(&self) -> &str {
        match self {
            Error::Config(e) => &e.message,
            Error::Validation(e) => &e.message,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Validation(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}
