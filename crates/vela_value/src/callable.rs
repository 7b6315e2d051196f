//! Named native functions.
//!
//! Key functions and predicates are referred to by a fully qualified name in
//! generated type names and failure messages, so a `Callable` carries its
//! module and name alongside the function itself.

use std::fmt;
use std::sync::Arc;

use crate::errors::{call_failed, ValueError};
use crate::value::Value;

/// Module name whose members render unqualified (`len`, not `builtins.len`).
pub const BUILTINS_MODULE: &str = "builtins";

/// Native function signature.
///
/// An `Err` carries a bare message; `Callable::call` attaches the function
/// name.
pub type NativeFn = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;

/// A named, shareable native function.
#[derive(Clone)]
pub struct Callable {
    module: Arc<str>,
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl Callable {
    /// Create a callable defined in `module`.
    pub fn new<F>(module: &str, name: &str, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Callable {
            module: Arc::from(module),
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    /// Create a callable in the builtin module.
    pub fn builtin<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::new(BUILTINS_MODULE, name, func)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this is the builtin called `name`.
    pub fn is_builtin(&self, name: &str) -> bool {
        &*self.module == BUILTINS_MODULE && &*self.name == name
    }

    /// `module.name`, or the bare name for builtins.
    pub fn full_name(&self) -> String {
        if &*self.module == BUILTINS_MODULE || self.module.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.module, self.name)
        }
    }

    /// Apply the function to one argument.
    pub fn call(&self, arg: &Value) -> Result<Value, ValueError> {
        (self.func)(arg).map_err(|message| call_failed(&self.full_name(), message))
    }

    /// Check whether two handles share the same function.
    pub fn same_function(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.full_name())
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
