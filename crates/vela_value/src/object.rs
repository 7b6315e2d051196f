//! Opaque host objects carried inside values.

use std::any::Any;
use std::cmp::Ordering;

use crate::errors::{unorderable, ValueError};

/// A user-level object stored in `Value::Object`.
///
/// Record instances are the main implementor. The default methods give
/// identity semantics: an object equals only itself and has no ordering.
pub trait Object: Any + Send + Sync {
    /// Class name used in messages and as `type_name`.
    fn class_name(&self) -> &str;

    /// Host-style `repr`.
    fn repr(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn eq_object(&self, other: &dyn Object) -> bool {
        std::ptr::addr_eq(self.as_any(), other.as_any())
    }

    /// Hash consistent with `eq_object`.
    fn hash_object(&self) -> u64 {
        (std::ptr::from_ref(self.as_any()).cast::<()>() as usize) as u64
    }

    fn cmp_object(
        &self,
        other: &dyn Object,
        op: &'static str,
    ) -> Result<Option<Ordering>, ValueError> {
        Err(unorderable(op, self.class_name(), other.class_name()))
    }
}
