//! Constructor arguments.

use smallvec::SmallVec;
use vela_value::Value;

/// Positional and keyword arguments for a record constructor.
#[derive(Clone, Debug, Default)]
pub struct Args {
    pub(crate) positional: SmallVec<[Value; 8]>,
    pub(crate) keywords: SmallVec<[(String, Value); 8]>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments from positional values only.
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args {
            positional: values.into_iter().collect(),
            keywords: SmallVec::new(),
        }
    }

    /// Arguments from keyword values only.
    pub fn keywords<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Args {
            positional: SmallVec::new(),
            keywords: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    #[must_use]
    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.push((name.to_string(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}
