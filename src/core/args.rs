//! Keyword-style argument sets passed to node bodies.
//!
//! The host builds an [`Args`] per execution with one value per input
//! schema entry. The core forwards it to the node body unchanged; typed
//! access (and its failure modes) lives here so bodies stay short.

use crate::core::error::NodeError;
use crate::core::types::Value;
use crate::image::tensor::ImageTensor;
use indexmap::IndexMap;

/// Ordered name → value set for one node execution.
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: IndexMap<String, Value>,
}

impl Args {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Set an argument, replacing any previous value under that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Number of arguments present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    /// Get an argument by name.
    pub fn get(&self, name: &str) -> Result<&Value, NodeError> {
        self.values
            .get(name)
            .ok_or_else(|| NodeError::MissingArgument(name.to_string()))
    }

    /// Get an argument if present.
    pub fn opt(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get an argument as an integer.
    pub fn integer(&self, name: &str) -> Result<i64, NodeError> {
        let value = self.get(name)?;
        value.as_integer().ok_or_else(|| NodeError::ArgumentType {
            name: name.to_string(),
            expected: "INT",
            got: value.kind().to_string(),
        })
    }

    /// Get an argument as a float. Integers widen automatically.
    pub fn float(&self, name: &str) -> Result<f64, NodeError> {
        let value = self.get(name)?;
        value.as_float().ok_or_else(|| NodeError::ArgumentType {
            name: name.to_string(),
            expected: "FLOAT",
            got: value.kind().to_string(),
        })
    }

    /// Get an argument as a string slice.
    pub fn text(&self, name: &str) -> Result<&str, NodeError> {
        let value = self.get(name)?;
        value.as_text().ok_or_else(|| NodeError::ArgumentType {
            name: name.to_string(),
            expected: "STRING",
            got: value.kind().to_string(),
        })
    }

    /// Get an argument as an image tensor reference.
    pub fn image(&self, name: &str) -> Result<&ImageTensor, NodeError> {
        let value = self.get(name)?;
        value.as_image().ok_or_else(|| NodeError::ArgumentType {
            name: name.to_string(),
            expected: "IMAGE",
            got: value.kind().to_string(),
        })
    }

    /// Remove and return an argument by value.
    pub fn take(&mut self, name: &str) -> Result<Value, NodeError> {
        self.values
            .shift_remove(name)
            .ok_or_else(|| NodeError::MissingArgument(name.to_string()))
    }

    /// Remove and return an image argument by value.
    pub fn take_image(&mut self, name: &str) -> Result<ImageTensor, NodeError> {
        match self.take(name)? {
            Value::Image(img) => Ok(img),
            other => Err(NodeError::ArgumentType {
                name: name.to_string(),
                expected: "IMAGE",
                got: other.kind().to_string(),
            }),
        }
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
