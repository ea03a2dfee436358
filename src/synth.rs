//! Functional node synthesis.
//!
//! [`NodeBuilder`] turns an ordered list of typed parameter declarations,
//! an ordered list of output tags, and an execution body into a complete
//! [`NodeDescriptor`]. The derivation is a single pass over the static
//! declarations, run exactly once per node at load time; it never looks
//! at runtime argument values, carries no hidden state, and is therefore
//! idempotent: the same declarations always produce structurally
//! identical schemas.
//!
//! Every violation of the schema contract is fatal to that node's
//! registration. There is no partial or recoverable registration mode.

use crate::core::args::Args;
use crate::core::descriptor::{NodeDescriptor, NodeFn};
use crate::core::error::{NodeError, SchemaError, TrellisError};
use crate::core::schema::{InputSchema, ParamDecl};
use crate::core::types::{TypeTag, Value};
use crate::registry::NodeRegistry;
use std::sync::Arc;

/// Declarative builder for a functional node.
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
///
/// let node = NodeDescriptor::builder("integer_add", "Integer Add")
///     .category("math")
///     .int_param("a", 0)
///     .int_param("b", 0)
///     .output(TypeTag::Integer)
///     .body(|args| Ok(vec![Value::Integer(args.integer("a")? + args.integer("b")?)]))
///     .build()
///     .unwrap();
///
/// assert_eq!(node.inputs.len(), 2);
/// ```
pub struct NodeBuilder {
    id: String,
    display_name: String,
    category: String,
    params: Vec<(String, ParamDecl)>,
    returns: Option<Vec<TypeTag>>,
    output_sink: bool,
    body: Option<NodeFn>,
}

impl NodeBuilder {
    /// Create a builder with the required identifier and display name.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category: String::new(),
            params: Vec::new(),
            returns: None,
            output_sink: false,
            body: None,
        }
    }

    /// Set the cosmetic category string.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Declare the next parameter, in order.
    pub fn param(mut self, name: impl Into<String>, decl: ParamDecl) -> Self {
        self.params.push((name.into(), decl));
        self
    }

    /// Declare an `INT` parameter with a default.
    pub fn int_param(self, name: impl Into<String>, default: i64) -> Self {
        self.param(name, ParamDecl::int(default))
    }

    /// Declare a `FLOAT` parameter with a default.
    pub fn float_param(self, name: impl Into<String>, default: f64) -> Self {
        self.param(name, ParamDecl::float(default))
    }

    /// Declare a `STRING` parameter with a default.
    pub fn text_param(self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.param(name, ParamDecl::text(default))
    }

    /// Declare a custom-tagged parameter.
    pub fn custom_param(self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.param(name, ParamDecl::custom(tag))
    }

    /// Declare the full ordered output tag sequence.
    ///
    /// Nodes with no outputs (sinks) still have to call this with an
    /// empty sequence; a node that never declares its returns fails to
    /// build.
    pub fn returns(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.returns = Some(tags.into_iter().collect());
        self
    }

    /// Append one output tag.
    pub fn output(mut self, tag: TypeTag) -> Self {
        self.returns.get_or_insert_with(Vec::new).push(tag);
        self
    }

    /// Mark this node as a terminal/side-effecting sink.
    pub fn output_sink(mut self) -> Self {
        self.output_sink = true;
        self
    }

    /// Attach the execution body.
    pub fn body<F>(mut self, f: F) -> Self
    where
        F: Fn(Args) -> Result<Vec<Value>, NodeError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(f));
        self
    }

    /// Derive the descriptor.
    ///
    /// Runs the synthesis rules over the declarations, in declaration
    /// order: primitive parameters must carry a default and receive the
    /// fixed wide constraint record, custom-tagged parameters must not
    /// carry one, parameter names must be unique, and the output tag
    /// sequence and body must both have been declared.
    pub fn build(self) -> Result<NodeDescriptor, SchemaError> {
        let mut inputs = InputSchema::new();
        for (name, decl) in self.params {
            let slot = decl.into_slot(&name)?;
            if inputs.insert(name.clone(), slot).is_some() {
                return Err(SchemaError::DuplicateParameter {
                    node: self.id,
                    parameter: name,
                });
            }
        }

        let outputs = self.returns.ok_or_else(|| SchemaError::MissingReturnTypes {
            node: self.id.clone(),
        })?;
        let body = self.body.ok_or_else(|| SchemaError::MissingBody {
            node: self.id.clone(),
        })?;

        Ok(NodeDescriptor {
            id: self.id,
            display_name: self.display_name,
            category: self.category,
            inputs,
            outputs,
            output_sink: self.output_sink,
            body,
        })
    }

    /// Build the descriptor and register it in one step.
    pub fn register(self, registry: &mut NodeRegistry) -> Result<(), TrellisError> {
        let descriptor = self.build()?;
        registry.register(descriptor)?;
        Ok(())
    }
}
