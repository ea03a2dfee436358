//! Node descriptors: the unit of registration.
//!
//! A descriptor is everything the host needs to display, wire, and run a
//! node: identifier, display name, cosmetic category, input/output
//! schemas, the sink flag, and the execution entry point. Schemas are
//! derived once, at definition time; the entry point only forwards the
//! argument set to the declared body.

use crate::core::args::Args;
use crate::core::error::NodeError;
use crate::core::schema::InputSchema;
use crate::core::types::{TypeTag, Value};
use crate::synth::NodeBuilder;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Execution entry point of a node.
///
/// Takes the keyword-style argument set and returns one value per output
/// schema slot, in order. Runtime failures propagate to the host verbatim.
pub type NodeFn = Arc<dyn Fn(Args) -> Result<Vec<Value>, NodeError> + Send + Sync>;

/// A registered node as the host consumes it.
#[derive(Clone, Serialize)]
pub struct NodeDescriptor {
    /// Unique identifier (registry key).
    pub id: String,
    /// Human-readable name; not required to be unique.
    pub display_name: String,
    /// Free-form grouping string, purely cosmetic.
    pub category: String,
    /// Ordered input schema.
    pub inputs: InputSchema,
    /// Ordered output type tags.
    pub outputs: Vec<TypeTag>,
    /// Whether this is a terminal/side-effecting node.
    pub output_sink: bool,
    #[serde(skip)]
    pub(crate) body: NodeFn,
}

impl NodeDescriptor {
    /// Start declaring a node.
    pub fn builder(id: impl Into<String>, display_name: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(id, display_name)
    }

    /// Run the node.
    ///
    /// Arguments are forwarded to the body unchanged: no coercion, no
    /// validation of values against the declared constraints. Enforcing
    /// constraints is the host's responsibility.
    pub fn execute(&self, args: Args) -> Result<Vec<Value>, NodeError> {
        let outputs = (self.body)(args)?;
        debug_assert_eq!(
            outputs.len(),
            self.outputs.len(),
            "node '{}' returned {} values for {} declared outputs",
            self.id,
            outputs.len(),
            self.outputs.len(),
        );
        Ok(outputs)
    }

    /// Input parameter names in declaration order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(|s| s.as_str())
    }

    /// Input type tags in declaration order.
    pub fn input_tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.inputs.values().map(|slot| slot.tag())
    }
}

impl fmt::Debug for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("output_sink", &self.output_sink)
            .field("body", &"<node fn>")
            .finish()
    }
}
