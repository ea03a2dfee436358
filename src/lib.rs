//! # Trellis - Declarative Node Packs
//!
//! Trellis is a library for defining packs of workflow nodes the way a
//! ComfyUI-style host consumes them: each node is an identifier, a
//! display name, a typed input schema with defaults and constraints, an
//! ordered list of output type tags, and an execution body.
//!
//! ## Features
//!
//! - **Functional Synthesis**: Declare parameters, outputs, and a body;
//!   the full host-facing descriptor is derived at build time
//! - **Schema Validation**: Missing defaults, forbidden defaults,
//!   duplicate parameters, and undeclared returns fail the build
//! - **Explicit Registry**: A registry object with a configurable
//!   duplicate policy and a freeze lifecycle, no process-wide state
//! - **Custom Value Kinds**: Host-defined tags (like `IMAGE`) are
//!   registered up front so unknown tags are caught at registration
//! - **Image Utilities**: Normalized `f32` tensors, layout permutation,
//!   and resizing under named interpolation modes
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! // The built-in pack: scalar math plus image load/resize.
//! let mut registry = NodeRegistry::with_builtins().unwrap();
//! registry.freeze();
//!
//! let node = registry.get("integer_add").unwrap();
//! let out = node
//!     .execute(Args::new().with("a", 3i64).with("b", 4i64))
//!     .unwrap();
//! assert_eq!(out, vec![Value::Integer(7)]);
//! ```
//!
//! Declaring a node of your own:
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let mut registry = NodeRegistry::new();
//! NodeDescriptor::builder("double", "Double")
//!     .category("math")
//!     .int_param("value", 0)
//!     .output(TypeTag::Integer)
//!     .body(|args| Ok(vec![Value::Integer(args.integer("value")? * 2)]))
//!     .register(&mut registry)
//!     .unwrap();
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Value model, schemas, descriptors, argument sets, errors
//! - [`synth`]: The declarative node builder
//! - [`registry`]: The node registry and its lifecycle
//! - [`image`]: Tensor representation and resize wrappers
//! - [`nodes`]: The built-in node pack

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod image;
pub mod nodes;
pub mod registry;
pub mod synth;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use trellis::prelude::*;
/// ```
pub mod prelude {
    // Value model
    pub use crate::core::types::{OpaqueValue, TypeTag, Value, IMAGE_KIND};

    // Schemas
    pub use crate::core::schema::{
        FloatConstraints, InputSchema, InputSlot, IntConstraints, ParamDecl, TextConstraints,
    };

    // Descriptors and arguments
    pub use crate::core::args::Args;
    pub use crate::core::descriptor::{NodeDescriptor, NodeFn};

    // Errors
    pub use crate::core::error::{
        ImageOpError, NodeError, RegistryError, SchemaError, TrellisError, TrellisResult,
        UnsupportedTypeError,
    };

    // Synthesis and registration
    pub use crate::registry::{DuplicatePolicy, NodeRegistry};
    pub use crate::synth::NodeBuilder;

    // Image utilities
    pub use crate::image::{resize, ImageTensor, Interpolation, PlanarImage};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "trellis");
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = NodeRegistry::with_builtins().unwrap();

        assert!(registry.contains("integer"));
        assert!(registry.contains("integer_add"));
        assert!(registry.contains("integer_divide"));
        assert!(registry.contains("float_to_integer"));
        assert!(registry.contains("load_image_rgb"));
        assert!(registry.contains("image_resize"));
        assert!(registry.known_kind(IMAGE_KIND));
    }

    #[test]
    fn test_end_to_end_math_chain() {
        let mut registry = NodeRegistry::with_builtins().unwrap();
        registry.freeze();

        // (3 + 4) / 2 through two nodes, carrying values by hand the way
        // a host scheduler would.
        let sum = registry
            .get("integer_add")
            .unwrap()
            .execute(Args::new().with("a", 3i64).with("b", 4i64))
            .unwrap();
        let quotient = registry
            .get("integer_divide")
            .unwrap()
            .execute(Args::new().with("a", sum[0].clone()).with("b", 2i64))
            .unwrap();
        assert_eq!(quotient, vec![Value::Float(3.5)]);
    }
}
