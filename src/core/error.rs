//! Error taxonomy.
//!
//! Uses thiserror for structured errors with context. Two families exist:
//! definition-time errors ([`SchemaError`], [`UnsupportedTypeError`],
//! [`RegistryError`]) which are fatal to a node's registration, and
//! runtime errors ([`NodeError`], [`ImageOpError`]) raised inside node
//! bodies and propagated to the host untranslated.

use crate::core::types::TypeTag;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A declared node signature violates the input/output schema contract.
///
/// Raised when a descriptor is built, before anything reaches the
/// registry. There is no partial or recoverable registration: a schema
/// violation is a load-time programming error, not a runtime condition.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaError {
    /// Primitive-typed inputs must always carry a default value.
    #[error("primitive input '{parameter}' ({tag}) must declare a default value")]
    MissingDefault {
        /// Name of the offending parameter.
        parameter: String,
        /// The primitive tag declared for it.
        tag: TypeTag,
    },

    /// Custom-typed inputs must never carry a default value.
    #[error("custom input '{parameter}' ({tag}) must not declare a default value")]
    ForbiddenDefault {
        /// Name of the offending parameter.
        parameter: String,
        /// The custom tag declared for it.
        tag: String,
    },

    /// Every node must declare its ordered return types, even if empty.
    #[error("node '{node}' does not declare its return types")]
    MissingReturnTypes {
        /// Identifier of the node being built.
        node: String,
    },

    /// Parameter names must be unique within a node.
    #[error("duplicate parameter '{parameter}' on node '{node}'")]
    DuplicateParameter {
        /// Identifier of the node being built.
        node: String,
        /// The repeated parameter name.
        parameter: String,
    },

    /// A descriptor without an execution body cannot be registered.
    #[error("node '{node}' has no execution body")]
    MissingBody {
        /// Identifier of the node being built.
        node: String,
    },
}

/// A declared type tag has no mapping to a known value kind.
///
/// Custom tags are resolved against the registry's set of host-defined
/// kinds at registration time, so an unknown tag is detected instead of
/// being forwarded blindly. Same fatality as [`SchemaError`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("unsupported type tag '{tag}' on '{node}.{slot}': not a registered value kind")]
pub struct UnsupportedTypeError {
    /// Identifier of the node being registered.
    pub node: String,
    /// Input name or `output[i]` position carrying the tag.
    pub slot: String,
    /// The unresolved tag.
    pub tag: String,
}

/// Errors raised by the registry during registration.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Identifier collision under [`DuplicatePolicy::Reject`](crate::registry::DuplicatePolicy::Reject).
    #[error("node '{0}' is already registered")]
    Duplicate(String),

    /// The registry has been frozen; the load phase is over.
    #[error("registry is frozen; registration of '{0}' rejected")]
    Frozen(String),

    /// A declared custom tag did not resolve to a registered kind.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
}

/// Runtime failures inside a node body.
///
/// The core performs no input-value validation at call time, so these
/// surface to the host exactly as the body produced them.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The argument set is missing a declared input.
    #[error("missing argument '{0}'")]
    MissingArgument(String),

    /// An argument carried a value of the wrong kind.
    #[error("argument '{name}': expected {expected}, got {got}")]
    ArgumentType {
        /// Name of the argument.
        name: String,
        /// Expected wire-form kind.
        expected: &'static str,
        /// Actual wire-form kind.
        got: String,
    },

    /// The operation itself failed (e.g. division by zero).
    #[error("node execution failed: {0}")]
    Execution(String),

    /// An image collaborator call failed.
    #[error(transparent)]
    Image(#[from] ImageOpError),
}

/// Failures in the image utility wrappers.
#[derive(Error, Debug)]
pub enum ImageOpError {
    /// String-to-policy lookup failed; never silently defaults.
    #[error("unknown interpolation mode '{0}'")]
    UnknownInterpolation(String),

    /// Tensor data length does not match the declared shape.
    #[error("tensor data length {actual} does not match shape {shape:?} ({expected} elements)")]
    ShapeMismatch {
        /// Declared `[batch, height, width, channels]` shape.
        shape: [usize; 4],
        /// Element count the shape implies.
        expected: usize,
        /// Element count actually provided.
        actual: usize,
    },

    /// Resize targets must be non-zero in both dimensions.
    #[error("resize target {width}x{height} must be non-zero")]
    EmptyTarget {
        /// Requested output width.
        width: usize,
        /// Requested output height.
        height: usize,
    },

    /// Resizing an image with no pixels is meaningless.
    #[error("cannot resize an empty image")]
    EmptySource,

    /// Decoding failed; the underlying open failure propagates unchanged.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Top-level error type for trellis.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum TrellisError {
    /// Schema contract violation at definition time.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Unresolvable type tag at definition time.
    #[error("unsupported type: {0}")]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// Registry-level registration failure.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Runtime node failure.
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    /// Image collaborator failure.
    #[error("image error: {0}")]
    Image(#[from] ImageOpError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for trellis operations.
pub type TrellisResult<T> = Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages_name_the_parameter() {
        let err = SchemaError::MissingDefault {
            parameter: "radius".to_string(),
            tag: TypeTag::Float,
        };
        let msg = err.to_string();
        assert!(msg.contains("radius"));
        assert!(msg.contains("FLOAT"));
    }

    #[test]
    fn test_unsupported_type_names_the_tag() {
        let err = UnsupportedTypeError {
            node: "image_resize".to_string(),
            slot: "image".to_string(),
            tag: "MASK".to_string(),
        };
        assert!(err.to_string().contains("MASK"));
        assert!(err.to_string().contains("image_resize.image"));
    }

    #[test]
    fn test_registry_error_wraps_unsupported_type() {
        let err: RegistryError = UnsupportedTypeError {
            node: "n".to_string(),
            slot: "output[0]".to_string(),
            tag: "LATENT".to_string(),
        }
        .into();
        assert!(matches!(err, RegistryError::UnsupportedType(_)));
    }
}
