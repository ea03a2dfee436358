//! Input/output schema grammar and constraint records.
//!
//! A node's input schema is an ordered name → slot mapping; the output
//! schema is an ordered tag sequence with no per-slot constraints. Slots
//! for the three primitive tags carry the constraint record the host
//! renders into widgets; custom slots carry only their tag.

use crate::core::error::SchemaError;
use crate::core::types::{TypeTag, Value};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Lower bound of the fixed wide integer range given to synthesized inputs.
pub const INT_RANGE_MIN: i64 = -99_999_999_999_999_999;
/// Upper bound of the fixed wide integer range given to synthesized inputs.
pub const INT_RANGE_MAX: i64 = 99_999_999_999_999_999;
/// Lower bound of the fixed wide float range given to synthesized inputs.
pub const FLOAT_RANGE_MIN: f64 = -99_999_999_999_999_999.0;
/// Upper bound of the fixed wide float range given to synthesized inputs.
pub const FLOAT_RANGE_MAX: f64 = 99_999_999_999_999_999.0;

/// Constraint record for an `INT` input: `{default, min, max}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntConstraints {
    /// Declared default value.
    pub default: i64,
    /// Minimum accepted value.
    pub min: i64,
    /// Maximum accepted value.
    pub max: i64,
}

impl IntConstraints {
    /// The record synthesis produces: declared default, fixed wide range.
    pub fn wide(default: i64) -> Self {
        Self {
            default,
            min: INT_RANGE_MIN,
            max: INT_RANGE_MAX,
        }
    }
}

/// Constraint record for a `FLOAT` input: `{default, min, max}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatConstraints {
    /// Declared default value.
    pub default: f64,
    /// Minimum accepted value.
    pub min: f64,
    /// Maximum accepted value.
    pub max: f64,
}

impl FloatConstraints {
    /// The record synthesis produces: declared default, fixed wide range.
    pub fn wide(default: f64) -> Self {
        Self {
            default,
            min: FLOAT_RANGE_MIN,
            max: FLOAT_RANGE_MAX,
        }
    }
}

/// Constraint record for a `STRING` input: `{default, multiline}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextConstraints {
    /// Declared default value.
    pub default: String,
    /// Whether the host should render a multiline editor.
    pub multiline: bool,
}

impl TextConstraints {
    /// The record synthesis produces: declared default, single-line.
    pub fn single_line(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            multiline: false,
        }
    }
}

/// One entry of a node's input schema: a type tag plus, for primitive
/// tags, the constraint record.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSlot {
    /// `INT` input with `{default, min, max}`.
    Integer(IntConstraints),
    /// `FLOAT` input with `{default, min, max}`.
    Float(FloatConstraints),
    /// `STRING` input with `{default, multiline}`.
    Text(TextConstraints),
    /// Custom-tagged input; tag forwarded verbatim, no constraints.
    Custom(String),
}

impl InputSlot {
    /// The type tag this slot carries.
    pub fn tag(&self) -> TypeTag {
        match self {
            InputSlot::Integer(_) => TypeTag::Integer,
            InputSlot::Float(_) => TypeTag::Float,
            InputSlot::Text(_) => TypeTag::Text,
            InputSlot::Custom(tag) => TypeTag::custom(tag.clone()),
        }
    }
}

// Host-facing wire form: a flat map with the tag alongside the
// constraint fields, e.g. {"tag":"INT","default":0,"min":...,"max":...}.
impl Serialize for InputSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("tag", &self.tag())?;
        match self {
            InputSlot::Integer(c) => {
                map.serialize_entry("default", &c.default)?;
                map.serialize_entry("min", &c.min)?;
                map.serialize_entry("max", &c.max)?;
            }
            InputSlot::Float(c) => {
                map.serialize_entry("default", &c.default)?;
                map.serialize_entry("min", &c.min)?;
                map.serialize_entry("max", &c.max)?;
            }
            InputSlot::Text(c) => {
                map.serialize_entry("default", &c.default)?;
                map.serialize_entry("multiline", &c.multiline)?;
            }
            InputSlot::Custom(_) => {}
        }
        map.end()
    }
}

/// Ordered mapping from parameter name to input slot.
pub type InputSchema = IndexMap<String, InputSlot>;

/// A typed parameter declaration accepted by the node builder.
///
/// Defaults are optional on every variant so that the synthesis rules
/// (default required for primitives, forbidden for custom tags) stay
/// observable checks with clear failure modes rather than states the
/// API silently prevents.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDecl {
    /// `INT` parameter.
    Integer {
        /// Declared default, if any.
        default: Option<i64>,
    },
    /// `FLOAT` parameter.
    Float {
        /// Declared default, if any.
        default: Option<f64>,
    },
    /// `STRING` parameter.
    Text {
        /// Declared default, if any.
        default: Option<String>,
    },
    /// Custom-tagged parameter.
    Custom {
        /// The host-defined kind tag, forwarded verbatim.
        tag: String,
        /// Declared default, if any (always a schema error).
        default: Option<Value>,
    },
}

impl ParamDecl {
    /// An `INT` parameter with a default.
    pub fn int(default: i64) -> Self {
        ParamDecl::Integer {
            default: Some(default),
        }
    }

    /// A `FLOAT` parameter with a default.
    pub fn float(default: f64) -> Self {
        ParamDecl::Float {
            default: Some(default),
        }
    }

    /// A `STRING` parameter with a default.
    pub fn text(default: impl Into<String>) -> Self {
        ParamDecl::Text {
            default: Some(default.into()),
        }
    }

    /// A custom-tagged parameter (no default permitted).
    pub fn custom(tag: impl Into<String>) -> Self {
        ParamDecl::Custom {
            tag: tag.into(),
            default: None,
        }
    }

    /// Derive the input slot for this declaration.
    ///
    /// This is the per-parameter half of the synthesis contract:
    /// primitives require a default and receive the fixed wide range,
    /// custom tags forbid a default and pass through verbatim.
    pub(crate) fn into_slot(self, parameter: &str) -> Result<InputSlot, SchemaError> {
        match self {
            ParamDecl::Integer { default: Some(d) } => {
                Ok(InputSlot::Integer(IntConstraints::wide(d)))
            }
            ParamDecl::Integer { default: None } => Err(SchemaError::MissingDefault {
                parameter: parameter.to_string(),
                tag: TypeTag::Integer,
            }),
            ParamDecl::Float { default: Some(d) } => {
                Ok(InputSlot::Float(FloatConstraints::wide(d)))
            }
            ParamDecl::Float { default: None } => Err(SchemaError::MissingDefault {
                parameter: parameter.to_string(),
                tag: TypeTag::Float,
            }),
            ParamDecl::Text { default: Some(d) } => {
                Ok(InputSlot::Text(TextConstraints::single_line(d)))
            }
            ParamDecl::Text { default: None } => Err(SchemaError::MissingDefault {
                parameter: parameter.to_string(),
                tag: TypeTag::Text,
            }),
            ParamDecl::Custom { tag, default: None } => Ok(InputSlot::Custom(tag)),
            ParamDecl::Custom {
                tag,
                default: Some(_),
            } => Err(SchemaError::ForbiddenDefault {
                parameter: parameter.to_string(),
                tag,
            }),
        }
    }
}
