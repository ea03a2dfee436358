//! Runtime values and the type-tag vocabulary.
//!
//! The tag vocabulary is deliberately split: the three primitive tags are
//! enum variants so exhaustive matching catches missing cases at compile
//! time, while host-defined value kinds stay open-ended strings. Unknown
//! custom tags are a detectable condition at registration time (see
//! [`NodeRegistry::register_kind`](crate::registry::NodeRegistry::register_kind)),
//! not silently forwarded text.

use crate::image::tensor::ImageTensor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The custom value kind used by the built-in image nodes.
pub const IMAGE_KIND: &str = "IMAGE";

/// Label identifying what kind of value an input or output slot carries.
///
/// Either one of the three reserved primitive kinds or an open-ended
/// custom string naming a host-defined value kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 64-bit signed integer (`"INT"` on the wire).
    Integer,
    /// 64-bit floating point number (`"FLOAT"` on the wire).
    Float,
    /// UTF-8 text (`"STRING"` on the wire).
    Text,
    /// Host-defined value kind, passed through verbatim.
    Custom(String),
}

impl TypeTag {
    /// Create a custom tag.
    pub fn custom(tag: impl Into<String>) -> Self {
        TypeTag::Custom(tag.into())
    }

    /// The wire form of this tag as the host sees it.
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Integer => "INT",
            TypeTag::Float => "FLOAT",
            TypeTag::Text => "STRING",
            TypeTag::Custom(tag) => tag,
        }
    }

    /// Whether this is one of the three reserved primitive tags.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeTag::Custom(_))
    }

    /// Parse a wire-form tag. Unreserved strings become custom tags.
    pub fn from_wire(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match raw.as_str() {
            "INT" => TypeTag::Integer,
            "FLOAT" => TypeTag::Float,
            "STRING" => TypeTag::Text,
            _ => TypeTag::Custom(raw),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(TypeTag::from_wire(String::deserialize(deserializer)?))
    }
}

/// Payload for a host-defined value kind the core does not interpret.
///
/// The core only forwards these; typed access is the host's concern via
/// [`OpaqueValue::downcast_ref`].
#[derive(Clone)]
pub struct OpaqueValue {
    kind: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Wrap a host payload under a custom kind tag.
    pub fn new(kind: impl Into<String>, payload: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// The custom kind tag this payload carries.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attempt to downcast the payload to a concrete host type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("kind", &self.kind)
            .field("payload", &"<host payload>")
            .finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        // Payloads compare by identity; the core cannot inspect them.
        self.kind == other.kind && Arc::ptr_eq(&self.payload, &other.payload)
    }
}

/// Runtime values that flow into and out of node bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Normalized image tensor (batch-of-one NHWC, values in `[0, 1]`)
    Image(ImageTensor),
    /// Host-defined payload under a custom kind
    Opaque(OpaqueValue),
}

impl Value {
    /// The type tag this value carries.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Text(_) => TypeTag::Text,
            Value::Image(_) => TypeTag::custom(IMAGE_KIND),
            Value::Opaque(opaque) => TypeTag::custom(opaque.kind()),
        }
    }

    /// The wire-form name of this value's kind.
    pub fn kind(&self) -> &str {
        match self {
            Value::Integer(_) => "INT",
            Value::Float(_) => "FLOAT",
            Value::Text(_) => "STRING",
            Value::Image(_) => IMAGE_KIND,
            Value::Opaque(opaque) => opaque.kind(),
        }
    }

    /// Try to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Try to get this value as a float.
    /// Integers are automatically widened to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Try to get this value as an image tensor reference.
    pub fn as_image(&self) -> Option<&ImageTensor> {
        if let Value::Image(img) = self {
            Some(img)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:.4}", fl),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Image(img) => {
                write!(f, "Image({}x{})", img.width(), img.height())
            }
            Value::Opaque(opaque) => write!(f, "Opaque({})", opaque.kind()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<ImageTensor> for Value {
    fn from(value: ImageTensor) -> Self {
        Value::Image(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_wire_form() {
        assert_eq!(TypeTag::Integer.as_str(), "INT");
        assert_eq!(TypeTag::Float.as_str(), "FLOAT");
        assert_eq!(TypeTag::Text.as_str(), "STRING");
        assert_eq!(TypeTag::custom("LATENT").as_str(), "LATENT");
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in [
            TypeTag::Integer,
            TypeTag::Float,
            TypeTag::Text,
            TypeTag::custom(IMAGE_KIND),
        ] {
            assert_eq!(TypeTag::from_wire(tag.as_str()), tag);
        }
    }

    #[test]
    fn test_tag_json_is_plain_string() {
        let json = serde_json::to_string(&TypeTag::custom("IMAGE")).unwrap();
        assert_eq!(json, "\"IMAGE\"");
        let json = serde_json::to_string(&TypeTag::Integer).unwrap();
        assert_eq!(json, "\"INT\"");
    }

    #[test]
    fn test_value_float_widening() {
        assert_eq!(Value::Integer(5).as_float(), Some(5.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Text("x".to_string()).as_float(), None);
    }

    #[test]
    fn test_opaque_identity_equality() {
        let payload: Arc<dyn Any + Send + Sync> = Arc::new(7u32);
        let a = OpaqueValue::new("LATENT", Arc::clone(&payload));
        let b = OpaqueValue::new("LATENT", Arc::clone(&payload));
        let c = OpaqueValue::new("LATENT", Arc::new(7u32));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<u32>(), Some(&7));
    }
}
