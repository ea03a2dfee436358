//! The built-in node pack.
//!
//! Two families: scalar arithmetic and conversion nodes under the
//! `math` category, and image loading/resizing under `image`. Every
//! node is declared through [`NodeDescriptor::builder`] and registered
//! by [`register_all`].
//!
//! [`NodeDescriptor::builder`]: crate::core::descriptor::NodeDescriptor::builder

pub mod image;
pub mod math;

use crate::core::error::TrellisError;
use crate::core::types::IMAGE_KIND;
use crate::registry::NodeRegistry;

/// Register the full built-in node set.
///
/// Declares the `IMAGE` value kind first so the image nodes' custom
/// tags resolve, then registers both families in declaration order.
pub fn register_all(registry: &mut NodeRegistry) -> Result<(), TrellisError> {
    registry.register_kind(IMAGE_KIND)?;
    math::register(registry)?;
    image::register(registry)?;
    log::info!("registered {} built-in nodes", registry.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_is_complete() {
        let mut registry = NodeRegistry::new();
        register_all(&mut registry).unwrap();

        assert_eq!(registry.len(), 14);
        assert_eq!(registry.by_category("math").len(), 12);
        assert_eq!(registry.by_category("image").len(), 2);
        assert!(registry.known_kind(IMAGE_KIND));
    }

    #[test]
    fn test_register_all_twice_collides() {
        let mut registry = NodeRegistry::new();
        register_all(&mut registry).unwrap();
        assert!(register_all(&mut registry).is_err());
    }
}
