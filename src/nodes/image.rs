//! Image loading and resizing nodes.

use crate::core::descriptor::NodeDescriptor;
use crate::core::error::TrellisError;
use crate::core::types::{TypeTag, Value, IMAGE_KIND};
use crate::image::{resize, ImageTensor, Interpolation};
use crate::registry::NodeRegistry;

/// Register the `image` node family.
pub fn register(registry: &mut NodeRegistry) -> Result<(), TrellisError> {
    NodeDescriptor::builder("load_image_rgb", "Image Load RGB")
        .category("image")
        .text_param("path", "./image.png")
        .output(TypeTag::custom(IMAGE_KIND))
        .body(|args| {
            let path = args.text("path")?;
            let tensor = ImageTensor::from_path(path)?;
            Ok(vec![Value::Image(tensor)])
        })
        .register(registry)?;

    NodeDescriptor::builder("image_resize", "Image Resize")
        .category("image")
        .custom_param("image", IMAGE_KIND)
        .int_param("height", 512)
        .int_param("width", 512)
        .text_param("interpolation_mode", "bicubic")
        .output(TypeTag::custom(IMAGE_KIND))
        .body(|mut args| {
            let mode: Interpolation = args.text("interpolation_mode")?.parse()?;
            // Non-positive dimensions fall through to the empty-target check.
            let height = args.integer("height")?.max(0) as usize;
            let width = args.integer("width")?.max(0) as usize;
            let image = args.take_image("image")?;
            let out = resize(&image, width, height, mode)?;
            Ok(vec![Value::Image(out)])
        })
        .register(registry)?;

    Ok(())
}
