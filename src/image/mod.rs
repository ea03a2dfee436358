//! Image utility wrappers around the `image` crate.
//!
//! These are thin collaborator shims, not a design subject: loading a
//! file into the normalized tensor representation, permuting between
//! interleaved and channel-first layouts, and resizing under a named
//! interpolation policy.

pub mod resize;
pub mod tensor;

pub use resize::{resize, Interpolation};
pub use tensor::{ImageTensor, PlanarImage};
