//! Resampling under a named interpolation policy.
//!
//! [`resize`] brackets the operation in layout permutations: the
//! interleaved input is converted to channel planes, each plane is
//! resampled independently, and the result is converted back. The
//! filter-backed modes delegate plane-wise to `image::imageops`; only
//! "nearest exact" has no library counterpart and is sampled by hand.

use crate::core::error::ImageOpError;
use crate::image::tensor::{ImageTensor, PlanarImage};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use std::fmt;
use std::str::FromStr;

/// Interpolation policy for [`resize`].
///
/// Parsed from the host-facing mode strings; an unrecognized string is a
/// hard error, never a silent fallback to some default filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Catmull-Rom cubic filter.
    Bicubic,
    /// Linear (triangle) filter.
    Bilinear,
    /// Library nearest-neighbor filter.
    Nearest,
    /// Pixel-center nearest sampling, matching the "exact" variant of
    /// nearest-neighbor: source index `floor((dst + 0.5) * scale)`.
    NearestExact,
}

impl Interpolation {
    /// All modes, in the order the host menus present them.
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Bicubic,
        Interpolation::Bilinear,
        Interpolation::Nearest,
        Interpolation::NearestExact,
    ];

    /// The canonical mode string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Bicubic => "bicubic",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Nearest => "nearest",
            Interpolation::NearestExact => "nearest exact",
        }
    }

    /// The library filter backing this mode, if one exists.
    fn filter(&self) -> Option<FilterType> {
        match self {
            Interpolation::Bicubic => Some(FilterType::CatmullRom),
            Interpolation::Bilinear => Some(FilterType::Triangle),
            Interpolation::Nearest => Some(FilterType::Nearest),
            Interpolation::NearestExact => None,
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = ImageOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bicubic" => Ok(Interpolation::Bicubic),
            "bilinear" => Ok(Interpolation::Bilinear),
            "nearest" => Ok(Interpolation::Nearest),
            "nearest exact" | "nearest-exact" | "nearest_exact" => Ok(Interpolation::NearestExact),
            other => Err(ImageOpError::UnknownInterpolation(other.to_string())),
        }
    }
}

type Plane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Resize a batch to the given target dimensions.
pub fn resize(
    image: &ImageTensor,
    width: usize,
    height: usize,
    mode: Interpolation,
) -> Result<ImageTensor, ImageOpError> {
    if width == 0 || height == 0 {
        return Err(ImageOpError::EmptyTarget { width, height });
    }
    let [batch, src_h, src_w, channels] = image.shape();
    if src_h == 0 || src_w == 0 {
        return Err(ImageOpError::EmptySource);
    }

    let planar = image.to_planar();
    let plane_len = src_h * src_w;
    let mut resampled = Vec::with_capacity(batch * channels * height * width);

    for plane in planar.data().chunks_exact(plane_len) {
        match mode.filter() {
            Some(filter) => {
                let buffer = Plane::from_raw(src_w as u32, src_h as u32, plane.to_vec())
                    .ok_or(ImageOpError::ShapeMismatch {
                        shape: [batch, channels, src_h, src_w],
                        expected: plane_len,
                        actual: plane.len(),
                    })?;
                let out = imageops::resize(&buffer, width as u32, height as u32, filter);
                resampled.extend_from_slice(out.as_raw());
            }
            None => sample_nearest_exact(plane, src_w, src_h, width, height, &mut resampled),
        }
    }

    let planar = PlanarImage::from_raw(resampled, [batch, channels, height, width])?;
    Ok(planar.to_interleaved())
}

/// Nearest sampling with pixel-center alignment.
fn sample_nearest_exact(
    plane: &[f32],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    out: &mut Vec<f32>,
) {
    let scale_x = src_w as f32 / dst_w as f32;
    let scale_y = src_h as f32 / dst_h as f32;
    for y in 0..dst_h {
        let sy = (((y as f32 + 0.5) * scale_y) as usize).min(src_h - 1);
        for x in 0..dst_w {
            let sx = (((x as f32 + 0.5) * scale_x) as usize).min(src_w - 1);
            out.push(plane[sy * src_w + sx]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> ImageTensor {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let v = (y * width + x) as f32 / (width * height) as f32;
                data.extend_from_slice(&[v, v * 0.5, 1.0 - v]);
            }
        }
        ImageTensor::from_raw(data, [1, height, width, 3]).unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("bicubic".parse::<Interpolation>().unwrap(), Interpolation::Bicubic);
        assert_eq!("bilinear".parse::<Interpolation>().unwrap(), Interpolation::Bilinear);
        assert_eq!("nearest".parse::<Interpolation>().unwrap(), Interpolation::Nearest);
        for alias in ["nearest exact", "nearest-exact", "nearest_exact"] {
            assert_eq!(
                alias.parse::<Interpolation>().unwrap(),
                Interpolation::NearestExact
            );
        }

        let err = "lanczos".parse::<Interpolation>().unwrap_err();
        assert!(matches!(
            err,
            ImageOpError::UnknownInterpolation(mode) if mode == "lanczos"
        ));
    }

    #[test]
    fn test_resize_shape_and_range() {
        let src = gradient(8, 6);
        for mode in Interpolation::ALL {
            let out = resize(&src, 4, 3, mode).unwrap();
            assert_eq!(out.shape(), [1, 3, 4, 3], "mode {}", mode);
            assert!(
                out.data().iter().all(|v| (0.0..=1.0).contains(v)),
                "mode {} left the unit range",
                mode
            );
        }
    }

    #[test]
    fn test_identity_resize_is_lossless_for_nearest() {
        let src = gradient(5, 4);
        for mode in [Interpolation::Nearest, Interpolation::NearestExact] {
            let out = resize(&src, 5, 4, mode).unwrap();
            assert_eq!(out, src, "mode {}", mode);
        }
    }

    #[test]
    fn test_nearest_exact_picks_pixel_centers() {
        // 1x1x4x1 row [0, 1, 2, 3] downsampled to width 2: centers land
        // on source columns 1 and 3.
        let src = ImageTensor::from_raw(vec![0.0, 1.0, 2.0, 3.0], [1, 1, 4, 1]).unwrap();
        let out = resize(&src, 2, 1, Interpolation::NearestExact).unwrap();
        assert_eq!(out.data(), &[1.0, 3.0]);
    }

    #[test]
    fn test_empty_target_rejected() {
        let src = gradient(4, 4);
        assert!(matches!(
            resize(&src, 0, 4, Interpolation::Bilinear),
            Err(ImageOpError::EmptyTarget { width: 0, height: 4 })
        ));
        assert!(matches!(
            resize(&src, 4, 0, Interpolation::Bilinear),
            Err(ImageOpError::EmptyTarget { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_empty_source_rejected() {
        let src = ImageTensor::from_raw(Vec::new(), [1, 0, 0, 3]).unwrap();
        assert!(matches!(
            resize(&src, 4, 4, Interpolation::Bilinear),
            Err(ImageOpError::EmptySource)
        ));
    }

    #[test]
    fn test_batch_planes_resampled_independently() {
        // Two single-channel images with constant but different values.
        let mut data = vec![0.25; 4];
        data.extend(vec![0.75; 4]);
        let src = ImageTensor::from_raw(data, [2, 2, 2, 1]).unwrap();

        let out = resize(&src, 3, 3, Interpolation::Bilinear).unwrap();
        assert_eq!(out.shape(), [2, 3, 3, 1]);
        let (first, second) = out.data().split_at(9);
        assert!(first.iter().all(|v| (v - 0.25).abs() < 1e-6));
        assert!(second.iter().all(|v| (v - 0.75).abs() < 1e-6));
    }
}
