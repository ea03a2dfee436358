//! Normalized image tensors and layout permutation.
//!
//! The host-facing representation is [`ImageTensor`]: batch-of-one NHWC
//! (height × width × channel, interleaved) `f32` data in `[0, 1]`.
//! Resampling operates on the channel-first [`PlanarImage`] layout; the
//! permutation in both directions lives here so operations can bracket
//! correctly (convert in, operate, convert out).

use crate::core::error::ImageOpError;
use std::fmt;
use std::path::Path;

/// Batch of images in interleaved NHWC layout, `f32` values in `[0, 1]`.
#[derive(Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    /// `[batch, height, width, channels]`
    shape: [usize; 4],
}

impl ImageTensor {
    /// Wrap raw interleaved data, checking it against the shape.
    pub fn from_raw(data: Vec<f32>, shape: [usize; 4]) -> Result<Self, ImageOpError> {
        let expected = shape.iter().product();
        if data.len() != expected {
            return Err(ImageOpError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// An all-zero tensor of the given shape.
    pub fn zeros(batch: usize, height: usize, width: usize, channels: usize) -> Self {
        Self {
            data: vec![0.0; batch * height * width * channels],
            shape: [batch, height, width, channels],
        }
    }

    /// Load an image file into a batch-of-one RGB tensor.
    ///
    /// Decodes via the `image` crate, drops any alpha channel, and
    /// normalizes 8-bit samples to `[0, 1]`. Open/decode failures
    /// propagate unchanged.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageOpError> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = rgb
            .into_raw()
            .into_iter()
            .map(|sample| f32::from(sample) / 255.0)
            .collect();
        Self::from_raw(data, [1, height as usize, width as usize, 3])
    }

    /// `[batch, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Number of images in the batch.
    pub fn batch(&self) -> usize {
        self.shape[0]
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.shape[1]
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.shape[2]
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.shape[3]
    }

    /// The interleaved sample data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume the tensor, returning the interleaved sample data.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Sample accessor. Panics on out-of-range indices.
    pub fn get(&self, image: usize, y: usize, x: usize, channel: usize) -> f32 {
        let [_, h, w, c] = self.shape;
        self.data[((image * h + y) * w + x) * c + channel]
    }

    /// Permute to the channel-first layout.
    pub fn to_planar(&self) -> PlanarImage {
        let [b, h, w, c] = self.shape;
        let mut data = vec![0.0f32; self.data.len()];
        for n in 0..b {
            for y in 0..h {
                for x in 0..w {
                    for ch in 0..c {
                        data[((n * c + ch) * h + y) * w + x] =
                            self.data[((n * h + y) * w + x) * c + ch];
                    }
                }
            }
        }
        PlanarImage {
            data,
            shape: [b, c, h, w],
        }
    }
}

// Debug prints the shape, never the sample data.
impl fmt::Debug for ImageTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageTensor{:?}", self.shape)
    }
}

/// Batch of images in channel-first NCHW layout.
///
/// The working layout for per-channel resampling; produced by
/// [`ImageTensor::to_planar`] and converted back with
/// [`PlanarImage::to_interleaved`].
#[derive(Clone, PartialEq)]
pub struct PlanarImage {
    data: Vec<f32>,
    /// `[batch, channels, height, width]`
    shape: [usize; 4],
}

impl PlanarImage {
    /// Wrap raw channel-first data, checking it against the shape.
    pub fn from_raw(data: Vec<f32>, shape: [usize; 4]) -> Result<Self, ImageOpError> {
        let expected = shape.iter().product();
        if data.len() != expected {
            return Err(ImageOpError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// `[batch, channels, height, width]`
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// The channel-plane sample data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Permute back to the interleaved layout.
    pub fn to_interleaved(&self) -> ImageTensor {
        let [b, c, h, w] = self.shape;
        let mut data = vec![0.0f32; self.data.len()];
        for n in 0..b {
            for ch in 0..c {
                for y in 0..h {
                    for x in 0..w {
                        data[((n * h + y) * w + x) * c + ch] =
                            self.data[((n * c + ch) * h + y) * w + x];
                    }
                }
            }
        }
        ImageTensor {
            data,
            shape: [b, h, w, c],
        }
    }
}

impl fmt::Debug for PlanarImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanarImage{:?}", self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_shape() {
        assert!(ImageTensor::from_raw(vec![0.0; 12], [1, 2, 2, 3]).is_ok());
        assert!(matches!(
            ImageTensor::from_raw(vec![0.0; 11], [1, 2, 2, 3]),
            Err(ImageOpError::ShapeMismatch {
                expected: 12,
                actual: 11,
                ..
            })
        ));
    }

    #[test]
    fn test_layout_round_trip() {
        // 1x2x2x3: distinct value per sample so permutation errors show.
        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let tensor = ImageTensor::from_raw(data, [1, 2, 2, 3]).unwrap();

        let planar = tensor.to_planar();
        assert_eq!(planar.shape(), [1, 3, 2, 2]);
        // First channel plane holds samples 0, 3, 6, 9.
        assert_eq!(&planar.data()[..4], &[0.0, 3.0, 6.0, 9.0]);

        assert_eq!(planar.to_interleaved(), tensor);
    }

    #[test]
    fn test_sample_accessor() {
        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let tensor = ImageTensor::from_raw(data, [1, 2, 2, 3]).unwrap();
        assert_eq!(tensor.get(0, 0, 0, 0), 0.0);
        assert_eq!(tensor.get(0, 0, 1, 2), 5.0);
        assert_eq!(tensor.get(0, 1, 1, 1), 10.0);
    }

    #[test]
    fn test_load_from_disk_normalizes() {
        use image::{Rgb, RgbImage};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        let mut img = RgbImage::new(2, 3);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([255, 0, 128]);
        }
        img.save(&path).unwrap();

        let tensor = ImageTensor::from_path(&path).unwrap();
        assert_eq!(tensor.shape(), [1, 3, 2, 3]);
        assert_eq!(tensor.get(0, 0, 0, 0), 1.0);
        assert_eq!(tensor.get(0, 0, 0, 1), 0.0);
        assert!((tensor.get(0, 0, 0, 2) - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file_propagates_open_failure() {
        let err = ImageTensor::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, ImageOpError::Decode(_)));
    }
}
