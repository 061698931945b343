//! Grayscale intensity matrix with a declared gray-level range

use crate::error::{Error, Result};
use crate::raster::Raster;
use ndarray::Array2;

/// A `width × height` matrix of integer intensities.
///
/// Every pixel lies in `[0, max_gray)`; `max_gray` is an exclusive upper
/// bound and doubles as the side length of the co-occurrence matrix built
/// from this image. `x` indexes the first axis (`width`), `y` the second
/// (`height`).
///
/// LBP code maps are `GrayscaleMatrix` values too: their `max_gray` is the
/// number of codes the variant can produce.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleMatrix {
    pixels: Raster<u32>,
    max_gray: u32,
}

impl GrayscaleMatrix {
    /// Wrap a pixel matrix, validating dimensions and the intensity range.
    pub fn new(pixels: Raster<u32>, max_gray: u32) -> Result<Self> {
        if pixels.is_empty() {
            let (width, height) = pixels.shape();
            return Err(Error::InvalidDimensions { width, height });
        }
        if max_gray == 0 {
            return Err(Error::invalid_parameter(
                "max_gray",
                max_gray,
                "must be > 0",
            ));
        }

        if let Some(((x, y), &value)) = pixels
            .data()
            .indexed_iter()
            .find(|(_, v)| **v >= max_gray)
        {
            return Err(Error::IntensityOutOfRange {
                x,
                y,
                value,
                max_gray,
            });
        }

        Ok(Self { pixels, max_gray })
    }

    /// Build from row-major data (`width` rows of `height` values).
    pub fn from_vec(data: Vec<u32>, width: usize, height: usize, max_gray: u32) -> Result<Self> {
        Self::new(Raster::from_vec(data, width, height)?, max_gray)
    }

    /// Build from an ndarray of shape `(width, height)`.
    pub fn from_array(data: Array2<u32>, max_gray: u32) -> Result<Self> {
        Self::new(Raster::from_array(data), max_gray)
    }

    /// A matrix where every pixel holds `value`.
    pub fn filled(width: usize, height: usize, value: u32, max_gray: u32) -> Result<Self> {
        Self::new(Raster::filled(width, height, value), max_gray)
    }

    /// Extent of the first axis
    pub fn width(&self) -> usize {
        self.pixels.rows()
    }

    /// Extent of the second axis
    pub fn height(&self) -> usize {
        self.pixels.cols()
    }

    /// Exclusive upper bound on intensities
    pub fn max_gray(&self) -> u32 {
        self.max_gray
    }

    /// Number of gray levels as an index extent
    pub fn levels(&self) -> usize {
        self.max_gray as usize
    }

    /// Intensity at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Result<u32> {
        self.pixels.get(x, y)
    }

    /// Intensity at (x, y); the caller guarantees the index is in range.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u32 {
        self.pixels.data()[(x, y)]
    }

    /// The underlying pixel matrix
    pub fn pixels(&self) -> &Raster<u32> {
        &self.pixels
    }

    /// Mean intensity over all pixels
    pub fn mean_intensity(&self) -> f64 {
        self.pixels.statistics().mean.unwrap_or(0.0)
    }

    /// Rescale intensities to `[0, levels)`.
    ///
    /// Each pixel maps to `v * levels / max_gray` (integer arithmetic), so the
    /// relative ordering of intensities is preserved.
    pub fn quantize(&self, levels: u32) -> Result<Self> {
        if levels == 0 {
            return Err(Error::invalid_parameter("levels", levels, "must be > 0"));
        }
        if levels == self.max_gray {
            return Ok(self.clone());
        }

        let from = self.max_gray as u64;
        let to = levels as u64;
        let data = self
            .pixels
            .data()
            .mapv(|v| ((v as u64 * to) / from) as u32);

        Ok(Self {
            pixels: Raster::from_array(data),
            max_gray: levels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        let err = GrayscaleMatrix::from_vec(vec![0, 1, 2, 8], 2, 2, 8).unwrap_err();
        match err {
            Error::IntensityOutOfRange { x, y, value, max_gray } => {
                assert_eq!((x, y, value, max_gray), (1, 1, 8, 8));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_empty_and_zero_levels() {
        assert!(matches!(
            GrayscaleMatrix::from_vec(vec![], 0, 3, 8),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GrayscaleMatrix::filled(2, 2, 0, 0),
            Err(Error::InvalidParameter { name: "max_gray", .. })
        ));
    }

    #[test]
    fn test_axes() {
        let m = GrayscaleMatrix::from_vec(vec![0, 1, 2, 3, 4, 5], 2, 3, 6).unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.height(), 3);
        assert_eq!(m.at(1, 0), 3);
        assert_eq!(m.get(0, 2).unwrap(), 2);
    }

    #[test]
    fn test_quantize_down() {
        let m = GrayscaleMatrix::from_vec(vec![0, 63, 64, 255], 2, 2, 256).unwrap();
        let q = m.quantize(8).unwrap();
        assert_eq!(q.max_gray(), 8);
        assert_eq!(q.pixels().data().iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 7]);
    }

    #[test]
    fn test_quantize_up_stays_in_range() {
        let m = GrayscaleMatrix::from_vec(vec![0, 1, 2, 3], 2, 2, 4).unwrap();
        let q = m.quantize(16).unwrap();
        assert!(q.pixels().data().iter().all(|&v| v < 16));
        assert_eq!(q.at(1, 1), 12);
    }

    #[test]
    fn test_mean_intensity() {
        let m = GrayscaleMatrix::from_vec(vec![2, 4, 6, 8], 2, 2, 9).unwrap();
        assert_eq!(m.mean_intensity(), 5.0);
    }
}
