//! Gray-Level Co-occurrence Matrix (GLCM) texture features
//!
//! Builds the co-occurrence matrix of a whole image at one offset and reduces
//! it to the 13 Haralick descriptors. Callers should quantize the image to a
//! small number of gray levels first; the matrix is `max_gray × max_gray`.

use texturefeat_core::raster::{Direction, GrayscaleMatrix};
use texturefeat_core::{Algorithm, Error, Result};

use super::cooccurrence::cooccurrence_matrix;
use super::haralick::{haralick_features, HaralickFeatures, FEATURE_COUNT};

/// Parameters for GLCM computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlcmParams {
    /// Distance for co-occurrence (default: 1)
    pub distance: usize,
    /// Offset direction (default: 0°)
    pub direction: Direction,
}

impl Default for GlcmParams {
    fn default() -> Self {
        Self {
            distance: 1,
            direction: Direction::Deg0,
        }
    }
}

/// GLCM + Haralick algorithm
#[derive(Debug, Clone, Default)]
pub struct Glcm;

impl Algorithm for Glcm {
    type Input = GrayscaleMatrix;
    type Output = HaralickFeatures;
    type Params = GlcmParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GLCM"
    }

    fn description(&self) -> &'static str {
        "Haralick descriptors of the gray-level co-occurrence matrix"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        glcm_features(&input, params)
    }
}

/// Compute the Haralick descriptors of an image at one offset.
///
/// # Arguments
/// * `image` - Input intensities
/// * `params` - Co-occurrence distance and direction
pub fn glcm_features(image: &GrayscaleMatrix, params: GlcmParams) -> Result<HaralickFeatures> {
    let glcm = cooccurrence_matrix(image, params.distance, params.direction)?;
    haralick_features(&glcm)
}

/// Descriptors for all four directions at one distance, concatenated in
/// 0°, 45°, 90°, 135° order (`4 × 13` values).
pub fn glcm_features_all_directions(image: &GrayscaleMatrix, distance: usize) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(Direction::ALL.len() * FEATURE_COUNT);
    for direction in Direction::ALL {
        let features = glcm_features(image, GlcmParams { distance, direction })?;
        out.extend_from_slice(features.as_slice());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::haralick::HaralickFeature;
    use approx::assert_relative_eq;

    fn gradient_image(size: usize, levels: u32) -> GrayscaleMatrix {
        let data = (0..size * size)
            .map(|i| ((i / size + i % size) as u32) % levels)
            .collect();
        GrayscaleMatrix::from_vec(data, size, size, levels).unwrap()
    }

    #[test]
    fn test_glcm_uniform_image() {
        let img = GrayscaleMatrix::filled(4, 4, 5, 8).unwrap();
        let f = glcm_features(&img, GlcmParams::default()).unwrap();
        assert_relative_eq!(f.get(HaralickFeature::AngularSecondMoment), 1.0);
        assert_relative_eq!(f.get(HaralickFeature::InverseDifferenceMoment), 1.0);
    }

    #[test]
    fn test_glcm_contrast_gradient() {
        let img = gradient_image(16, 16);
        let f = glcm_features(&img, GlcmParams::default()).unwrap();
        assert!(
            f.get(HaralickFeature::Contrast) > 0.0,
            "Gradient should have contrast > 0, got {}",
            f.get(HaralickFeature::Contrast)
        );
        assert!(f.get(HaralickFeature::Entropy) > 0.0);
    }

    #[test]
    fn test_all_directions_layout() {
        let img = gradient_image(8, 4);
        let all = glcm_features_all_directions(&img, 1).unwrap();
        assert_eq!(all.len(), 52);

        let deg90 = glcm_features(
            &img,
            GlcmParams {
                distance: 1,
                direction: Direction::Deg90,
            },
        )
        .unwrap();
        assert_eq!(&all[26..39], deg90.as_slice());
    }

    #[test]
    fn test_algorithm_trait() {
        let img = gradient_image(6, 4);
        let expected = glcm_features(&img, GlcmParams::default()).unwrap();
        let got = Glcm.execute_default(img).unwrap();
        assert_eq!(Glcm.name(), "GLCM");
        assert_eq!(got, expected);
    }

    #[test]
    fn test_single_pixel_has_no_cooccurrences() {
        let img = GrayscaleMatrix::filled(1, 1, 0, 4).unwrap();
        assert!(matches!(
            glcm_features(&img, GlcmParams::default()),
            Err(Error::NoCooccurrences)
        ));
    }
}
