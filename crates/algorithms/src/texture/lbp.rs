//! Local Binary Patterns (LBP)
//!
//! Each window compares `P` circular neighbors at radius `r` against its
//! center pixel and packs the outcome into a code. Windows are tiled across
//! the image with stride `2r + 1`, so a `W × H` image yields a code map of
//! `⌊(W - 2r)/(2r + 1)⌋ × ⌊(H - 2r)/(2r + 1)⌋`. The code maps are then
//! described with co-occurrence statistics:
//!
//! - **Basic / rotation-min / riu2**: code map → GLCM → Haralick
//! - **Completed (CLBP)**: sign, magnitude and center maps → 3 × 13 values
//! - **CoALBP**: basic map at distance 1, 0° → Haralick
//! - **RIV-LBP**: adjacent code pairs → rotation-invariant classes → Haralick

use std::str::FromStr;

use texturefeat_core::raster::{ceil_offset, clamp_or_center, CircularNeighborhood};
use texturefeat_core::{Algorithm, Error, GrayscaleMatrix, Raster, Result};
use tracing::{debug, warn};

use super::cooccurrence::{cooccurrence_matrix, CooccurrenceMatrix};
use super::glcm::{glcm_features, GlcmParams};
use super::haralick::{haralick_features, HaralickFeatures, FEATURE_COUNT};
use super::rotation_map::RotationInvariantMap;
use crate::sweep::concat_rows;

/// Largest sample count for which code maps are built (`2^P` codes)
pub const MAX_CODE_POINTS: usize = 24;

/// Largest sample count whose raw or rotation-min codes are described with a
/// co-occurrence matrix (`2^P × 2^P` cells)
pub const MAX_DESCRIBED_POINTS: usize = 12;

/// Sampling parameters shared by all LBP variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LbpParams {
    /// Neighbor distance in pixels (default: 1)
    pub radius: usize,
    /// Number of neighbors sampled on the circle (default: 8)
    pub points: usize,
}

impl Default for LbpParams {
    fn default() -> Self {
        Self {
            radius: 1,
            points: 8,
        }
    }
}

impl LbpParams {
    /// Check radius and sample count.
    pub fn validate(&self) -> Result<()> {
        if self.radius == 0 {
            return Err(Error::invalid_parameter("radius", self.radius, "must be > 0"));
        }
        if self.points == 0 || self.points > MAX_CODE_POINTS {
            return Err(Error::invalid_parameter(
                "points",
                self.points,
                format!("must be in 1..={MAX_CODE_POINTS}"),
            ));
        }
        Ok(())
    }

    fn neighborhood(&self, phase: f64) -> Result<CircularNeighborhood> {
        self.validate()?;
        CircularNeighborhood::with_phase(self.radius, self.points, phase)
    }
}

/// How a window's comparisons are turned into a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeMapping {
    /// Raw `P`-bit code
    #[default]
    Identity,
    /// Smallest value over all circular rotations of the code
    RotationMin,
    /// Rotation-invariant uniform code in `0..=P+1`
    Riu2,
}

impl CodeMapping {
    /// Size of the code space for `points` samples
    pub fn code_count(self, points: usize) -> u32 {
        match self {
            CodeMapping::Identity | CodeMapping::RotationMin => 1u32 << points,
            CodeMapping::Riu2 => points as u32 + 2,
        }
    }

    fn encode(self, center: u32, neighbors: &[u32]) -> u32 {
        match self {
            CodeMapping::Identity => lbp_code(center, neighbors),
            CodeMapping::RotationMin => {
                min_rotation(lbp_code(center, neighbors), neighbors.len())
            }
            CodeMapping::Riu2 => riu2_code(center, neighbors),
        }
    }
}

/// Basic LBP code: neighbor `i` sets bit `P-1-i` when strictly brighter
/// than the center.
pub fn lbp_code(center: u32, neighbors: &[u32]) -> u32 {
    neighbors
        .iter()
        .fold(0u32, |code, &g| (code << 1) | u32::from(g > center))
}

/// Minimum of `code` over its circular rotations within `points` bits.
pub fn min_rotation(code: u32, points: usize) -> u32 {
    if points == 0 {
        return code;
    }
    let top = points - 1;
    let mut rotated = code;
    let mut min = code;
    for _ in 0..points {
        rotated = (rotated >> 1) | ((rotated & 1) << top);
        min = min.min(rotated);
    }
    min
}

/// Number of value changes walking once around the circular bit string.
pub fn count_transitions(bits: &[bool]) -> usize {
    if bits.is_empty() {
        return 0;
    }
    let n = bits.len();
    (0..n).filter(|&i| bits[i] != bits[(i + 1) % n]).count()
}

/// Rotation-invariant uniform code.
///
/// Uniform patterns (at most two transitions) map to their count of set
/// bits, everything else to `P + 1`. Neighbors equal to the center count as
/// set.
pub fn riu2_code(center: u32, neighbors: &[u32]) -> u32 {
    let bits: Vec<bool> = neighbors.iter().map(|&g| g >= center).collect();
    if count_transitions(&bits) <= 2 {
        bits.iter().filter(|&&b| b).count() as u32
    } else {
        neighbors.len() as u32 + 1
    }
}

/// Number of windows per axis for a `width × height` image.
pub fn window_grid(width: usize, height: usize, radius: usize) -> (usize, usize) {
    let stride = 2 * radius + 1;
    (
        width.saturating_sub(2 * radius) / stride,
        height.saturating_sub(2 * radius) / stride,
    )
}

/// Visit every window and collect `f(center, neighbors)` in row-major order.
fn sample_windows<T, F>(
    image: &GrayscaleMatrix,
    hood: &CircularNeighborhood,
    f: F,
) -> Result<(usize, usize, Vec<T>)>
where
    T: Send,
    F: Fn(u32, &[u32]) -> T + Sync + Send,
{
    let (width, height) = (image.width(), image.height());
    let radius = hood.radius();
    let (tiles_x, tiles_y) = window_grid(width, height, radius);
    if tiles_x == 0 || tiles_y == 0 {
        warn!(
            "{}×{} image is too small for LBP windows of radius {}",
            width, height, radius
        );
        return Err(Error::invalid_parameter(
            "radius",
            radius,
            format!("no {0}×{0} window fits a {width}×{height} image", 2 * radius + 1),
        ));
    }
    let stride = 2 * radius + 1;

    let values = concat_rows(tiles_x, |tx| {
        let x = radius + tx * stride;
        let mut neighbors = Vec::with_capacity(hood.points());
        let mut row = Vec::with_capacity(tiles_y);
        for ty in 0..tiles_y {
            let y = radius + ty * stride;
            neighbors.clear();
            neighbors.extend(
                hood.sample(x, y, width, height)
                    .map(|(nx, ny)| image.at(nx, ny)),
            );
            row.push(f(image.at(x, y), &neighbors));
        }
        row
    });

    Ok((tiles_x, tiles_y, values))
}

/// Reject code spaces too large for a dense co-occurrence matrix.
fn check_describable(params: LbpParams, mapping: CodeMapping) -> Result<()> {
    if mapping != CodeMapping::Riu2 && params.points > MAX_DESCRIBED_POINTS {
        return Err(Error::invalid_parameter(
            "points",
            params.points,
            format!("at most {MAX_DESCRIBED_POINTS} when describing {mapping:?} codes"),
        ));
    }
    Ok(())
}

/// Code map of `image` with zero sampling phase.
pub fn lbp_code_map(
    image: &GrayscaleMatrix,
    params: LbpParams,
    mapping: CodeMapping,
) -> Result<GrayscaleMatrix> {
    lbp_code_map_with_phase(image, params, mapping, 0.0)
}

/// Code map of `image` with the circle rotated by `phase` radians.
///
/// The result's gray-level range is the mapping's code space.
pub fn lbp_code_map_with_phase(
    image: &GrayscaleMatrix,
    params: LbpParams,
    mapping: CodeMapping,
    phase: f64,
) -> Result<GrayscaleMatrix> {
    let hood = params.neighborhood(phase)?;
    let (w, h, codes) = sample_windows(image, &hood, |c, n| mapping.encode(c, n))?;
    debug!(
        "LBP {:?} map r={} P={}: {}×{} windows",
        mapping, params.radius, params.points, w, h
    );
    GrayscaleMatrix::from_vec(codes, w, h, mapping.code_count(params.points))
}

/// The three code maps of the completed LBP
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedLbp {
    /// Neighbors whose difference to the center is non-negative, in `0..=P`
    pub sign: GrayscaleMatrix,
    /// Neighbors whose intensity reaches the center intensity, in `0..=P`.
    /// On integer intensities this coincides with `sign`.
    pub magnitude: GrayscaleMatrix,
    /// 1 where the center is at least the image mean intensity
    pub center: GrayscaleMatrix,
}

/// Compute the sign, magnitude and center maps of the completed LBP.
pub fn completed_lbp_maps(image: &GrayscaleMatrix, params: LbpParams) -> Result<CompletedLbp> {
    let hood = params.neighborhood(0.0)?;
    let points = params.points as u32;

    let mean = image.mean_intensity();

    let (w, h, sign) = sample_windows(image, &hood, |c, n| {
        n.iter()
            .filter(|&&g| i64::from(g) - i64::from(c) >= 0)
            .count() as u32
    })?;
    let (_, _, magnitude) = sample_windows(image, &hood, |c, n| {
        n.iter().filter(|&&g| g >= c).count() as u32
    })?;
    let (_, _, center) = sample_windows(image, &hood, |c, _| u32::from(f64::from(c) >= mean))?;

    debug!("CLBP maps {}×{}, mean intensity {:.4}", w, h, mean);

    Ok(CompletedLbp {
        sign: GrayscaleMatrix::from_vec(sign, w, h, points + 1)?,
        magnitude: GrayscaleMatrix::from_vec(magnitude, w, h, points + 1)?,
        center: GrayscaleMatrix::from_vec(center, w, h, 2)?,
    })
}

/// Haralick descriptors of the sign, magnitude and center maps, in that
/// order (`3 × 13` values). Each map is described at distance 1, 0°.
pub fn completed_lbp_features(image: &GrayscaleMatrix, params: LbpParams) -> Result<Vec<f64>> {
    let maps = completed_lbp_maps(image, params)?;
    let mut out = Vec::with_capacity(3 * FEATURE_COUNT);
    for map in [&maps.sign, &maps.magnitude, &maps.center] {
        let features = glcm_features(map, GlcmParams::default())?;
        out.extend_from_slice(features.as_slice());
    }
    Ok(out)
}

/// Co-occurrence of adjacent LBP: Haralick descriptors of the basic code
/// map at distance 1, 0°.
pub fn coalbp_features(image: &GrayscaleMatrix, params: LbpParams) -> Result<HaralickFeatures> {
    check_describable(params, CodeMapping::Identity)?;
    let codes = lbp_code_map(image, params, CodeMapping::Identity)?;
    glcm_features(&codes, GlcmParams::default())
}

/// Rotation-invariant class of each window's code paired with the code of
/// its neighbor along the `phase` direction.
///
/// The neighbor sits at `⌈r·cos φ⌉, ⌈r·sin φ⌉` windows away; windows on the
/// edge pair with themselves along any axis that would leave the map.
pub fn riv_lbp_map(
    image: &GrayscaleMatrix,
    params: LbpParams,
    phase: f64,
    map: &RotationInvariantMap,
) -> Result<Raster<f64>> {
    if map.points() != params.points {
        return Err(Error::invalid_parameter(
            "points",
            params.points,
            format!("rotation map was built for P={}", map.points()),
        ));
    }

    let codes = lbp_code_map_with_phase(image, params, CodeMapping::Identity, phase)?;
    let (w, h) = (codes.width(), codes.height());
    let (dx, dy) = ceil_offset(params.radius, phase);

    let mut classes = Raster::<f64>::new(w, h);
    for j in 0..w {
        let nj = clamp_or_center(j, dx, w);
        for k in 0..h {
            let nk = clamp_or_center(k, dy, h);
            let class = map.class_of(codes.at(j, k), codes.at(nj, nk))?;
            classes.set(j, k, f64::from(class))?;
        }
    }

    Ok(classes)
}

/// Haralick descriptors of the RIV-LBP class matrix.
///
/// The class matrix is described directly as a (generally non-square)
/// weight matrix.
pub fn riv_lbp_features(
    image: &GrayscaleMatrix,
    params: LbpParams,
    phase: f64,
) -> Result<HaralickFeatures> {
    params.validate()?;
    let map = RotationInvariantMap::new(params.points)?;
    let classes = riv_lbp_map(image, params, phase, &map)?;
    let weights = CooccurrenceMatrix::from_array(classes.into_array())?;
    haralick_features(&weights)
}

/// LBP descriptor family
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LbpVariant {
    /// Raw codes
    #[default]
    Basic,
    /// Rotation-minimized codes
    RotationMin,
    /// Rotation-invariant uniform codes
    Riu2,
    /// Completed LBP (sign, magnitude, center)
    Completed,
    /// Co-occurrence of adjacent LBP
    CoAlbp,
    /// Rotation-invariant co-occurrence of adjacent LBP
    Riv {
        /// Sampling phase in radians
        phase: f64,
    },
}

impl LbpVariant {
    /// Number of values `lbp_features` returns for this variant
    pub fn feature_count(&self) -> usize {
        match self {
            LbpVariant::Completed => 3 * FEATURE_COUNT,
            _ => FEATURE_COUNT,
        }
    }
}

impl FromStr for LbpVariant {
    type Err = Error;

    /// Parse a variant name. `riv` parses with zero phase.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "lbp" => Ok(LbpVariant::Basic),
            "rotation-min" | "rotmin" | "ri" => Ok(LbpVariant::RotationMin),
            "riu2" => Ok(LbpVariant::Riu2),
            "completed" | "clbp" => Ok(LbpVariant::Completed),
            "coalbp" => Ok(LbpVariant::CoAlbp),
            "riv" | "riv-lbp" | "rivlbp" => Ok(LbpVariant::Riv { phase: 0.0 }),
            other => Err(Error::invalid_parameter(
                "variant",
                other,
                "expected basic, rotation-min, riu2, completed, coalbp or riv",
            )),
        }
    }
}

/// Full configuration of an LBP descriptor run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LbpConfig {
    /// Sampling parameters
    pub params: LbpParams,
    /// Which descriptor to compute
    pub variant: LbpVariant,
    /// Offset used to describe the code map of the basic, rotation-min and
    /// riu2 variants
    pub glcm: GlcmParams,
}

/// LBP texture descriptor algorithm
#[derive(Debug, Clone, Default)]
pub struct Lbp;

impl Algorithm for Lbp {
    type Input = GrayscaleMatrix;
    type Output = Vec<f64>;
    type Params = LbpConfig;
    type Error = Error;

    fn name(&self) -> &'static str {
        "LBP"
    }

    fn description(&self) -> &'static str {
        "Haralick descriptors of local binary pattern code maps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        lbp_features(&input, params)
    }
}

/// Compute the descriptor vector selected by `config`.
pub fn lbp_features(image: &GrayscaleMatrix, config: LbpConfig) -> Result<Vec<f64>> {
    let params = config.params;
    let described = |mapping: CodeMapping| -> Result<Vec<f64>> {
        check_describable(params, mapping)?;
        let codes = lbp_code_map(image, params, mapping)?;
        let glcm = cooccurrence_matrix(&codes, config.glcm.distance, config.glcm.direction)?;
        Ok(haralick_features(&glcm)?.into_vec())
    };

    match config.variant {
        LbpVariant::Basic => described(CodeMapping::Identity),
        LbpVariant::RotationMin => described(CodeMapping::RotationMin),
        LbpVariant::Riu2 => described(CodeMapping::Riu2),
        LbpVariant::Completed => completed_lbp_features(image, params),
        LbpVariant::CoAlbp => Ok(coalbp_features(image, params)?.into_vec()),
        LbpVariant::Riv { phase } => Ok(riv_lbp_features(image, params, phase)?.into_vec()),
    }
}
