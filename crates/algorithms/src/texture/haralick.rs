//! Haralick texture descriptors
//!
//! Thirteen statistics of a normalized co-occurrence matrix (Haralick,
//! Shanmugam & Dinstein 1973). Every logarithm and every denominator that can
//! vanish carries the additive constant [`SMOOTHING`], and the radicand of the
//! second information measure of correlation is clamped at zero, so the
//! output is finite for any non-empty matrix.
//!
//! Matrices may be non-square (`m × n`): marginals, means and entropies are
//! then computed over `[0, m)` and `[0, n)` independently, the sum
//! distribution spans `m + n - 1` bins and the difference distribution
//! `max(m, n)` bins.

use std::fmt;

use ndarray::Array2;
use texturefeat_core::{Error, Result};

use super::cooccurrence::CooccurrenceMatrix;

/// Additive constant inside logarithms and small denominators
pub const SMOOTHING: f64 = 1e-8;

/// Length of a Haralick descriptor vector
pub const FEATURE_COUNT: usize = 13;

/// The thirteen descriptors, in vector index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaralickFeature {
    /// Angular second moment (energy), `ΣΣ P²`
    AngularSecondMoment,
    /// `Σ k² Pₓ₋ᵧ(k)`
    Contrast,
    /// Linear dependency of gray levels
    Correlation,
    /// Sum of squares: variance around the mean gray level
    SumOfSquares,
    /// Inverse difference moment (homogeneity)
    InverseDifferenceMoment,
    SumAverage,
    SumVariance,
    SumEntropy,
    Entropy,
    DifferenceVariance,
    DifferenceEntropy,
    /// Information measure of correlation 1
    InfoCorrelation1,
    /// Information measure of correlation 2
    InfoCorrelation2,
}

impl HaralickFeature {
    /// All descriptors in index order
    pub const ALL: [HaralickFeature; FEATURE_COUNT] = [
        HaralickFeature::AngularSecondMoment,
        HaralickFeature::Contrast,
        HaralickFeature::Correlation,
        HaralickFeature::SumOfSquares,
        HaralickFeature::InverseDifferenceMoment,
        HaralickFeature::SumAverage,
        HaralickFeature::SumVariance,
        HaralickFeature::SumEntropy,
        HaralickFeature::Entropy,
        HaralickFeature::DifferenceVariance,
        HaralickFeature::DifferenceEntropy,
        HaralickFeature::InfoCorrelation1,
        HaralickFeature::InfoCorrelation2,
    ];

    /// Position in the descriptor vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short snake_case name
    pub fn name(self) -> &'static str {
        match self {
            HaralickFeature::AngularSecondMoment => "angular_second_moment",
            HaralickFeature::Contrast => "contrast",
            HaralickFeature::Correlation => "correlation",
            HaralickFeature::SumOfSquares => "sum_of_squares",
            HaralickFeature::InverseDifferenceMoment => "inverse_difference_moment",
            HaralickFeature::SumAverage => "sum_average",
            HaralickFeature::SumVariance => "sum_variance",
            HaralickFeature::SumEntropy => "sum_entropy",
            HaralickFeature::Entropy => "entropy",
            HaralickFeature::DifferenceVariance => "difference_variance",
            HaralickFeature::DifferenceEntropy => "difference_entropy",
            HaralickFeature::InfoCorrelation1 => "info_correlation_1",
            HaralickFeature::InfoCorrelation2 => "info_correlation_2",
        }
    }
}

impl fmt::Display for HaralickFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated 13-element descriptor vector. Every value is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaralickFeatures([f64; FEATURE_COUNT]);

impl HaralickFeatures {
    /// Wrap raw values, rejecting NaN and infinities.
    pub(crate) fn validated(values: [f64; FEATURE_COUNT]) -> Result<Self> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteFeature { index, value });
        }
        Ok(Self(values))
    }

    /// Value of one descriptor
    pub fn get(&self, feature: HaralickFeature) -> f64 {
        self.0[feature.index()]
    }

    /// Values in index order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Values as a fixed-size array
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    /// Values as an owned vector
    pub fn into_vec(self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// `(feature, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (HaralickFeature, f64)> + '_ {
        HaralickFeature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// Probability distributions derived from a normalized matrix
#[derive(Debug, Clone)]
struct Distributions {
    p: Array2<f64>,
    /// Row marginal, `Px[i] = Σⱼ P[i][j]`
    px: Vec<f64>,
    /// Column marginal, `Py[j] = Σᵢ P[i][j]`
    py: Vec<f64>,
    /// `Pₓ₊ᵧ[k] = Σ_{i+j=k} P[i][j]`
    sum: Vec<f64>,
    /// `Pₓ₋ᵧ[k] = Σ_{|i-j|=k} P[i][j]`
    diff: Vec<f64>,
}

impl Distributions {
    fn new(p: Array2<f64>) -> Self {
        let (m, n) = p.dim();
        let mut px = vec![0.0; m];
        let mut py = vec![0.0; n];
        let mut sum = vec![0.0; m + n - 1];
        let mut diff = vec![0.0; m.max(n)];

        for ((i, j), &pij) in p.indexed_iter() {
            px[i] += pij;
            py[j] += pij;
            sum[i + j] += pij;
            diff[i.abs_diff(j)] += pij;
        }

        Self {
            p,
            px,
            py,
            sum,
            diff,
        }
    }
}

/// `-Σ p·ln(p + ε)`
fn entropy(dist: &[f64]) -> f64 {
    -dist.iter().map(|&p| p * (p + SMOOTHING).ln()).sum::<f64>()
}

/// `(mean, sqrt(variance))` of the index under a distribution
fn mean_and_deviation(dist: &[f64]) -> (f64, f64) {
    let mean: f64 = dist.iter().enumerate().map(|(k, &p)| k as f64 * p).sum();
    let variance: f64 = dist
        .iter()
        .enumerate()
        .map(|(k, &p)| (k as f64 - mean).powi(2) * p)
        .sum();
    (mean, variance.sqrt())
}

/// Compute the 13 Haralick descriptors of a co-occurrence matrix.
///
/// The matrix is normalized to a joint distribution first; an empty matrix
/// yields [`Error::NoCooccurrences`]. A result containing NaN or infinity is
/// reported as [`Error::NonFiniteFeature`].
pub fn haralick_features(glcm: &CooccurrenceMatrix) -> Result<HaralickFeatures> {
    let dist = Distributions::new(glcm.normalized()?);
    let Distributions {
        p,
        px,
        py,
        sum,
        diff,
    } = &dist;

    let (ux, sx) = mean_and_deviation(px);
    let (uy, sy) = mean_and_deviation(py);
    let u = 0.5 * (ux + uy);

    let hx = entropy(px);
    let hy = entropy(py);

    let mut asm = 0.0;
    let mut correlation = 0.0;
    let mut sum_of_squares = 0.0;
    let mut idm = 0.0;
    let mut hxy = 0.0;
    let mut hxy1 = 0.0;
    let mut hxy2 = 0.0;

    for ((i, j), &pij) in p.indexed_iter() {
        let (fi, fj) = (i as f64, j as f64);
        let pxy = px[i] * py[j];
        let log_pxy = (pxy + SMOOTHING).ln();

        asm += pij * pij;
        correlation += (fi - ux) * (fj - uy) * pij;
        sum_of_squares += (fi - u).powi(2) * pij;
        idm += pij / (1.0 + (fi - fj).powi(2));
        hxy -= pij * (pij + SMOOTHING).ln();
        hxy1 -= pij * log_pxy;
        hxy2 -= pxy * log_pxy;
    }
    correlation /= sx * sy + SMOOTHING;

    let contrast: f64 = diff
        .iter()
        .enumerate()
        .map(|(k, &pk)| (k * k) as f64 * pk)
        .sum();

    let (sum_average, sum_deviation) = mean_and_deviation(sum);
    let sum_variance = sum_deviation * sum_deviation;
    let sum_entropy = entropy(sum);

    let (_, diff_deviation) = mean_and_deviation(diff);
    let difference_variance = diff_deviation * diff_deviation;
    let difference_entropy = entropy(diff);

    // Smoothed entropies can dip a hair below zero on degenerate inputs.
    let info_corr_1 = (hxy - hxy1) / (hx.max(hy).max(0.0) + SMOOTHING);
    let info_corr_2 = (1.0 - (-2.0 * (hxy2 - hxy)).exp()).max(0.0).sqrt();

    HaralickFeatures::validated([
        asm,
        contrast,
        correlation,
        sum_of_squares,
        idm,
        sum_average,
        sum_variance,
        sum_entropy,
        hxy,
        difference_variance,
        difference_entropy,
        info_corr_1,
        info_corr_2,
    ])
}
