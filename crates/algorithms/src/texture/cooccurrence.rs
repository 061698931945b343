//! Gray-level co-occurrence matrix construction
//!
//! `P[i][j]` counts the pixels with intensity `i` whose neighbor at the
//! direction/distance offset has intensity `j`. Pixels whose neighbor falls
//! outside the image on any side contribute nothing.

use ndarray::Array2;
use texturefeat_core::raster::{Direction, GrayscaleMatrix};
use texturefeat_core::{Error, Result};
use tracing::debug;

/// Unnormalized joint-occurrence weights.
///
/// Square (`max_gray × max_gray`) when built from an image; the Haralick
/// calculator also accepts non-square weight matrices whose two axes
/// enumerate different code spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    counts: Array2<f64>,
}

impl CooccurrenceMatrix {
    /// Wrap a weight matrix. Entries must be finite and non-negative.
    pub fn from_array(counts: Array2<f64>) -> Result<Self> {
        let (rows, cols) = counts.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions {
                width: rows,
                height: cols,
            });
        }
        if let Some(&bad) = counts.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(Error::invalid_parameter(
                "cooccurrence",
                bad,
                "weights must be finite and non-negative",
            ));
        }
        Ok(Self { counts })
    }

    /// Extent of the first axis
    pub fn rows(&self) -> usize {
        self.counts.nrows()
    }

    /// Extent of the second axis
    pub fn cols(&self) -> usize {
        self.counts.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.counts.dim()
    }

    /// Whether both axes enumerate the same code space
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Count at (i, j), or `None` outside the matrix
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.counts.get((i, j)).copied()
    }

    /// Sum of all counts
    pub fn total(&self) -> f64 {
        self.counts.sum()
    }

    /// The raw counts
    pub fn counts(&self) -> &Array2<f64> {
        &self.counts
    }

    /// Joint probabilities `P[i][j] / ΣΣ P`.
    ///
    /// Fails with [`Error::NoCooccurrences`] when the matrix holds no counts.
    pub fn normalized(&self) -> Result<Array2<f64>> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::NoCooccurrences);
        }
        Ok(&self.counts / total)
    }
}

/// Build the co-occurrence matrix of `image` at `distance` along `direction`.
///
/// # Arguments
/// * `image` - Intensities in `[0, max_gray)`
/// * `distance` - Offset length in pixels (must be > 0)
/// * `direction` - One of the four canonical angles
///
/// # Returns
/// A `max_gray × max_gray` count matrix
pub fn cooccurrence_matrix(
    image: &GrayscaleMatrix,
    distance: usize,
    direction: Direction,
) -> Result<CooccurrenceMatrix> {
    if distance == 0 {
        return Err(Error::invalid_parameter("distance", distance, "must be > 0"));
    }

    let (width, height) = (image.width(), image.height());
    let levels = image.levels();
    let (dx, dy) = direction.offset(distance);
    let mut counts = Array2::<f64>::zeros((levels, levels));

    for x in 0..width {
        let tx = x as isize + dx;
        if tx < 0 || tx as usize >= width {
            continue;
        }
        let tx = tx as usize;

        for y in 0..height {
            let ty = y as isize + dy;
            if ty < 0 || ty as usize >= height {
                continue;
            }
            let i = image.at(x, y) as usize;
            let j = image.at(tx, ty as usize) as usize;
            counts[(i, j)] += 1.0;
        }
    }

    debug!(
        "co-occurrence {} at distance {}: {} pairs over {} levels",
        direction,
        distance,
        counts.sum(),
        levels
    );

    Ok(CooccurrenceMatrix { counts })
}
