//! Neighbor sampling geometry: co-occurrence offsets and circular samples

use crate::error::{Error, Result};
use std::f64::consts::PI;
use std::fmt;

/// Canonical co-occurrence directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Along the second axis
    #[default]
    Deg0,
    Deg45,
    /// Along the first axis, towards lower indices
    Deg90,
    Deg135,
}

impl Direction {
    /// All four directions in ascending angle order
    pub const ALL: [Direction; 4] = [
        Direction::Deg0,
        Direction::Deg45,
        Direction::Deg90,
        Direction::Deg135,
    ];

    /// Angle in degrees
    pub fn degrees(self) -> u32 {
        match self {
            Direction::Deg0 => 0,
            Direction::Deg45 => 45,
            Direction::Deg90 => 90,
            Direction::Deg135 => 135,
        }
    }

    /// Pixel offset `(dx, dy)` for a co-occurrence distance.
    ///
    /// 0° → (0, δ); 45° → (−δ, δ); 90° → (−δ, 0); 135° → (−δ, −δ).
    pub fn offset(self, distance: usize) -> (isize, isize) {
        let d = distance as isize;
        match self {
            Direction::Deg0 => (0, d),
            Direction::Deg45 => (-d, d),
            Direction::Deg90 => (-d, 0),
            Direction::Deg135 => (-d, -d),
        }
    }
}

impl TryFrom<u32> for Direction {
    type Error = Error;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Direction::Deg0),
            45 => Ok(Direction::Deg45),
            90 => Ok(Direction::Deg90),
            135 => Ok(Direction::Deg135),
            other => Err(Error::invalid_parameter(
                "angle",
                other,
                "must be one of 0, 45, 90, 135",
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Tolerance under which a scaled sine/cosine is snapped to an integer
/// before rounding up.
const SNAP_TOLERANCE: f64 = 1e-9;

/// `⌈r·cos θ⌉, ⌈r·sin θ⌉` as an integer offset.
///
/// Products within [`SNAP_TOLERANCE`] of an integer are treated as that
/// integer, so that `cos(π/2) ≈ 6e-17` does not round up to a full pixel.
pub fn ceil_offset(radius: usize, angle: f64) -> (isize, isize) {
    let r = radius as f64;
    (snap_ceil(r * angle.cos()), snap_ceil(r * angle.sin()))
}

fn snap_ceil(v: f64) -> isize {
    let nearest = v.round();
    if (v - nearest).abs() < SNAP_TOLERANCE {
        nearest as isize
    } else {
        v.ceil() as isize
    }
}

/// Move `center` by `delta` along an axis of length `len`.
///
/// Targets outside `[0, len)` resolve to `center` itself.
#[inline]
pub fn clamp_or_center(center: usize, delta: isize, len: usize) -> usize {
    let target = center as isize + delta;
    if target >= 0 && (target as usize) < len {
        target as usize
    } else {
        center
    }
}

/// Circular sampling pattern of `points` neighbors at distance `radius`.
///
/// The `i`-th neighbor sits at angle `phase + 2πi/points`; its offset is
/// [`ceil_offset`] of that angle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularNeighborhood {
    radius: usize,
    offsets: Vec<(isize, isize)>,
}

impl CircularNeighborhood {
    /// Sampling pattern with zero phase
    pub fn new(radius: usize, points: usize) -> Result<Self> {
        Self::with_phase(radius, points, 0.0)
    }

    /// Sampling pattern rotated by `phase` radians
    pub fn with_phase(radius: usize, points: usize, phase: f64) -> Result<Self> {
        if radius == 0 {
            return Err(Error::invalid_parameter("radius", radius, "must be > 0"));
        }
        if points == 0 {
            return Err(Error::invalid_parameter("points", points, "must be > 0"));
        }
        if !phase.is_finite() {
            return Err(Error::invalid_parameter("phase", phase, "must be finite"));
        }

        let step = 2.0 * PI / points as f64;
        let offsets = (0..points)
            .map(|i| ceil_offset(radius, phase + step * i as f64))
            .collect();

        Ok(Self { radius, offsets })
    }

    /// Sampling radius
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of sample points
    pub fn points(&self) -> usize {
        self.offsets.len()
    }

    /// Offsets in sampling order
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Neighbor coordinates around `(x, y)` in a `width × height` matrix,
    /// with each out-of-range axis falling back to the center coordinate.
    pub fn sample(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.offsets.iter().map(move |&(dx, dy)| {
            (
                clamp_or_center(x, dx, width),
                clamp_or_center(y, dy, height),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Deg0.offset(2), (0, 2));
        assert_eq!(Direction::Deg45.offset(2), (-2, 2));
        assert_eq!(Direction::Deg90.offset(2), (-2, 0));
        assert_eq!(Direction::Deg135.offset(2), (-2, -2));
    }

    #[test]
    fn test_direction_from_degrees() {
        assert_eq!(Direction::try_from(45).unwrap(), Direction::Deg45);
        assert!(Direction::try_from(30).is_err());
        for d in Direction::ALL {
            assert_eq!(Direction::try_from(d.degrees()).unwrap(), d);
        }
    }

    #[test]
    fn test_eight_point_ring() {
        let n = CircularNeighborhood::new(1, 8).unwrap();
        assert_eq!(
            n.offsets(),
            &[
                (1, 0),
                (1, 1),
                (0, 1),
                (0, 1),
                (-1, 0),
                (0, 0),
                (0, -1),
                (1, 0),
            ]
        );
    }

    #[test]
    fn test_four_point_ring_radius_two() {
        let n = CircularNeighborhood::new(2, 4).unwrap();
        assert_eq!(n.offsets(), &[(2, 0), (0, 2), (-2, 0), (0, -2)]);
    }

    #[test]
    fn test_rejects_zero_radius_and_points() {
        assert!(CircularNeighborhood::new(0, 8).is_err());
        assert!(CircularNeighborhood::new(1, 0).is_err());
        assert!(CircularNeighborhood::with_phase(1, 8, f64::NAN).is_err());
    }

    #[test]
    fn test_sample_clamps_to_center() {
        // Radius larger than the matrix: every sample resolves to the center.
        let n = CircularNeighborhood::new(10, 4).unwrap();
        let samples: Vec<_> = n.sample(1, 2, 3, 4).collect();
        assert_eq!(samples, vec![(1, 2); 4]);
    }

    #[test]
    fn test_sample_clamps_per_axis() {
        let n = CircularNeighborhood::new(1, 8).unwrap();
        // (0, 0) corner: (-1, 0) leaves the first axis, (0, -1) the second.
        let samples: Vec<_> = n.sample(0, 0, 3, 3).collect();
        assert!(samples.iter().all(|&(x, y)| x < 3 && y < 3));
        assert_eq!(samples[4], (0, 0));
        assert_eq!(samples[6], (0, 0));
    }

    #[test]
    fn test_clamp_or_center() {
        assert_eq!(clamp_or_center(2, -3, 5), 2);
        assert_eq!(clamp_or_center(2, 2, 5), 4);
        assert_eq!(clamp_or_center(2, 3, 5), 2);
    }
}
