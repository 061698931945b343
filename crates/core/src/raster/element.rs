//! Element trait for matrix cell values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a [`Raster`](super::Raster) cell.
///
/// Intensities and LBP codes are unsigned integers; derived weight matrices
/// (co-occurrence counts, rotation-class maps) are floating point.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Whether the value is usable in arithmetic (always true for integers)
    fn is_finite_value(&self) -> bool;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_raster_element_int {
    ($t:ty) => {
        impl RasterElement for $t {
            fn is_finite_value(&self) -> bool {
                true
            }
        }
    };
}

macro_rules! impl_raster_element_float {
    ($t:ty) => {
        impl RasterElement for $t {
            fn is_finite_value(&self) -> bool {
                self.is_finite()
            }
        }
    };
}

impl_raster_element_int!(u8);
impl_raster_element_int!(u32);
impl_raster_element_float!(f32);
impl_raster_element_float!(f64);
