//! Matrix data structures and sampling geometry

mod element;
mod gray;
mod grid;
mod neighborhood;

pub use element::RasterElement;
pub use gray::GrayscaleMatrix;
pub use grid::{Raster, RasterStatistics};
pub use neighborhood::{ceil_offset, clamp_or_center, CircularNeighborhood, Direction};
