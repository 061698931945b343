//! # texturefeat algorithms
//!
//! Texture descriptors for grayscale images.
//!
//! ## Available Algorithm Categories
//!
//! - **texture**: Co-occurrence matrices, Haralick statistics, local binary
//!   patterns (basic, rotation-min, riu2, completed, CoALBP, RIV-LBP)

mod sweep;
pub mod texture;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::texture::{
        coalbp_features, completed_lbp_features, cooccurrence_matrix, glcm_features,
        glcm_features_all_directions, haralick_features, lbp_code_map, lbp_features,
        riv_lbp_features, CodeMapping, CooccurrenceMatrix, Glcm, GlcmParams, HaralickFeature,
        HaralickFeatures, Lbp, LbpConfig, LbpParams, LbpVariant, RotationInvariantMap,
    };
    pub use texturefeat_core::prelude::*;
}
