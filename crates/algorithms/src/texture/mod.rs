//! Texture descriptors
//!
//! - **cooccurrence**: Gray-level co-occurrence matrix
//! - **haralick**: The 13 Haralick statistics of a co-occurrence matrix
//! - **glcm**: Image → co-occurrence → Haralick pipeline
//! - **lbp**: Local binary pattern code maps and their descriptors
//! - **rotation_map**: Rotation-invariant classes of adjacent LBP code pairs

mod cooccurrence;
mod glcm;
mod haralick;
mod lbp;
mod rotation_map;

pub use cooccurrence::{cooccurrence_matrix, CooccurrenceMatrix};
pub use glcm::{glcm_features, glcm_features_all_directions, Glcm, GlcmParams};
pub use haralick::{haralick_features, HaralickFeature, HaralickFeatures, FEATURE_COUNT, SMOOTHING};
pub use lbp::{
    coalbp_features, completed_lbp_features, completed_lbp_maps, count_transitions, lbp_code,
    lbp_code_map, lbp_code_map_with_phase, lbp_features, min_rotation, riu2_code, riv_lbp_features,
    riv_lbp_map, window_grid, CodeMapping, CompletedLbp, Lbp, LbpConfig, LbpParams, LbpVariant,
    MAX_CODE_POINTS, MAX_DESCRIBED_POINTS,
};
pub use rotation_map::{rotate_half, RotationInvariantMap, FIRST_CLASS_ID, MAX_MAPPED_POINTS};
