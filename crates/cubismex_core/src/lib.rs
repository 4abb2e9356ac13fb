//! Public library API for exporting Live2D Cubism models from decoded Unity asset sessions.

/// Session loading, reference resolution, clustering, motion and physics conversion, and export.
pub mod asset;
