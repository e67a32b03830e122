//! Core plotting building blocks: colormaps, the bitmap font, heatmap layout
//! and rasterization, and save helpers. These are internal primitives
//! consumed by the high-level `api` module.
pub mod params;
pub mod processing;
