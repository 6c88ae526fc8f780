//! Fractal nested-box layout for signed price deviations.
//!
//! A [`model::BoxSequence`] is ranked by magnitude, windowed, and laid out as
//! squares (2D) or cubes (3D) nested corner to corner. Each node is then
//! annotated with label visibility and signal highlighting for a renderer.
//!
//! The binary `resobox` reads a snapshot and prints the computed frames as
//! JSON.

pub mod config;
pub mod corner;
pub mod dashboard;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod ingest;
pub mod labels;
pub mod layout;
pub mod model;
pub mod ranking;
pub mod series;
pub mod signal;
pub mod viewport;
