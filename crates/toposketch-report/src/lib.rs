//! toposketch-report: Pure serializers for analysis results (sans-IO)
//!
//! Converts an [`AnalysisReport`](toposketch_engine::AnalysisReport)
//! into display formats: a set-notation text report and an SVG boundary
//! overlay.

pub mod notation;
pub mod overlay;
pub mod text;

pub use overlay::{boundary_path_data, to_overlay_svg};
pub use text::{geometry_section, logic_section, points_section, render};
