//! Scan conversion of triangles, circles, ellipses and polygons.
//!
//! - [`textured`]: perspective-correct, depth-tested triangle fill used by the
//!   3D pipeline
//! - [`solid`]: exact integer dual edge walk for flat 2D triangles
//! - [`conic`]: midpoint circle and ellipse fill
//! - [`polygon`]: winding-angle point-in-polygon fill and outline models

pub mod conic;
pub mod polygon;
pub mod solid;
pub mod textured;

pub use conic::{fill_circle, fill_ellipse};
pub use polygon::{contains_point, fill_polygon, winding_angle_sum, WireframeModel};
pub use solid::fill_triangle;
pub use textured::{draw_textured_triangle, ScreenVertex};
