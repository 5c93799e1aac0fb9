//! Triangle clipping against half-spaces.
//!
//! - [`plane`]: one plane, one triangle in, zero to two triangles out. Used
//!   for the near plane in view space.
//! - [`screen`]: the four screen edges applied in sequence after the
//!   viewport transform.

pub mod plane;
pub mod screen;

pub use plane::{clip_triangle, ClipOutput, Plane};
pub use screen::ScreenClipper;
