//! Box patch geometry core
//!
//! CPU-side generation of multi-resolution rectangular-box surface
//! meshes for an interactive viewer, plus the ray/triangle intersection
//! used for picking. No GPU types live here; the renderer crate consumes
//! the arrays this crate produces.
//!
//! Each patch carries two resolutions: a refined grid for shaded faces
//! and a coarse template grid for the wireframe overlay. Vertices shared
//! between adjoining faces are stored exactly once, and every element
//! array is partitioned per face so visibility can be toggled without
//! re-uploading buffers.

pub mod config;
pub mod grid;
pub mod intersect;
pub mod lines;
pub mod mesh;
pub mod partition;
pub mod patch;

pub use config::{BoxConfig, ConfigError};
pub use grid::{AxisPair, CellLayout, GridLayout, Side, FACES};
pub use intersect::{ray_patch_intersection, ray_triangle_intersection, DEGENERACY_EPSILON};
pub use lines::{LineMesh, Segment, LINE_INFLATION};
pub use mesh::{FaceMesh, Quad};
pub use partition::{FaceSet, PartitionTable};
pub use patch::BoxPatch;
