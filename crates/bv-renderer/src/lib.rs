//! Box patch renderer
//!
//! wgpu-based drawing for [`bv_core`] patches. The host viewport owns the
//! window, event loop, and camera; it hands this crate a device, a target
//! format, and a camera matrix buffer, and gets back per-patch GPU
//! uploads and partitioned draw calls.
//!
//! # Module Structure
//!
//! ```text
//! bv-renderer/
//! ├── constants.rs     # Face/line color constants
//! ├── vertex.rs        # Position vertex format
//! ├── pipeline.rs      # Pipeline builder + camera uniform helpers
//! ├── patch.rs         # GpuPatch upload and PatchRenderer draw ranges
//! ├── store.rs         # PatchStore: render/rebuild gate over the scene
//! └── shaders/         # WGSL sources
//! ```

pub mod constants;
pub mod patch;
pub mod pipeline;
pub mod store;
pub mod vertex;

pub use patch::{expand_quads, GpuPatch, PatchRenderer};
pub use pipeline::{
    camera_bind_group_layout, create_camera_bind_group, CameraUniform, PipelineConfig,
};
pub use store::{PatchEntry, PatchStore, PatchTable};
pub use vertex::PositionVertex;
