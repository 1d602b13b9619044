//! Box patch object
//!
//! Ties the generated geometry together with the state a viewer mutates:
//! center, selection flag, and the three per-face visibility sets. All
//! arrays are built once at construction and only replaced wholesale on
//! reconfiguration; nothing here mutates them incrementally. Sharing a
//! patch with a render thread is safe as long as rebuilds are serialized
//! externally (see the renderer's patch store).

use glam::Vec3;

use crate::config::{BoxConfig, ConfigError};
use crate::intersect::ray_patch_intersection;
use crate::lines::LineMesh;
use crate::mesh::FaceMesh;
use crate::partition::FaceSet;

/// A rectangular box patch with a refined shaded surface and a template
/// wireframe overlay.
#[derive(Debug, Clone)]
pub struct BoxPatch {
    config: BoxConfig,
    center: Vec3,
    face_mesh: FaceMesh,
    line_mesh: LineMesh,
    /// Whether the patch is currently selected. Mutated by the selection
    /// collaborator; only affects draw colors.
    pub selected: bool,
    /// Faces whose shaded surface is drawn.
    pub visible_faces: FaceSet,
    /// Faces whose perimeter outline is drawn.
    pub visible_boundaries: FaceSet,
    /// Faces whose interior grid lines are drawn.
    pub visible_elements: FaceSet,
}

impl BoxPatch {
    /// Create a patch centered at `center`.
    pub fn new(center: Vec3, config: BoxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            center,
            face_mesh: FaceMesh::build(center, config.refined_cells()),
            line_mesh: LineMesh::build(center, config.template_cells()),
            selected: false,
            visible_faces: FaceSet::ALL,
            visible_boundaries: FaceSet::ALL,
            visible_elements: FaceSet::ALL,
        })
    }

    /// The patch center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// The active configuration.
    pub fn config(&self) -> BoxConfig {
        self.config
    }

    /// The refined shaded-surface mesh.
    pub fn face_mesh(&self) -> &FaceMesh {
        &self.face_mesh
    }

    /// The template wireframe mesh.
    pub fn line_mesh(&self) -> &LineMesh {
        &self.line_mesh
    }

    /// Rebuild all geometry for a new subdivision configuration.
    ///
    /// Existing GPU uploads of this patch become stale and must be
    /// re-uploaded by the rendering collaborator.
    pub fn set_resolution(&mut self, config: BoxConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.rebuild();
        Ok(())
    }

    /// Move the patch. Positions are baked into the vertex arrays, so
    /// this rebuilds them.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.face_mesh = FaceMesh::build(self.center, self.config.refined_cells());
        self.line_mesh = LineMesh::build(self.center, self.config.template_cells());
    }

    /// Test a ray (two points) against the shaded surface.
    ///
    /// Returns the parameter of the first accepted hit, with the hit
    /// point at `start + t·(end − start)`; `None` when the ray misses.
    pub fn intersect(&self, start: Vec3, end: Vec3) -> Option<f32> {
        ray_patch_intersection(&self.face_mesh.vertices, &self.face_mesh.quads, start, end)
    }
}
