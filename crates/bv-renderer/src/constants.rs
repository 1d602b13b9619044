//! Renderer constants.

/// Draw colors for patch surfaces and lines.
pub mod color {
    /// Shaded face color for unselected patches.
    pub const FACE_NORMAL: [f32; 4] = [0.737, 0.929, 1.000, 1.0];
    /// Interior grid-line color for unselected patches.
    pub const LINE_NORMAL: [f32; 4] = [0.431, 0.663, 0.749, 0.5];
    /// Shaded face color for the selected patch.
    pub const FACE_SELECTED: [f32; 4] = [1.000, 0.867, 0.737, 1.0];
    /// Interior grid-line color for the selected patch.
    pub const LINE_SELECTED: [f32; 4] = [0.749, 0.620, 0.431, 0.5];
    /// Boundary outline color, independent of selection.
    pub const BOUNDARY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
