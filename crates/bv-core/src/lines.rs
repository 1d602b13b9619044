//! Template wireframe generation
//!
//! Builds the coarse line geometry drawn on top of the shaded surface:
//! a template-resolution vertex grid inflated slightly past the surface,
//! the full perimeter outline of each face, and the interior grid lines
//! crossing each face. Segments are emitted per face in [`FACES`] order
//! so the partition tables are plain running sums.
//!
//! Each face traces its own complete perimeter, so a physical box edge is
//! drawn once per adjoining face. That duplication is what keeps boundary
//! visibility toggles independent per face.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::grid::{AxisPair, CellLayout, GridLayout, Side, FACES};
use crate::mesh::lpt;
use crate::partition::PartitionTable;

/// Multiplicative nudge applied to local face coordinates so lines render
/// strictly outside the shaded surface instead of z-fighting with it.
pub const LINE_INFLATION: f32 = 1.001;

/// A line segment: two indices into the template vertex array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Segment {
    /// Start point.
    pub a: u32,
    /// End point.
    pub b: u32,
}

fn seg(a: usize, b: usize) -> Segment {
    Segment {
        a: a as u32,
        b: b as u32,
    }
}

/// Template-resolution line mesh of one box patch.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMesh {
    /// Inflated template vertex positions.
    pub vertices: Vec<[f32; 3]>,
    /// Face perimeter segments, grouped per face.
    pub boundary: Vec<Segment>,
    /// Per-face boundary segment ranges.
    pub boundaries: PartitionTable,
    /// Interior grid-line segments, grouped per face.
    pub elements: Vec<Segment>,
    /// Per-face interior line ranges.
    pub element_lines: PartitionTable,
}

impl LineMesh {
    /// Build the line mesh for a box centered at `center` with the given
    /// template cell counts per axis.
    pub fn build(center: Vec3, cells: [usize; 3]) -> Self {
        let layout = CellLayout::new(cells);
        let grid = layout.points();

        let mesh = Self {
            vertices: build_vertices(center, &grid),
            boundary: build_boundary(&layout),
            boundaries: PartitionTable::from_counts(layout.face_boundary_counts()),
            elements: build_elements(&layout),
            element_lines: PartitionTable::from_counts(layout.face_interior_line_counts()),
        };

        debug_assert_eq!(mesh.boundary.len(), mesh.boundaries.total() as usize);
        debug_assert_eq!(mesh.elements.len(), mesh.element_lines.total() as usize);
        mesh
    }
}

fn build_vertices(center: Vec3, grid: &GridLayout) -> Vec<[f32; 3]> {
    let [u, v, w] = grid.pts;
    let mut vertices = vec![[0.0f32; 3]; grid.point_count()];

    for side in Side::BOTH {
        for j in 0..v {
            for i in 0..u {
                vertices[grid.uv_pt(i, j, side)] = (center
                    + LINE_INFLATION * Vec3::new(lpt(i, u), lpt(j, v), side.sign()))
                .to_array();
            }
        }
        for j in 1..w - 1 {
            for i in 0..u {
                vertices[grid.uw_pt(i, j, side)] = (center
                    + LINE_INFLATION * Vec3::new(lpt(i, u), side.sign(), lpt(j, w)))
                .to_array();
            }
        }
        for j in 1..w - 1 {
            for i in 1..v - 1 {
                vertices[grid.vw_pt(i, j, side)] = (center
                    + LINE_INFLATION * Vec3::new(side.sign(), lpt(i, v), lpt(j, w)))
                .to_array();
            }
        }
    }

    vertices
}

/// Perimeter segments for all six faces: for each face, one run of
/// consecutive segments along each of its four sides.
fn build_boundary(layout: &CellLayout) -> Vec<Segment> {
    let grid = layout.points();
    let [u, v, w] = layout.cells;
    let [pu, pv, pw] = grid.pts;
    let mut boundary = Vec::with_capacity(layout.face_boundary_counts().iter().sum());

    for (pair, side) in FACES {
        match pair {
            AxisPair::Uv => {
                for edge in Side::BOTH {
                    let j = edge.edge(pv);
                    for i in 0..u {
                        boundary.push(seg(grid.uv_pt(i, j, side), grid.uv_pt(i + 1, j, side)));
                    }
                }
                for edge in Side::BOTH {
                    let i = edge.edge(pu);
                    for j in 0..v {
                        boundary.push(seg(grid.uv_pt(i, j, side), grid.uv_pt(i, j + 1, side)));
                    }
                }
            }
            AxisPair::Uw => {
                for edge in Side::BOTH {
                    let j = edge.edge(pw);
                    for i in 0..u {
                        boundary.push(seg(grid.uw_pt(i, j, side), grid.uw_pt(i + 1, j, side)));
                    }
                }
                for edge in Side::BOTH {
                    let i = edge.edge(pu);
                    for j in 0..w {
                        boundary.push(seg(grid.uw_pt(i, j, side), grid.uw_pt(i, j + 1, side)));
                    }
                }
            }
            AxisPair::Vw => {
                for edge in Side::BOTH {
                    let j = edge.edge(pw);
                    for i in 0..v {
                        boundary.push(seg(grid.vw_pt(i, j, side), grid.vw_pt(i + 1, j, side)));
                    }
                }
                for edge in Side::BOTH {
                    let i = edge.edge(pv);
                    for j in 0..w {
                        boundary.push(seg(grid.vw_pt(i, j, side), grid.vw_pt(i, j + 1, side)));
                    }
                }
            }
        }
    }

    boundary
}

/// Interior grid-line segments for all six faces: both grid directions,
/// boundary rows and columns excluded (those belong to the perimeter).
fn build_elements(layout: &CellLayout) -> Vec<Segment> {
    let grid = layout.points();
    let [u, v, w] = layout.cells;
    let mut elements = Vec::with_capacity(layout.face_interior_line_counts().iter().sum());

    for (pair, side) in FACES {
        match pair {
            AxisPair::Uv => {
                for j in 1..v {
                    for i in 0..u {
                        elements.push(seg(grid.uv_pt(i, j, side), grid.uv_pt(i + 1, j, side)));
                    }
                }
                for i in 1..u {
                    for j in 0..v {
                        elements.push(seg(grid.uv_pt(i, j, side), grid.uv_pt(i, j + 1, side)));
                    }
                }
            }
            AxisPair::Uw => {
                for j in 1..w {
                    for i in 0..u {
                        elements.push(seg(grid.uw_pt(i, j, side), grid.uw_pt(i + 1, j, side)));
                    }
                }
                for i in 1..u {
                    for j in 0..w {
                        elements.push(seg(grid.uw_pt(i, j, side), grid.uw_pt(i, j + 1, side)));
                    }
                }
            }
            AxisPair::Vw => {
                for j in 1..w {
                    for i in 0..v {
                        elements.push(seg(grid.vw_pt(i, j, side), grid.vw_pt(i + 1, j, side)));
                    }
                }
                for i in 1..v {
                    for j in 0..w {
                        elements.push(seg(grid.vw_pt(i, j, side), grid.vw_pt(i, j + 1, side)));
                    }
                }
            }
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_counts_match_closed_forms() {
        for cells in [[1, 1, 1], [3, 4, 5], [2, 7, 1]] {
            let mesh = LineMesh::build(Vec3::ZERO, cells);
            let [u, v, w] = cells;

            assert_eq!(mesh.boundary.len(), 8 * (u + v + w));

            let lines_uv = u * (v - 1) + v * (u - 1);
            let lines_uw = u * (w - 1) + w * (u - 1);
            let lines_vw = v * (w - 1) + w * (v - 1);
            assert_eq!(mesh.elements.len(), 2 * (lines_uv + lines_uw + lines_vw));

            assert_eq!(mesh.boundaries.total() as usize, mesh.boundary.len());
            assert_eq!(mesh.element_lines.total() as usize, mesh.elements.len());
        }
    }

    #[test]
    fn per_face_partitions_match_emission_order() {
        let cells = [3, 4, 5];
        let mesh = LineMesh::build(Vec3::ZERO, cells);
        let layout = CellLayout::new(cells);

        let boundary_counts = layout.face_boundary_counts();
        let interior_counts = layout.face_interior_line_counts();
        for face in 0..6 {
            let range = mesh.boundaries.range(face);
            assert_eq!((range.end - range.start) as usize, boundary_counts[face]);
            let range = mesh.element_lines.range(face);
            assert_eq!((range.end - range.start) as usize, interior_counts[face]);
        }
    }

    #[test]
    fn segment_indices_in_range() {
        let cells = [3, 4, 5];
        let mesh = LineMesh::build(Vec3::ZERO, cells);
        let n = mesh.vertices.len() as u32;
        for segment in mesh.boundary.iter().chain(&mesh.elements) {
            assert!(segment.a < n && segment.b < n);
            assert_ne!(segment.a, segment.b);
        }
    }

    #[test]
    fn vertices_are_inflated_past_the_surface() {
        let center = Vec3::new(2.0, 0.0, -1.0);
        let mesh = LineMesh::build(center, [3, 4, 5]);
        for vertex in &mesh.vertices {
            let local = Vec3::from(*vertex) - center;
            let reach = local.abs().max_element();
            // The normal-axis coordinate of every template point is ±1
            // before inflation.
            assert!((reach - LINE_INFLATION).abs() < 1e-5);
        }
    }

    #[test]
    fn segments_connect_adjacent_grid_points() {
        let cells = [3, 4, 5];
        let mesh = LineMesh::build(Vec3::ZERO, cells);
        let grid = GridLayout::from_cells(cells);
        let [pu, pv, pw] = grid.pts;
        // Largest grid spacing is along the axis with the fewest points.
        let max_step = LINE_INFLATION * 2.0 / (pu.min(pv).min(pw) - 1) as f32;
        for segment in mesh.boundary.iter().chain(&mesh.elements) {
            let a = Vec3::from(mesh.vertices[segment.a as usize]);
            let b = Vec3::from(mesh.vertices[segment.b as usize]);
            let step = (a - b).length();
            assert!(step > 0.0 && step <= max_step + 1e-5);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let a = LineMesh::build(Vec3::new(1.0, 2.0, 3.0), [3, 4, 5]);
        let b = LineMesh::build(Vec3::new(1.0, 2.0, 3.0), [3, 4, 5]);
        assert_eq!(a, b);
    }
}
