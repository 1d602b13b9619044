//! Refined surface mesh generation
//!
//! Builds the render-resolution vertex grid and the quad list for the six
//! box faces. Vertex positions live in a local `[-1, 1]³` cube translated
//! by the patch center; shared edge and corner points appear exactly once
//! thanks to the [`GridLayout`] offset scheme.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::grid::{AxisPair, CellLayout, GridLayout, Side};
use crate::partition::PartitionTable;

/// A quad face: four indices into the refined vertex array, wound
/// counter-clockwise as seen from outside the box.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Quad {
    /// First corner.
    pub a: u32,
    /// Second corner.
    pub b: u32,
    /// Third corner (diagonal from `a`).
    pub c: u32,
    /// Fourth corner.
    pub d: u32,
}

/// Local face-plane parameter: maps grid index `i` of `N` points onto
/// `[-1, 1]`.
pub fn lpt(i: usize, n: usize) -> f32 {
    i as f32 / (n - 1) as f32 * 2.0 - 1.0
}

/// Refined-resolution surface mesh of one box patch.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMesh {
    /// Vertex positions, one entry per distinct surface point.
    pub vertices: Vec<[f32; 3]>,
    /// Quads grouped per face in [`FACES`](crate::grid::FACES) order.
    pub quads: Vec<Quad>,
    /// Per-face quad ranges.
    pub faces: PartitionTable,
}

impl FaceMesh {
    /// Build the mesh for a box centered at `center` with the given
    /// refined cell counts per axis.
    pub fn build(center: Vec3, cells: [usize; 3]) -> Self {
        let layout = CellLayout::new(cells);
        let grid = layout.points();

        Self {
            vertices: build_vertices(center, &grid),
            quads: build_quads(&layout),
            faces: PartitionTable::from_counts(layout.face_quad_counts()),
        }
    }
}

fn build_vertices(center: Vec3, grid: &GridLayout) -> Vec<[f32; 3]> {
    let [u, v, w] = grid.pts;
    let mut vertices = vec![[0.0f32; 3]; grid.point_count()];

    for side in Side::BOTH {
        for j in 0..v {
            for i in 0..u {
                vertices[grid.uv_pt(i, j, side)] =
                    (center + Vec3::new(lpt(i, u), lpt(j, v), side.sign())).to_array();
            }
        }
        for j in 1..w - 1 {
            for i in 0..u {
                vertices[grid.uw_pt(i, j, side)] =
                    (center + Vec3::new(lpt(i, u), side.sign(), lpt(j, w))).to_array();
            }
        }
        for j in 1..w - 1 {
            for i in 1..v - 1 {
                vertices[grid.vw_pt(i, j, side)] =
                    (center + Vec3::new(side.sign(), lpt(i, v), lpt(j, w))).to_array();
            }
        }
    }

    vertices
}

fn build_quads(layout: &CellLayout) -> Vec<Quad> {
    let grid = layout.points();
    let [u, v, w] = layout.cells;
    let mut quads = vec![Quad::zeroed(); layout.quad_count()];

    for side in Side::BOTH {
        for j in 0..v {
            for i in 0..u {
                quads[layout.uv_quad(i, j, side)] = wind(
                    grid.uv_pt(i, j, side),
                    grid.uv_pt(i + 1, j, side),
                    grid.uv_pt(i + 1, j + 1, side),
                    grid.uv_pt(i, j + 1, side),
                    flip_winding(AxisPair::Uv, side),
                );
            }
        }
        for j in 0..w {
            for i in 0..u {
                quads[layout.uw_quad(i, j, side)] = wind(
                    grid.uw_pt(i, j, side),
                    grid.uw_pt(i + 1, j, side),
                    grid.uw_pt(i + 1, j + 1, side),
                    grid.uw_pt(i, j + 1, side),
                    flip_winding(AxisPair::Uw, side),
                );
            }
        }
        for j in 0..w {
            for i in 0..v {
                quads[layout.vw_quad(i, j, side)] = wind(
                    grid.vw_pt(i, j, side),
                    grid.vw_pt(i + 1, j, side),
                    grid.vw_pt(i + 1, j + 1, side),
                    grid.vw_pt(i, j + 1, side),
                    flip_winding(AxisPair::Vw, side),
                );
            }
        }
    }

    quads
}

/// Whether the natural `(i, j)` traversal of this face runs clockwise as
/// seen from outside, requiring the quad order to be reversed.
///
/// The in-plane axes cross to `+W` for U×V, `-V` for U×W and `+U` for V×W.
fn flip_winding(pair: AxisPair, side: Side) -> bool {
    match pair {
        AxisPair::Uv => side == Side::Neg,
        AxisPair::Uw => side == Side::Pos,
        AxisPair::Vw => side == Side::Neg,
    }
}

fn wind(p00: usize, p10: usize, p11: usize, p01: usize, flip: bool) -> Quad {
    if flip {
        Quad {
            a: p00 as u32,
            b: p01 as u32,
            c: p11 as u32,
            d: p10 as u32,
        }
    } else {
        Quad {
            a: p00 as u32,
            b: p10 as u32,
            c: p11 as u32,
            d: p01 as u32,
        }
    }
}
