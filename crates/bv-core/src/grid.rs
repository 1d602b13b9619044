//! Grid indexing for box surface meshes
//!
//! A box surface is covered by three families of coordinate grids, one per
//! pair of opposing faces (U×V, U×W, V×W). This module maps logical grid
//! coordinates `(axis-pair, i, j, side)` to unique offsets into the flat
//! vertex and quad arrays, so that points shared between adjoining faces
//! are stored exactly once and every buffer size has a closed form.
//!
//! The offset functions are pure index arithmetic with no state. Every
//! other geometry component builds on them, and buffer allocations are
//! sized from the count functions here, so the formulas must be exact.

/// One of the two opposing faces in an axis-pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The face at `-1` along the pair's normal axis.
    Neg,
    /// The face at `+1` along the pair's normal axis.
    Pos,
}

impl Side {
    /// Both sides, in face-enumeration order.
    pub const BOTH: [Side; 2] = [Side::Neg, Side::Pos];

    /// 0 for `Neg`, 1 for `Pos`.
    pub fn index(self) -> usize {
        match self {
            Side::Neg => 0,
            Side::Pos => 1,
        }
    }

    /// Position along the normal axis, before refinement of the face plane.
    pub fn sign(self) -> f32 {
        match self {
            Side::Neg => -1.0,
            Side::Pos => 1.0,
        }
    }

    /// The boundary grid index owned by this side: 0 or `n - 1`.
    pub fn edge(self, n: usize) -> usize {
        match self {
            Side::Neg => 0,
            Side::Pos => n - 1,
        }
    }
}

/// One of the three orthogonal coordinate-plane families covering the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisPair {
    /// Faces normal to the W axis.
    Uv,
    /// Faces normal to the V axis.
    Uw,
    /// Faces normal to the U axis.
    Vw,
}

impl AxisPair {
    /// All pairs, in face-enumeration order.
    pub const ALL: [AxisPair; 3] = [AxisPair::Uv, AxisPair::Uw, AxisPair::Vw];

    /// 0 for U×V, 1 for U×W, 2 for V×W.
    pub fn index(self) -> usize {
        match self {
            AxisPair::Uv => 0,
            AxisPair::Uw => 1,
            AxisPair::Vw => 2,
        }
    }

    /// Flat face index in `0..6` for this pair and side.
    pub fn face(self, side: Side) -> usize {
        2 * self.index() + side.index()
    }
}

/// The six box faces in partition order:
/// `(UV−, UV+, UW−, UW+, VW−, VW+)`.
pub const FACES: [(AxisPair, Side); 6] = [
    (AxisPair::Uv, Side::Neg),
    (AxisPair::Uv, Side::Pos),
    (AxisPair::Uw, Side::Neg),
    (AxisPair::Uw, Side::Pos),
    (AxisPair::Vw, Side::Neg),
    (AxisPair::Vw, Side::Pos),
];

/// Point-grid layout over the box surface.
///
/// `pts = [nPtsU, nPtsV, nPtsW]` are point counts along the three axes
/// (cells + 1, each at least 2). The U×V pair owns its full
/// `nPtsU × nPtsV` grid on both sides. The U×W pair owns only interior W
/// rows (`1..nPtsW-1`); its boundary rows coincide with U×V edges and are
/// redirected there. The V×W pair owns only interior rows and columns,
/// redirecting its boundaries to U×V and U×W. This stores every shared
/// edge and corner point exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Point counts along the U, V, W axes.
    pub pts: [usize; 3],
}

impl GridLayout {
    /// Layout for a grid with the given cell counts per axis.
    pub fn from_cells(cells: [usize; 3]) -> Self {
        Self {
            pts: cells.map(|n| n + 1),
        }
    }

    /// Total number of distinct surface points.
    ///
    /// `2·nPtsU·nPtsV + 2·nPtsU·(nPtsW−2) + 2·(nPtsV−2)·(nPtsW−2)`.
    pub fn point_count(&self) -> usize {
        let [u, v, w] = self.pts;
        2 * u * v + 2 * u * (w - 2) + 2 * (v - 2) * (w - 2)
    }

    /// Offset of point `(i, j)` on a U×V face.
    ///
    /// Domain: `i < nPtsU`, `j < nPtsV`. Owns the full grid on both sides.
    pub fn uv_pt(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, _] = self.pts;
        debug_assert!(i < u && j < v);
        side.index() * u * v + j * u + i
    }

    /// Offset of point `(i, j)` on a U×W face.
    ///
    /// Domain: `i < nPtsU`, `j < nPtsW`. The boundary rows `j = 0` and
    /// `j = nPtsW − 1` lie on U×V edges and resolve to the offsets owned
    /// there.
    pub fn uw_pt(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, w] = self.pts;
        debug_assert!(i < u && j < w);
        if j == 0 {
            return self.uv_pt(i, side.edge(v), Side::Neg);
        }
        if j == w - 1 {
            return self.uv_pt(i, side.edge(v), Side::Pos);
        }
        let base = 2 * u * v;
        base + side.index() * u * (w - 2) + (j - 1) * u + i
    }

    /// Offset of point `(i, j)` on a V×W face.
    ///
    /// Domain: `i < nPtsV`, `j < nPtsW`. Boundary rows (`j`) resolve to
    /// U×V offsets and boundary columns (`i`) to U×W offsets.
    pub fn vw_pt(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, w] = self.pts;
        debug_assert!(i < v && j < w);
        if j == 0 {
            return self.uv_pt(side.edge(u), i, Side::Neg);
        }
        if j == w - 1 {
            return self.uv_pt(side.edge(u), i, Side::Pos);
        }
        if i == 0 {
            return self.uw_pt(side.edge(u), j, Side::Neg);
        }
        if i == v - 1 {
            return self.uw_pt(side.edge(u), j, Side::Pos);
        }
        let base = 2 * u * v + 2 * u * (w - 2);
        base + side.index() * (v - 2) * (w - 2) + (j - 1) * (v - 2) + (i - 1)
    }

    /// Offset of point `(i, j)` on the face of the given pair.
    pub fn pt(&self, pair: AxisPair, i: usize, j: usize, side: Side) -> usize {
        match pair {
            AxisPair::Uv => self.uv_pt(i, j, side),
            AxisPair::Uw => self.uw_pt(i, j, side),
            AxisPair::Vw => self.vw_pt(i, j, side),
        }
    }
}

/// Cell-grid layout over the box surface.
///
/// `cells = [nU, nV, nW]` are cell counts per axis (each at least 1).
/// Unlike points, quads are never shared between faces, so every face
/// owns its full grid: `2·nU·nV + 2·nU·nW + 2·nV·nW` quads in total,
/// grouped contiguously per face in [`FACES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    /// Cell counts along the U, V, W axes.
    pub cells: [usize; 3],
}

impl CellLayout {
    /// Layout for the given cell counts per axis.
    pub fn new(cells: [usize; 3]) -> Self {
        Self { cells }
    }

    /// The matching point-grid layout (cells + 1 per axis).
    pub fn points(&self) -> GridLayout {
        GridLayout::from_cells(self.cells)
    }

    /// In-plane cell counts `(n1, n2)` for a face of the given pair.
    pub fn pair_dims(&self, pair: AxisPair) -> (usize, usize) {
        let [u, v, w] = self.cells;
        match pair {
            AxisPair::Uv => (u, v),
            AxisPair::Uw => (u, w),
            AxisPair::Vw => (v, w),
        }
    }

    /// Total quad count across all six faces.
    pub fn quad_count(&self) -> usize {
        let [u, v, w] = self.cells;
        2 * (u * v + u * w + v * w)
    }

    /// Quad count per face, in [`FACES`] order.
    pub fn face_quad_counts(&self) -> [usize; 6] {
        FACES.map(|(pair, _)| {
            let (n1, n2) = self.pair_dims(pair);
            n1 * n2
        })
    }

    /// Boundary segment count per face (`2·(n1 + n2)`), in [`FACES`] order.
    ///
    /// Each face traces its own full perimeter, so physically shared box
    /// edges are counted once per adjoining face.
    pub fn face_boundary_counts(&self) -> [usize; 6] {
        FACES.map(|(pair, _)| {
            let (n1, n2) = self.pair_dims(pair);
            2 * (n1 + n2)
        })
    }

    /// Interior grid-line segment count per face
    /// (`n1·(n2−1) + n2·(n1−1)`), in [`FACES`] order.
    pub fn face_interior_line_counts(&self) -> [usize; 6] {
        FACES.map(|(pair, _)| {
            let (n1, n2) = self.pair_dims(pair);
            n1 * (n2 - 1) + n2 * (n1 - 1)
        })
    }

    /// Offset of quad `(i, j)` on a U×V face. Domain: `i < nU`, `j < nV`.
    pub fn uv_quad(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, _] = self.cells;
        debug_assert!(i < u && j < v);
        side.index() * u * v + j * u + i
    }

    /// Offset of quad `(i, j)` on a U×W face. Domain: `i < nU`, `j < nW`.
    pub fn uw_quad(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, w] = self.cells;
        debug_assert!(i < u && j < w);
        2 * u * v + side.index() * u * w + j * u + i
    }

    /// Offset of quad `(i, j)` on a V×W face. Domain: `i < nV`, `j < nW`.
    pub fn vw_quad(&self, i: usize, j: usize, side: Side) -> usize {
        let [u, v, w] = self.cells;
        debug_assert!(i < v && j < w);
        2 * u * v + 2 * u * w + side.index() * v * w + j * v + i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIGS: [[usize; 3]; 5] = [[1, 1, 1], [1, 1, 2], [3, 4, 5], [6, 8, 10], [2, 7, 1]];

    #[test]
    fn point_count_matches_formula() {
        for cells in CONFIGS {
            let g = GridLayout::from_cells(cells);
            let [u, v, w] = g.pts;
            assert_eq!(
                g.point_count(),
                2 * u * v + 2 * u * (w - 2) + 2 * (v - 2) * (w - 2)
            );
        }
    }

    #[test]
    fn minimal_grid_is_the_eight_corners() {
        let g = GridLayout::from_cells([1, 1, 1]);
        assert_eq!(g.point_count(), 8);
    }

    /// Every owned logical coordinate maps to a distinct offset and the
    /// offsets cover `0..point_count` exactly (injectivity + surjectivity).
    #[test]
    fn owned_points_cover_range_exactly_once() {
        for cells in CONFIGS {
            let g = GridLayout::from_cells(cells);
            let [u, v, w] = g.pts;
            let mut seen = vec![0u32; g.point_count()];

            for side in Side::BOTH {
                for j in 0..v {
                    for i in 0..u {
                        seen[g.uv_pt(i, j, side)] += 1;
                    }
                }
                for j in 1..w - 1 {
                    for i in 0..u {
                        seen[g.uw_pt(i, j, side)] += 1;
                    }
                }
                for j in 1..w - 1 {
                    for i in 1..v - 1 {
                        seen[g.vw_pt(i, j, side)] += 1;
                    }
                }
            }

            assert!(
                seen.iter().all(|&n| n == 1),
                "coverage failure for cells {cells:?}"
            );
        }
    }

    /// Redirected boundary coordinates agree between the two faces that
    /// share the edge: the same physical point yields the same offset.
    #[test]
    fn shared_edges_redirect_consistently() {
        let g = GridLayout::from_cells([3, 4, 5]);
        let [u, v, w] = g.pts;

        for side in Side::BOTH {
            // UW boundary rows land on UV edges
            for i in 0..u {
                assert_eq!(g.uw_pt(i, 0, side), g.uv_pt(i, side.edge(v), Side::Neg));
                assert_eq!(
                    g.uw_pt(i, w - 1, side),
                    g.uv_pt(i, side.edge(v), Side::Pos)
                );
            }
            // VW boundary columns land on UW rows, boundary rows on UV edges
            for j in 0..w {
                assert_eq!(g.vw_pt(0, j, side), g.uw_pt(side.edge(u), j, Side::Neg));
                assert_eq!(
                    g.vw_pt(v - 1, j, side),
                    g.uw_pt(side.edge(u), j, Side::Pos)
                );
            }
            for i in 0..v {
                assert_eq!(g.vw_pt(i, 0, side), g.uv_pt(side.edge(u), i, Side::Neg));
                assert_eq!(
                    g.vw_pt(i, w - 1, side),
                    g.uv_pt(side.edge(u), i, Side::Pos)
                );
            }
        }
    }

    /// Corner points reached through different redirect chains must agree.
    #[test]
    fn corner_redirects_agree() {
        let g = GridLayout::from_cells([3, 4, 5]);
        let [_, v, w] = g.pts;
        for side in Side::BOTH {
            for js in Side::BOTH {
                // Box corner via VW (i and j both on a boundary) vs via UW
                assert_eq!(
                    g.vw_pt(js.edge(v), 0, side),
                    g.uw_pt(side.edge(g.pts[0]), 0, js)
                );
                assert_eq!(
                    g.vw_pt(js.edge(v), w - 1, side),
                    g.uw_pt(side.edge(g.pts[0]), w - 1, js)
                );
            }
        }
    }

    #[test]
    fn quad_slots_cover_range_exactly_once() {
        for cells in CONFIGS {
            let c = CellLayout::new(cells);
            let [u, v, w] = c.cells;
            let mut seen = vec![0u32; c.quad_count()];

            for side in Side::BOTH {
                for j in 0..v {
                    for i in 0..u {
                        seen[c.uv_quad(i, j, side)] += 1;
                    }
                }
                for j in 0..w {
                    for i in 0..u {
                        seen[c.uw_quad(i, j, side)] += 1;
                    }
                }
                for j in 0..w {
                    for i in 0..v {
                        seen[c.vw_quad(i, j, side)] += 1;
                    }
                }
            }

            assert!(seen.iter().all(|&n| n == 1));
        }
    }

    #[test]
    fn quads_group_per_face_in_partition_order() {
        let c = CellLayout::new([3, 4, 5]);
        let counts = c.face_quad_counts();
        let mut offset = 0;
        // First quad of each face sits at the running-sum offset
        assert_eq!(c.uv_quad(0, 0, Side::Neg), offset);
        offset += counts[0];
        assert_eq!(c.uv_quad(0, 0, Side::Pos), offset);
        offset += counts[1];
        assert_eq!(c.uw_quad(0, 0, Side::Neg), offset);
        offset += counts[2];
        assert_eq!(c.uw_quad(0, 0, Side::Pos), offset);
        offset += counts[3];
        assert_eq!(c.vw_quad(0, 0, Side::Neg), offset);
        offset += counts[4];
        assert_eq!(c.vw_quad(0, 0, Side::Pos), offset);
    }

    #[test]
    fn line_counts_match_closed_forms() {
        let c = CellLayout::new([3, 4, 5]);
        let [u, v, w] = c.cells;
        let interior = c.face_interior_line_counts();
        assert_eq!(interior[0], u * (v - 1) + v * (u - 1));
        assert_eq!(interior[2], u * (w - 1) + w * (u - 1));
        assert_eq!(interior[4], v * (w - 1) + w * (v - 1));
        let boundary = c.face_boundary_counts();
        assert_eq!(boundary.iter().sum::<usize>(), 8 * (u + v + w));
    }
}
