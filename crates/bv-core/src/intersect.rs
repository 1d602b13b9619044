//! Ray intersection against the quad mesh
//!
//! Used for interactive picking: a ray is given as two points and tested
//! against every quad of a patch, each quad split into two triangles
//! along its first-to-third-corner diagonal.

use glam::{Mat3, Vec3};

use crate::mesh::Quad;

/// Determinant threshold below which a ray is treated as parallel to the
/// triangle plane and skipped. Not an error, an expected geometric case.
pub const DEGENERACY_EPSILON: f32 = 1e-4;

/// Ray-triangle intersection test.
///
/// Solves the 3×3 linear system
/// `[va−vc | vb−vc | start−end] · [β, γ, t]ᵗ = start − vc`
/// by Cramer's rule. `β` and `γ` are barycentric-style coordinates of the
/// hit relative to `va` and `vb` (with `1−β−γ` relative to `vc`), and `t`
/// parameterizes the ray so the hit point is `start + t·(end − start)`.
///
/// # Returns
///
/// * `Some(t)` — the ray parameter, when the hit lies inside the triangle
///   (`β ≥ 0`, `γ ≥ 0`, `β+γ ≤ 1`) and forward of `start` (`t ≥ 0`).
/// * `None` — no hit, or the ray is (near-)parallel to the triangle plane.
pub fn ray_triangle_intersection(
    va: Vec3,
    vb: Vec3,
    vc: Vec3,
    start: Vec3,
    end: Vec3,
) -> Option<f32> {
    let m = Mat3::from_cols(va - vc, vb - vc, start - end);
    let det = m.determinant();
    if det.abs() < DEGENERACY_EPSILON {
        return None;
    }

    let rhs = start - vc;
    let beta = Mat3::from_cols(rhs, m.y_axis, m.z_axis).determinant() / det;
    let gamma = Mat3::from_cols(m.x_axis, rhs, m.z_axis).determinant() / det;
    let t = Mat3::from_cols(m.x_axis, m.y_axis, rhs).determinant() / det;

    (beta >= 0.0 && gamma >= 0.0 && beta + gamma <= 1.0 && t >= 0.0).then_some(t)
}

/// Test a ray against every quad of a patch surface.
///
/// Each quad `(a, b, c, d)` is split into triangles `(a, b, c)` and
/// `(a, c, d)`. Returns the parameter of the **first** accepted hit in
/// face/triangle enumeration order, which is not necessarily the nearest
/// hit when the ray pierces several faces; callers that only need a
/// hit/miss answer (selection picking) rely on exactly this.
pub fn ray_patch_intersection(
    vertices: &[[f32; 3]],
    quads: &[Quad],
    start: Vec3,
    end: Vec3,
) -> Option<f32> {
    let at = |i: u32| Vec3::from(vertices[i as usize]);

    for quad in quads {
        let (a, c) = (at(quad.a), at(quad.c));
        if let Some(t) = ray_triangle_intersection(a, at(quad.b), c, start, end) {
            return Some(t);
        }
        if let Some(t) = ray_triangle_intersection(a, c, at(quad.d), start, end) {
            return Some(t);
        }
    }

    None
}
