//! Procedural primitives.
//!
//! Every shape is generated around the +X axis with unit radius and x in
//! [0, 1], then moved into place by a pre-transform. Positions go through the
//! full homogeneous transform; normals go through its normal matrix, so the
//! returned mesh is already in the pre-transformed space.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::{
    math::{self, MathError},
    mesh::SimpleMesh,
};

/// Six faces of the [-1, 1] cube, corners counter-clockwise seen from outside.
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
    [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
    [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
];

/// Point on the unit circle in the (y, z) plane at x.
fn ring_point(x: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(x, cos, sin)
}

fn radial_normal(angle: f32) -> Vec3 {
    ring_point(0.0, angle)
}

/// Angles bounding each of the `subdivisions` segments around the axis.
fn segments(subdivisions: usize) -> impl Iterator<Item = (f32, f32)> {
    (0..subdivisions).map(move |i| {
        let start = i as f32 / subdivisions as f32 * TAU;
        let end = (i + 1) as f32 / subdivisions as f32 * TAU;
        (start, end)
    })
}

fn push_base_cap(local: &mut Vec<(Vec3, Vec3)>, start: f32, end: f32) {
    local.push((Vec3::ZERO, Vec3::NEG_X));
    local.push((ring_point(0.0, end), Vec3::NEG_X));
    local.push((ring_point(0.0, start), Vec3::NEG_X));
}

/// Moves locally generated `(position, normal)` pairs through `pre_transform`.
fn finish(
    local: Vec<(Vec3, Vec3)>,
    color: Vec3,
    pre_transform: Mat4,
) -> Result<SimpleMesh, MathError> {
    let normal_matrix = math::normal_matrix(pre_transform)?;

    let mut mesh = SimpleMesh::with_capacity(local.len());
    for (position, normal) in local {
        mesh.push_vertex(
            math::transform_point(pre_transform, position),
            color,
            math::normalize(normal_matrix * normal)?,
        );
    }

    debug_assert!(mesh.is_well_formed());
    Ok(mesh)
}

pub fn make_cylinder(
    capped: bool,
    subdivisions: usize,
    color: Vec3,
    pre_transform: Mat4,
) -> Result<SimpleMesh, MathError> {
    let per_segment = if capped { 9 } else { 6 };
    let mut local = Vec::with_capacity(subdivisions * per_segment);

    for (start, end) in segments(subdivisions) {
        let start_normal = radial_normal(start);
        let end_normal = radial_normal(end);

        local.push((ring_point(0.0, start), start_normal));
        local.push((ring_point(0.0, end), end_normal));
        local.push((ring_point(1.0, start), start_normal));

        local.push((ring_point(0.0, end), end_normal));
        local.push((ring_point(1.0, end), end_normal));
        local.push((ring_point(1.0, start), start_normal));

        if capped {
            push_base_cap(&mut local, start, end);
        }
    }

    finish(local, color, pre_transform)
}

pub fn make_cone(
    capped: bool,
    subdivisions: usize,
    color: Vec3,
    pre_transform: Mat4,
) -> Result<SimpleMesh, MathError> {
    let per_segment = if capped { 6 } else { 3 };
    let mut local = Vec::with_capacity(subdivisions * per_segment);

    for (start, end) in segments(subdivisions) {
        local.push((ring_point(0.0, start), radial_normal(start)));
        local.push((ring_point(0.0, end), radial_normal(end)));
        local.push((Vec3::X, radial_normal((start + end) / 2.0)));

        if capped {
            push_base_cap(&mut local, start, end);
        }
    }

    finish(local, color, pre_transform)
}

/// A closed 12-triangle cube spanning [-1, 1] on every axis.
pub fn make_cube(color: Vec3, pre_transform: Mat4) -> Result<SimpleMesh, MathError> {
    let mut local = Vec::with_capacity(36);

    for [a, b, c, d] in CUBE_FACES.map(|face| face.map(Vec3::from)) {
        for [p0, p1, p2] in [[a, b, c], [a, c, d]] {
            let normal = math::normalize((p1 - p0).cross(p2 - p0))?;
            local.extend([(p0, normal), (p1, normal), (p2, normal)]);
        }
    }

    finish(local, color, pre_transform)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::math::{make_rotation_z, make_scaling, make_translation};

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    fn assert_outward(mesh: &SimpleMesh, center: Vec3) {
        for triangle in 0..mesh.len() / 3 {
            let i = triangle * 3;
            let [p0, p1, p2] = [mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2]];
            let face_normal = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(
                face_normal.dot(centroid - center) > 0.0,
                "triangle {triangle} winds inward"
            );
        }
    }

    #[test]
    fn capped_cylinder_vertex_count() {
        let mesh = make_cylinder(true, 16, RED, Mat4::IDENTITY).unwrap();
        assert_eq!(mesh.len(), 16 * 9);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn uncapped_cylinder_has_no_base() {
        let mesh = make_cylinder(false, 16, RED, Mat4::IDENTITY).unwrap();
        assert_eq!(mesh.len(), 16 * 6);
        assert!(mesh.normals.iter().all(|normal| normal.x.abs() < 1e-6));
    }

    #[test]
    fn cone_vertex_counts() {
        assert_eq!(make_cone(false, 12, RED, Mat4::IDENTITY).unwrap().len(), 12 * 3);
        assert_eq!(make_cone(true, 12, RED, Mat4::IDENTITY).unwrap().len(), 12 * 6);
    }

    #[test]
    fn zero_subdivisions_gives_empty_mesh() {
        assert!(make_cone(true, 0, RED, Mat4::IDENTITY).unwrap().is_empty());
        assert!(make_cylinder(true, 0, RED, Mat4::IDENTITY).unwrap().is_empty());
    }

    #[test]
    fn every_primitive_is_well_formed() {
        let transform = make_rotation_z(PI / 2.0)
            * make_scaling(2.2, 0.2, 0.2)
            * make_translation(Vec3::new(1.45, 0.0, 0.0));

        for mesh in [
            make_cone(true, 7, RED, transform).unwrap(),
            make_cone(false, 32, RED, transform).unwrap(),
            make_cylinder(true, 5, RED, transform).unwrap(),
            make_cylinder(false, 3, RED, transform).unwrap(),
            make_cube(RED, transform).unwrap(),
        ] {
            assert!(mesh.is_well_formed());
            assert!(mesh.colors.iter().all(|color| *color == RED));
            assert!(mesh
                .normals
                .iter()
                .all(|normal| (normal.length() - 1.0).abs() < 1e-5));
        }
    }

    #[test]
    fn cylinder_side_normals_point_away_from_axis() {
        let mesh = make_cylinder(false, 8, RED, Mat4::IDENTITY).unwrap();
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            let radial = Vec3::new(0.0, position.y, position.z);
            assert!(normal.abs_diff_eq(radial, 1e-5));
        }
    }

    #[test]
    fn cylinder_winds_outward() {
        let mesh = make_cylinder(true, 16, RED, Mat4::IDENTITY).unwrap();
        assert_outward(&mesh, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn cone_tip_is_transformed() {
        let transform = make_translation(Vec3::new(0.0, 3.0, 0.0)) * make_scaling(2.0, 1.0, 1.0);
        let mesh = make_cone(false, 4, RED, transform).unwrap();
        assert!(mesh.positions[2].abs_diff_eq(Vec3::new(2.0, 3.0, 0.0), 1e-6));
    }

    #[test]
    fn cube_normals_are_flat_and_outward() {
        let mesh = make_cube(RED, Mat4::IDENTITY).unwrap();
        assert_eq!(mesh.len(), 36);
        assert_outward(&mesh, Vec3::ZERO);

        for triangle in mesh.normals.chunks(3) {
            assert_eq!(triangle[0], triangle[1]);
            assert_eq!(triangle[1], triangle[2]);
        }
    }

    #[test]
    fn normals_follow_anisotropic_scale() {
        // Squashing y makes the cylinder's side normals lean towards y.
        let mesh = make_cylinder(false, 8, RED, make_scaling(1.0, 0.5, 1.0)).unwrap();
        let start = Vec3::new(0.0, 1.0, 1.0).normalize();
        let index = mesh
            .normals
            .iter()
            .position(|normal| normal.y > 0.0 && normal.z > 0.0)
            .unwrap();
        assert!(mesh.normals[index].y / mesh.normals[index].z > start.y / start.z);
    }

    #[test]
    fn singular_pre_transform_is_rejected() {
        let flat = make_scaling(1.0, 0.0, 1.0);
        assert!(make_cube(RED, flat).is_err());
        assert!(make_cone(true, 8, RED, flat).is_err());
    }
}
