//! Static scene layout and the procedurally assembled spaceship.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::{
    math::{make_rotation_z, make_scaling, make_translation, MathError},
    mesh::{concatenate, SimpleMesh},
    shapes::{make_cone, make_cube, make_cylinder},
};

pub const SPACESHIP_SUBDIVISIONS: usize = 16;

pub const LANDING_PAD_POSITIONS: [Vec3; 2] =
    [Vec3::new(10.0, -0.9, 40.0), Vec3::new(-20.0, -0.9, -30.0)];

const HULL_COLOR: Vec3 = Vec3::new(2.0, 2.0, 2.0);
const WHITE: Vec3 = Vec3::ONE;
const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const FIN_COLOR: Vec3 = Vec3::new(1.0, 0.098, 0.2);

const BOOSTER_OFFSETS: [Vec3; 3] = [
    Vec3::new(0.0, 2.8, 0.0),
    Vec3::new(0.0, 0.0, 2.0),
    Vec3::new(0.0, 0.0, -2.0),
];

pub fn terrain_model() -> Mat4 {
    Mat4::IDENTITY
}

pub fn landing_pad_models() -> [Mat4; 2] {
    LANDING_PAD_POSITIONS.map(make_translation)
}

/// Stands a part upright: scale, move along its own axis, then turn +X into +Y.
fn part_transform(scale: Vec3, offset: Vec3) -> Mat4 {
    make_rotation_z(FRAC_PI_2) * make_scaling(scale.x, scale.y, scale.z) * make_translation(offset)
}

/// Four cylinders, four cones and two cubes fused into one mesh.
pub fn build_spaceship() -> Result<SimpleMesh, MathError> {
    let n = SPACESHIP_SUBDIVISIONS;

    let mut ship = make_cylinder(
        true,
        n,
        HULL_COLOR,
        part_transform(Vec3::new(2.2, 0.2, 0.2), Vec3::ZERO),
    )?;
    ship = concatenate(
        ship,
        &make_cone(
            true,
            n,
            RED,
            part_transform(Vec3::new(1.5, 0.2, 0.2), Vec3::new(1.45, 0.0, 0.0)),
        )?,
    );

    for offset in BOOSTER_OFFSETS {
        let body = part_transform(Vec3::new(0.8, 0.1, 0.1), offset);
        let nose = part_transform(Vec3::new(1.0, 0.1, 0.1), offset + Vec3::new(0.8, 0.0, 0.0));

        ship = concatenate(ship, &make_cylinder(true, n, WHITE, body)?);
        ship = concatenate(ship, &make_cone(true, n, RED, nose)?);
    }

    for offset in [Vec3::new(1.0, -2.8, 0.0), Vec3::new(3.2, -2.8, 0.0)] {
        let fin = part_transform(Vec3::new(0.2, 0.1, 0.1), offset);
        ship = concatenate(ship, &make_cube(FIN_COLOR, fin)?);
    }

    Ok(ship)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaceship_has_every_part() {
        let ship = build_spaceship().unwrap();
        // 4 capped cylinders, 4 capped cones, 2 cubes.
        assert_eq!(ship.len(), 4 * 16 * 9 + 4 * 16 * 6 + 2 * 36);
        assert!(ship.is_well_formed());
    }

    #[test]
    fn spaceship_stands_upright() {
        let ship = build_spaceship().unwrap();
        let top = ship.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let bottom = ship.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);

        // Main hull spans [0, 2.2] and its cone reaches 1.5 * (1.45 + 1).
        assert!((bottom - 0.0).abs() < 1e-4);
        assert!((top - 3.675).abs() < 1e-4);
    }

    #[test]
    fn spaceship_starts_with_the_hull() {
        let ship = build_spaceship().unwrap();
        assert!(ship.colors[..144].iter().all(|color| *color == HULL_COLOR));
        assert!(ship.colors[144..240].iter().all(|color| *color == RED));
        assert!(ship.colors[ship.len() - 72..]
            .iter()
            .all(|color| *color == FIN_COLOR));
    }

    #[test]
    fn landing_pads_are_placed() {
        let [first, second] = landing_pad_models();
        assert!(first
            .w_axis
            .truncate()
            .abs_diff_eq(Vec3::new(10.0, -0.9, 40.0), 1e-6));
        assert!(second
            .w_axis
            .truncate()
            .abs_diff_eq(Vec3::new(-20.0, -0.9, -30.0), 1e-6));
        assert_eq!(terrain_model(), Mat4::IDENTITY);
    }
}
