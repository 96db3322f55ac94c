//! Moves the vehicle along a quadratic Bezier curve.

use glam::{Mat4, Vec3};

use crate::{
    config::FlightSettings,
    math::{self, make_rotation_z, make_translation},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VehiclePose {
    Parked(Vec3),
    Flying { position: Vec3, heading: f32 },
    /// The flight has ended and the vehicle is no longer drawn.
    Finished,
}

impl VehiclePose {
    pub fn model_matrix(&self) -> Option<Mat4> {
        match *self {
            VehiclePose::Parked(position) => Some(make_translation(position)),
            VehiclePose::Flying { position, heading } => {
                Some(make_translation(position) * make_rotation_z(heading))
            }
            VehiclePose::Finished => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Animation {
    pub is_animating: bool,
    pub reset_requested: bool,
    pub t: f32,

    speed: f32,
    control_points: [Vec3; 3],
    parked_position: Vec3,
}

impl Animation {
    pub fn new(settings: &FlightSettings) -> Self {
        Self {
            is_animating: false,
            reset_requested: false,
            t: 0.0,

            speed: settings.animation_speed,
            control_points: settings.control_points,
            parked_position: settings.parked_position,
        }
    }

    pub fn launch(&mut self) {
        self.is_animating = true;
    }

    pub fn reset(&mut self) {
        self.is_animating = false;
        self.reset_requested = true;
    }

    /// Where the vehicle currently is, for cameras that follow it.
    pub fn position(&self) -> Vec3 {
        if self.is_animating {
            self.point_at(self.t.min(1.0))
        } else {
            self.parked_position
        }
    }

    fn point_at(&self, t: f32) -> Vec3 {
        let [p0, p1, p2] = self.control_points;
        math::quadratic_bezier(p0, p1, p2, t)
    }

    /// Rotation about z that points the vehicle along the curve at `t`.
    /// A degenerate tangent keeps the vehicle unrotated.
    fn heading_at(&self, t: f32) -> f32 {
        let [p0, p1, p2] = self.control_points;
        match math::normalize(math::quadratic_bezier_tangent(p0, p1, p2, t)) {
            Ok(tangent) => (-tangent.x).atan2(-tangent.z),
            Err(_) => 0.0,
        }
    }

    /// Rewinds to the start of the path if a reset is waiting on a launch.
    pub fn apply_pending_reset(&mut self) {
        if self.is_animating && self.reset_requested {
            self.t = 0.0;
            self.reset_requested = false;
        }
    }

    /// Evaluates the pose for this frame and advances `t` afterwards.
    pub fn step(&mut self, delta_time: f32) -> VehiclePose {
        if !self.is_animating {
            return VehiclePose::Parked(self.parked_position);
        }

        self.apply_pending_reset();

        if self.t >= 1.0 {
            return VehiclePose::Finished;
        }

        let pose = VehiclePose::Flying {
            position: self.point_at(self.t),
            heading: self.heading_at(self.t),
        };
        self.t += delta_time * self.speed;

        pose
    }

    pub fn progress(&self) -> f32 {
        self.t.clamp(0.0, 1.0)
    }
}
