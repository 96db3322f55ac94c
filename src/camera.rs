use glam::{Mat4, Vec3};

use crate::{
    config::{CameraSettings, ProjectionSettings, TrackingSettings},
    math::{make_perspective_projection, make_rotation_x, make_rotation_y, make_translation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Free flight driven by the keyboard and mouse.
    Default,
    /// Follows the vehicle from a fixed offset behind it.
    FixedDistance,
    /// Watches the vehicle from a spot on the ground.
    Ground,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::Default => CameraMode::FixedDistance,
            CameraMode::FixedDistance => CameraMode::Ground,
            CameraMode::Ground => CameraMode::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Default => "Free",
            CameraMode::FixedDistance => "Fixed distance",
            CameraMode::Ground => "Ground",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Right,
    Left,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedModifier {
    SpeedUp,
    SlowDown,
}

#[derive(Debug, Default, Clone, Copy)]
struct MoveFlags {
    forward: bool,
    backward: bool,
    right: bool,
    left: bool,
    up: bool,
    down: bool,
    speed_up: bool,
    slow_down: bool,
}

/// Camera pose and the input state that drives it.
///
/// The view is `Rx(theta) * Ry(phi) * T(offset)`, so `offset` is the negated
/// eye position in world space.
#[derive(Debug, Clone)]
pub struct CameraControl {
    pub mode: CameraMode,
    pub active: bool,
    pub tracking: bool,
    pub phi: f32,
    pub theta: f32,
    pub offset: Vec3,

    flags: MoveFlags,
    settings: CameraSettings,
    tracking_settings: TrackingSettings,
}

impl CameraControl {
    pub fn new(settings: CameraSettings, tracking_settings: TrackingSettings) -> Self {
        Self {
            mode: CameraMode::Default,
            active: false,
            tracking: false,
            phi: 0.0,
            theta: 0.0,
            offset: Vec3::ZERO,

            flags: MoveFlags::default(),
            settings,
            tracking_settings,
        }
    }

    pub fn process_move(&mut self, direction: MoveDirection, pressed: bool) {
        let flag = match direction {
            MoveDirection::Forward => &mut self.flags.forward,
            MoveDirection::Backward => &mut self.flags.backward,
            MoveDirection::Right => &mut self.flags.right,
            MoveDirection::Left => &mut self.flags.left,
            MoveDirection::Up => &mut self.flags.up,
            MoveDirection::Down => &mut self.flags.down,
        };
        *flag = pressed;
    }

    pub fn process_speed(&mut self, modifier: SpeedModifier, pressed: bool) {
        match modifier {
            SpeedModifier::SpeedUp => self.flags.speed_up = pressed,
            SpeedModifier::SlowDown => self.flags.slow_down = pressed,
        }
    }

    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        if !self.active {
            return;
        }

        let sensitivity = self.settings.mouse_sensitivity;
        self.phi += dx * sensitivity;
        self.theta = (self.theta + dy * sensitivity)
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.tracking = true;
        if self.mode == CameraMode::Default {
            self.active = true;
        }
    }

    pub fn toggle_active(&mut self) {
        self.active = !self.active;
        self.tracking = false;
        self.mode = CameraMode::Ground;
    }

    fn speed(&self, delta_time: f32) -> f32 {
        let base = self.settings.movement_per_second * delta_time;
        if self.flags.speed_up {
            base * self.settings.speed_multiplier
        } else if self.flags.slow_down {
            base / self.settings.speed_multiplier
        } else {
            base
        }
    }

    /// Applies one frame of movement, then snaps to `target` if tracking.
    pub fn update(&mut self, delta_time: f32, target: Vec3) {
        if self.active {
            self.apply_movement(self.speed(delta_time));
        }

        if self.tracking {
            self.track(target);
        }
    }

    // Only the highest priority held direction moves the camera each frame.
    fn apply_movement(&mut self, speed: f32) {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let flags = self.flags;

        if flags.forward {
            self.offset.x -= speed * sin_phi;
            self.offset.z += speed * cos_phi;
        } else if flags.backward {
            self.offset.x += speed * sin_phi;
            self.offset.z -= speed * cos_phi;
        } else if flags.right {
            self.offset.x -= speed * cos_phi;
            self.offset.z -= speed * sin_phi;
        } else if flags.left {
            self.offset.x += speed * cos_phi;
            self.offset.z += speed * sin_phi;
        } else if flags.up {
            self.offset.y -= speed;
        } else if flags.down && self.offset.y < self.settings.height_ceiling {
            self.offset.y = (self.offset.y + speed).min(self.settings.height_ceiling);
        }
    }

    fn track(&mut self, target: Vec3) {
        let tracking = &self.tracking_settings;
        match self.mode {
            CameraMode::Default => {}
            CameraMode::FixedDistance => {
                self.theta = 0.0;
                self.phi = 0.0;
                self.offset = -target + tracking.fixed_distance_offset;
            }
            CameraMode::Ground => {
                self.offset = tracking.ground_offset;
                self.theta = tracking.ground_pitch_bias - target.y / tracking.ground_pitch_divisor;
                if target.x > tracking.ground_yaw_threshold {
                    self.phi = tracking.ground_yaw_bias + target.x / tracking.ground_yaw_divisor;
                }
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        make_rotation_x(self.theta) * make_rotation_y(self.phi) * make_translation(self.offset)
    }
}

pub struct Projection {
    aspect: f32,
    fov: f32,
    near: f32,
    far: f32,
}

impl Projection {
    pub fn new(aspect: f32, settings: &ProjectionSettings) -> Self {
        Self {
            aspect,
            fov: settings.fov_degrees,
            near: settings.near,
            far: settings.far,
        }
    }

    /// Zero-area sizes are ignored so the aspect ratio stays finite.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        make_perspective_projection(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}
