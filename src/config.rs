use std::path::PathBuf;

use glam::Vec3;

use crate::button::PixelRect;

#[bon::builder]
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Base movement speed in units per second.
    pub movement_per_second: f32,
    /// Applied (or divided out) while speed-up (or slow-down) is held.
    pub speed_multiplier: f32,
    /// Radians of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// The accumulated vertical offset never rises above this.
    pub height_ceiling: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::builder()
            .movement_per_second(5.0)
            .speed_multiplier(10.0)
            .mouse_sensitivity(0.01)
            .height_ceiling(0.0)
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct TrackingSettings {
    pub fixed_distance_offset: Vec3,
    pub ground_offset: Vec3,
    pub ground_pitch_bias: f32,
    pub ground_pitch_divisor: f32,
    pub ground_yaw_bias: f32,
    pub ground_yaw_divisor: f32,
    /// The ground camera only turns once the target has passed this x.
    pub ground_yaw_threshold: f32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self::builder()
            .fixed_distance_offset(Vec3::new(0.0, -0.9, -10.0))
            .ground_offset(Vec3::new(20.0, -0.9, 15.0))
            .ground_pitch_bias(-0.1)
            .ground_pitch_divisor(45.0)
            .ground_yaw_bias(0.425)
            .ground_yaw_divisor(35.0)
            .ground_yaw_threshold(-15.0)
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct FlightSettings {
    pub control_points: [Vec3; 3],
    /// Curve parameter advanced per second.
    pub animation_speed: f32,
    pub parked_position: Vec3,
}

impl Default for FlightSettings {
    fn default() -> Self {
        let launch_pad = Vec3::new(-20.0, -0.9, -30.0);

        Self::builder()
            .control_points([
                launch_pad,
                launch_pad + Vec3::new(5.0, 25.0, -20.0),
                launch_pad + Vec3::new(25.0, 20.0, -20.0),
            ])
            .animation_speed(0.05)
            .parked_position(launch_pad)
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct ProjectionSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self::builder().fov_degrees(60.0).near(0.1).far(100.0).build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct ButtonLayout {
    pub launch: PixelRect,
    pub reset: PixelRect,
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self::builder()
            .launch(PixelRect::new(450.0, 580.0, 615.0, 690.0))
            .reset(PixelRect::new(705.0, 835.0, 615.0, 690.0))
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct LightSettings {
    pub direction: Vec3,
    pub diffuse: Vec3,
    pub ambient: Vec3,
    pub vehicle_light_position: Vec3,
    pub vehicle_diffuse: Vec3,
    pub vehicle_specular: Vec3,
    pub vehicle_ambient: Vec3,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self::builder()
            .direction(Vec3::new(0.0, 1.0, -1.0).normalize())
            .diffuse(Vec3::new(0.9, 0.9, 0.6))
            .ambient(Vec3::splat(0.05))
            .vehicle_light_position(Vec3::new(0.2, 1.0, -1.0))
            .vehicle_diffuse(Vec3::new(6.0, 0.9, 0.5))
            .vehicle_specular(Vec3::new(6.0, 0.9, 0.5))
            .vehicle_ambient(Vec3::splat(0.05))
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub terrain_mesh: PathBuf,
    pub terrain_texture: PathBuf,
    pub landing_pad_mesh: PathBuf,
    pub shader_dir: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::builder()
            .terrain_mesh(PathBuf::from("assets/parlahti.obj"))
            .terrain_texture(PathBuf::from("assets/L4343A-4k.jpeg"))
            .landing_pad_mesh(PathBuf::from("assets/landingpad.obj"))
            .shader_dir(PathBuf::from("assets/shaders"))
            .build()
    }
}

#[bon::builder]
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::builder()
            .title(String::from("Launchpad"))
            .width(1280)
            .height(720)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub tracking: TrackingSettings,
    pub flight: FlightSettings,
    pub projection: ProjectionSettings,
    pub buttons: ButtonLayout,
    pub light: LightSettings,
    pub assets: AssetPaths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_starts_on_the_launch_pad() {
        let flight = FlightSettings::default();
        assert_eq!(flight.control_points[0], flight.parked_position);
        assert!((flight.control_points[2] - flight.control_points[0])
            .abs_diff_eq(Vec3::new(25.0, 20.0, -20.0), 1e-5));
    }

    #[test]
    fn light_direction_is_unit_length() {
        let light = LightSettings::default();
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn shaders_live_under_assets() {
        let config = Config::default();
        assert!(config.assets.shader_dir.starts_with("assets"));
        assert_eq!((config.window.width, config.window.height), (1280, 720));
    }
}
