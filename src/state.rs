use std::collections::VecDeque;

use glam::Mat4;

use crate::{
    animation::Animation,
    button::{ButtonAction, ButtonPanel},
    camera::CameraControl,
    config::Config,
    input::InputEvent,
};

/// What the renderer needs from one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub view: Mat4,
    /// `None` once the vehicle has finished its flight.
    pub vehicle_model: Option<Mat4>,
    pub split_screen: bool,
}

pub struct SimulationState {
    pub camera: CameraControl,
    pub animation: Animation,
    pub split_screen: bool,

    buttons: ButtonPanel,
    pending: VecDeque<InputEvent>,
}

impl SimulationState {
    pub fn new(config: &Config) -> Self {
        Self {
            camera: CameraControl::new(config.camera.clone(), config.tracking.clone()),
            animation: Animation::new(&config.flight),
            split_screen: false,

            buttons: ButtonPanel::new(config.buttons.clone()),
            pending: VecDeque::new(),
        }
    }

    /// Queues `event` for the next update. Back to back mouse motion is merged
    /// into a single delta.
    pub fn push_event(&mut self, event: InputEvent) {
        if let (
            InputEvent::MouseMotion { dx, dy },
            Some(InputEvent::MouseMotion {
                dx: queued_dx,
                dy: queued_dy,
            }),
        ) = (&event, self.pending.back_mut())
        {
            *queued_dx += dx;
            *queued_dy += dy;
            return;
        }

        self.pending.push_back(event);
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move { direction, pressed } => {
                self.camera.process_move(direction, pressed)
            }
            InputEvent::Speed { modifier, pressed } => {
                self.camera.process_speed(modifier, pressed)
            }
            InputEvent::MouseMotion { dx, dy } => self.camera.process_mouse(dx, dy),
            InputEvent::CycleCameraMode => {
                self.camera.cycle_mode();
                log::info!("Camera mode: {}", self.camera.mode.label());
            }
            InputEvent::ToggleCamera => {
                self.camera.toggle_active();
                log::debug!("Camera active: {}", self.camera.active);
            }
            InputEvent::ToggleSplitScreen => {
                self.split_screen = !self.split_screen;
                log::debug!("Split screen: {}", self.split_screen);
            }
            InputEvent::Launch => self.trigger(ButtonAction::Launch),
            InputEvent::Reset => self.trigger(ButtonAction::Reset),
            InputEvent::Click { x, y } => {
                if let Some(action) = self.buttons.hit_test(x, y) {
                    self.trigger(action);
                }
            }
        }
    }

    fn trigger(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Launch => {
                log::info!("Launching vehicle");
                self.animation.launch();
            }
            ButtonAction::Reset => {
                log::info!("Resetting vehicle");
                self.animation.reset();
            }
        }
    }

    /// Drains queued input, then advances the camera and the vehicle by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) -> FrameState {
        while let Some(event) = self.pending.pop_front() {
            self.apply(event);
        }

        // A relaunch after a reset must rewind before the camera reads the position.
        self.animation.apply_pending_reset();
        self.camera.update(delta_time, self.animation.position());
        let pose = self.animation.step(delta_time);

        FrameState {
            view: self.camera.view_matrix(),
            vehicle_model: pose.model_matrix(),
            split_screen: self.split_screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::{CameraMode, MoveDirection};

    fn state() -> SimulationState {
        SimulationState::new(&Config::default())
    }

    #[test]
    fn clicking_launch_starts_the_flight() {
        let mut state = state();
        state.push_event(InputEvent::Click { x: 500.0, y: 650.0 });
        let frame = state.update(1.0);

        assert!(state.animation.is_animating);
        assert!((state.animation.t - 0.05).abs() < 1e-6);
        assert!(frame.vehicle_model.is_some());
    }

    #[test]
    fn clicking_elsewhere_does_nothing() {
        let mut state = state();
        state.push_event(InputEvent::Click { x: 300.0, y: 300.0 });
        state.update(1.0);

        assert!(!state.animation.is_animating);
        assert_eq!(state.animation.t, 0.0);
    }

    #[test]
    fn events_apply_in_order_before_the_update() {
        let mut state = state();
        state.push_event(InputEvent::ToggleCamera);
        state.push_event(InputEvent::CycleCameraMode);
        state.push_event(InputEvent::Move {
            direction: MoveDirection::Forward,
            pressed: true,
        });
        state.update(1.0);

        assert_eq!(state.camera.mode, CameraMode::Default);
        assert!(state.camera.active);
        assert!(state.camera.offset.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-6));
    }

    #[test]
    fn tracking_camera_follows_parked_vehicle() {
        let mut state = state();
        state.push_event(InputEvent::CycleCameraMode);
        let frame = state.update(0.016);

        let expected_offset = Vec3::new(20.0, 0.0, 20.0);
        assert!(state.camera.offset.abs_diff_eq(expected_offset, 1e-5));
        assert!(frame
            .view
            .abs_diff_eq(Mat4::from_translation(expected_offset), 1e-5));
    }

    #[test]
    fn split_screen_toggles() {
        let mut state = state();
        state.push_event(InputEvent::ToggleSplitScreen);
        assert!(state.update(0.0).split_screen);

        state.push_event(InputEvent::ToggleSplitScreen);
        assert!(!state.update(0.0).split_screen);
    }

    #[test]
    fn reset_key_returns_vehicle_to_start() {
        let mut state = state();
        state.push_event(InputEvent::Launch);
        for _ in 0..10 {
            state.update(1.0);
        }
        assert!((state.animation.t - 0.5).abs() < 1e-5);

        state.push_event(InputEvent::Reset);
        state.push_event(InputEvent::Launch);
        state.update(1.0);
        assert!((state.animation.t - 0.05).abs() < 1e-6);
    }

    #[test]
    fn tracking_camera_sees_relaunch_from_the_pad() {
        let mut state = state();
        state.push_event(InputEvent::Launch);
        for _ in 0..10 {
            state.update(1.0);
        }

        state.push_event(InputEvent::CycleCameraMode);
        state.push_event(InputEvent::Reset);
        state.push_event(InputEvent::Launch);
        let frame = state.update(1.0);

        assert!(state
            .camera
            .offset
            .abs_diff_eq(Vec3::new(20.0, 0.0, 20.0), 1e-4));
        let model = frame.vehicle_model.unwrap();
        assert!(model
            .w_axis
            .truncate()
            .abs_diff_eq(Vec3::new(-20.0, -0.9, -30.0), 1e-4));
    }

    #[test]
    fn consecutive_mouse_motion_is_merged() {
        let mut state = state();
        state.push_event(InputEvent::ToggleCamera);
        for dx in [1.0, 2.0, 3.0] {
            state.push_event(InputEvent::MouseMotion { dx, dy: 0.0 });
        }
        assert_eq!(state.pending.len(), 2);
        assert!(matches!(
            state.pending.back(),
            Some(InputEvent::MouseMotion { dx, dy }) if *dx == 6.0 && *dy == 0.0
        ));

        state.update(0.0);
        assert!((state.camera.phi - 0.06).abs() < 1e-6);
    }
}
