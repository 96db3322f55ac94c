use winit::{event::ElementState, keyboard::KeyCode};

use crate::camera::{MoveDirection, SpeedModifier};

/// Everything the simulation reacts to, queued by the event loop and drained
/// once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Move {
        direction: MoveDirection,
        pressed: bool,
    },
    Speed {
        modifier: SpeedModifier,
        pressed: bool,
    },
    CycleCameraMode,
    ToggleCamera,
    ToggleSplitScreen,
    Launch,
    Reset,
    /// Left button press at the last known cursor position, in window pixels.
    Click {
        x: f64,
        y: f64,
    },
    MouseMotion {
        dx: f32,
        dy: f32,
    },
}

/// What a key press asks of the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Simulation(InputEvent),
    ReloadShaders,
    Quit,
}

fn held(key: KeyCode, pressed: bool) -> Option<InputEvent> {
    let direction = match key {
        KeyCode::KeyW => MoveDirection::Forward,
        KeyCode::KeyS => MoveDirection::Backward,
        KeyCode::KeyD => MoveDirection::Right,
        KeyCode::KeyA => MoveDirection::Left,
        KeyCode::KeyE => MoveDirection::Up,
        KeyCode::KeyQ => MoveDirection::Down,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => {
            return Some(InputEvent::Speed {
                modifier: SpeedModifier::SpeedUp,
                pressed,
            })
        }
        KeyCode::ControlLeft | KeyCode::ControlRight => {
            return Some(InputEvent::Speed {
                modifier: SpeedModifier::SlowDown,
                pressed,
            })
        }
        _ => return None,
    };

    Some(InputEvent::Move { direction, pressed })
}

/// Maps a physical key to its command.
///
/// Movement keys report both press and release. Toggles and triggers fire
/// once per press and ignore key repeat.
pub fn map_key(key: KeyCode, state: ElementState, repeat: bool) -> Option<KeyCommand> {
    let pressed = state == ElementState::Pressed;

    if let Some(event) = held(key, pressed) {
        return Some(KeyCommand::Simulation(event));
    }

    if !pressed || repeat {
        return None;
    }

    let command = match key {
        KeyCode::KeyC => KeyCommand::Simulation(InputEvent::CycleCameraMode),
        KeyCode::Space => KeyCommand::Simulation(InputEvent::ToggleCamera),
        KeyCode::KeyV => KeyCommand::Simulation(InputEvent::ToggleSplitScreen),
        KeyCode::KeyF => KeyCommand::Simulation(InputEvent::Launch),
        KeyCode::KeyR => KeyCommand::Simulation(InputEvent::Reset),
        KeyCode::F5 => KeyCommand::ReloadShaders,
        KeyCode::Escape => KeyCommand::Quit,
        _ => return None,
    };

    Some(command)
}
