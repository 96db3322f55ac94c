#[macro_use]
extern crate glium;
use std::rc::Rc;

use app::{App, AppBehaviour, FrameStats, Window};
use camera::Projection;
use config::Config;
use egui::ViewportId;
use input::{InputEvent, KeyCommand};
use render::Renderer;
use state::{FrameState, SimulationState};
use winit::{
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    keyboard::PhysicalKey,
    window::CursorGrabMode,
};

mod animation;
mod app;
mod assets;
mod button;
mod camera;
mod config;
mod input;
mod math;
mod mesh;
mod render;
mod scene;
mod shader;
mod shapes;
mod state;

struct LanderApp {
    window: Rc<Window>,
    is_cursor_captured: bool,
    is_focused: bool,
    is_minimized: bool,
    cursor_position: (f64, f64),

    state: SimulationState,
    frame_state: FrameState,
    projection: Projection,
    renderer: Renderer,

    egui: egui_glium::EguiGlium,
}

impl AppBehaviour for LanderApp {
    fn process_events(&mut self, event: Event<()>) -> bool {
        match event {
            Event::WindowEvent { event, .. } => {
                let _ = self.egui.on_event(&self.window.winit, &event);
                match event {
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                repeat,
                                ..
                            },
                        ..
                    } => match input::map_key(key, state, repeat) {
                        Some(KeyCommand::Simulation(event)) => {
                            self.state.push_event(event);
                            true
                        }
                        Some(KeyCommand::ReloadShaders) => {
                            self.renderer.reload_shaders(&self.window.display);
                            true
                        }
                        Some(KeyCommand::Quit) => false,
                        None => true,
                    },
                    WindowEvent::Resized(window_size) => {
                        self.is_minimized = window_size.width == 0 || window_size.height == 0;
                        self.projection
                            .resize(window_size.width as f32, window_size.height as f32);
                        true
                    }
                    WindowEvent::Focused(focused) => {
                        self.is_focused = focused;
                        true
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        self.cursor_position = (position.x, position.y);
                        true
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        let (x, y) = self.cursor_position;
                        self.state.push_event(InputEvent::Click { x, y });
                        true
                    }
                    _ => true,
                }
            }
            // Raw motion keeps arriving while the window is in the background.
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } if self.is_focused && !self.is_minimized => {
                self.state.push_event(InputEvent::MouseMotion {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
                true
            }
            _ => true,
        }
    }

    fn update(&mut self, delta_time: std::time::Duration) {
        self.frame_state = self.state.update(delta_time.as_secs_f32());

        if self.state.camera.active != self.is_cursor_captured {
            self.set_cursor_captured(self.state.camera.active);
        }
    }

    fn render(
        &mut self,
        frame: &mut glium::Frame,
        frame_stats: &FrameStats,
    ) -> anyhow::Result<()> {
        self.renderer
            .draw(frame, &self.frame_state, self.projection.matrix())?;

        self.egui.run(&self.window.winit, |ctx| {
            egui::Window::new("Status")
                .anchor(egui::Align2::LEFT_TOP, [5.0, 5.0])
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(format!("{} FPS", frame_stats.fps_counter));
                    ui.label(format!("Frame Time: {:.2?}", frame_stats.frame_time));
                    ui.separator();

                    let camera = &self.state.camera;
                    ui.label(format!("Camera: {}", camera.mode.label()));
                    ui.label(format!(
                        "Active: {}  Tracking: {}",
                        camera.active, camera.tracking
                    ));

                    let animation = &self.state.animation;
                    ui.add(
                        egui::ProgressBar::new(animation.progress())
                            .text(if animation.is_animating { "Flying" } else { "Parked" }),
                    );
                    ui.label(format!("Split screen: {}", self.state.split_screen));
                });
        });

        self.egui.paint(&self.window.display, frame);

        Ok(())
    }
}

impl LanderApp {
    fn new(
        window: Rc<Window>,
        event_loop: &winit::event_loop::EventLoop<()>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let renderer = Renderer::new(&window.display, &config)?;

        let projection = {
            let window_size = window.winit.inner_size();
            Projection::new(
                window_size.width as f32 / window_size.height.max(1) as f32,
                &config.projection,
            )
        };

        let mut state = SimulationState::new(&config);
        let frame_state = state.update(0.0);

        let egui = egui_glium::EguiGlium::new(
            ViewportId::ROOT,
            &window.display,
            &window.winit,
            event_loop,
        );

        Ok(Self {
            window,
            is_cursor_captured: false,
            is_focused: true,
            is_minimized: false,
            cursor_position: (0.0, 0.0),

            state,
            frame_state,
            projection,
            renderer,

            egui,
        })
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let winit = &self.window.winit;
        let grab = if captured {
            winit
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| winit.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            winit.set_cursor_grab(CursorGrabMode::None)
        };

        if let Err(err) = grab {
            log::warn!("Failed to change cursor grab: {err}");
        }

        winit.set_cursor_visible(!captured);
        self.is_cursor_captured = captured;
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::default();
    let app = App::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;

    let lander_app = LanderApp::new(app.window.clone(), &app.event_loop, config)?;
    app.run(lander_app)
}
