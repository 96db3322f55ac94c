use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::Result;
use glium::{backend::glutin::SimpleWindowBuilder, glutin::surface::WindowSurface};
use simplelog::TermLogger;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
};

pub type Display = glium::Display<WindowSurface>;

pub struct Window {
    pub winit: winit::window::Window,
    pub display: Display,
}

pub trait AppBehaviour {
    /// Returns `false` to stop the application.
    fn process_events(&mut self, event: Event<()>) -> bool;

    fn update(&mut self, delta_time: Duration);

    fn render(&mut self, frame: &mut glium::Frame, frame_stats: &FrameStats) -> Result<()>;
}

pub struct App {
    pub window: Rc<Window>,
    pub event_loop: EventLoop<()>,
}

impl App {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        TermLogger::init(
            if cfg!(debug_assertions) {
                simplelog::LevelFilter::Debug
            } else {
                simplelog::LevelFilter::Info
            },
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )?;

        log::debug!("Creating window and event loop");
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let (winit, display) = SimpleWindowBuilder::new()
            .with_title(title)
            .with_inner_size(width, height)
            .build(&event_loop);

        log::info!("GL renderer: {}", display.get_opengl_renderer_string());
        log::info!("GL vendor: {}", display.get_opengl_vendor_string());
        log::info!("GL version: {}", display.get_opengl_version_string());

        Ok(Self {
            window: Rc::new(Window { winit, display }),
            event_loop,
        })
    }

    pub fn run(self, mut behaviour: impl AppBehaviour + 'static) -> Result<()> {
        let window = self.window;
        let mut frame_stats = FrameStats::default();
        let mut clock = FrameClock::new(Instant::now());

        self.event_loop.run(move |event, elwt| {
            match &event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => {
                        window.display.resize((size.width, size.height));

                        if let Some(control_flow) =
                            clock.on_resize(size.width, size.height, Instant::now())
                        {
                            elwt.set_control_flow(control_flow);
                        }
                    }
                    WindowEvent::RedrawRequested if !clock.is_minimized() => {
                        let delta_time = clock.next_delta(Instant::now());
                        frame_stats.tick(delta_time);

                        behaviour.update(delta_time);

                        let mut frame = window.display.draw();
                        let rendered = behaviour.render(&mut frame, &frame_stats);
                        let finished = frame.finish();

                        if let Err(err) = rendered {
                            log::error!("Failed to render frame: {err:#}");
                            elwt.exit();
                        } else if let Err(err) = finished {
                            log::error!("Failed to present frame: {err}");
                            elwt.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait if !clock.is_minimized() => window.winit.request_redraw(),
                Event::LoopExiting => log::info!("Exiting"),
                _ => {}
            }

            if !behaviour.process_events(event) {
                elwt.exit();
            }
        })?;

        Ok(())
    }
}

/// Measures time between frames and stops while the window has no area.
pub struct FrameClock {
    last_frame: Instant,
    is_minimized: bool,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            is_minimized: false,
        }
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    /// Returns the control flow the event loop should switch to, if it changes.
    pub fn on_resize(&mut self, width: u32, height: u32, now: Instant) -> Option<ControlFlow> {
        let was_minimized = self.is_minimized;
        self.is_minimized = width == 0 || height == 0;

        if self.is_minimized && !was_minimized {
            log::debug!("Window has no area, waiting for a resize");
            Some(ControlFlow::Wait)
        } else if !self.is_minimized && was_minimized {
            // The pause must not show up as one long frame.
            self.last_frame = now;
            Some(ControlFlow::Poll)
        } else {
            None
        }
    }

    pub fn next_delta(&mut self, now: Instant) -> Duration {
        let delta_time = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        delta_time
    }
}

pub struct FrameStats {
    pub frame_time: Duration,
    pub fps_counter: u32,

    frame_count: u32,
    timer: Duration,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_time: Duration::ZERO,
            fps_counter: 0,
            frame_count: 0,
            timer: Duration::ZERO,
        }
    }
}

impl FrameStats {
    const ONE_SEC: Duration = Duration::from_secs(1);

    fn tick(&mut self, frame_time: Duration) {
        self.frame_time = frame_time;
        self.frame_count += 1;
        self.timer += frame_time;

        if self.timer > FrameStats::ONE_SEC {
            self.fps_counter = self.frame_count;
            self.frame_count = 0;
            self.timer -= FrameStats::ONE_SEC;
            log::debug!(
                "{} FPS, frame time {:.2?}",
                self.fps_counter,
                self.frame_time
            );
        }
    }
}
