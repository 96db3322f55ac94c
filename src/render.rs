use glam::{Mat3, Mat4};
use glium::{
    index::{NoIndices, PrimitiveType},
    DrawParameters, Surface,
};

use crate::{
    app::Display,
    assets,
    button,
    config::{AssetPaths, Config, LightSettings},
    math::{self, MathError},
    mesh::{TexturedVertex, Vertex},
    scene,
    shader::{ShaderError, ShaderProgram},
    state::FrameState,
};

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.2, 0.2, 0.2, 0.0);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Draw(#[from] glium::DrawError),
    #[error("invalid model transform: {0}")]
    Math(#[from] MathError),
}

/// Camera matrices shared by every viewport of a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameMatrices {
    pub projection: Mat4,
    pub view: Mat4,
}

/// Full window, or left and right halves when split.
pub fn viewports(width: u32, height: u32, split_screen: bool) -> Vec<glium::Rect> {
    if !split_screen {
        return vec![glium::Rect {
            left: 0,
            bottom: 0,
            width,
            height,
        }];
    }

    let half = width / 2;
    vec![
        glium::Rect {
            left: 0,
            bottom: 0,
            width: half,
            height,
        },
        glium::Rect {
            left: half,
            bottom: 0,
            width: width - half,
            height,
        },
    ]
}

struct Terrain {
    vertex_buffer: glium::VertexBuffer<TexturedVertex>,
    texture: glium::texture::SrgbTexture2d,
}

struct Programs {
    terrain: ShaderProgram,
    pad: ShaderProgram,
    vehicle: ShaderProgram,
    button: ShaderProgram,
}

impl Programs {
    fn new(display: &Display, paths: &AssetPaths) -> Result<Self, ShaderError> {
        let load = |name: &str| {
            ShaderProgram::from_files(
                display,
                paths.shader_dir.join(format!("{name}.vert")),
                paths.shader_dir.join(format!("{name}.frag")),
            )
        };

        Ok(Self {
            terrain: load("terrain")?,
            pad: load("pad")?,
            vehicle: load("vehicle")?,
            button: load("button")?,
        })
    }

    fn all_mut(&mut self) -> [&mut ShaderProgram; 4] {
        [
            &mut self.terrain,
            &mut self.pad,
            &mut self.vehicle,
            &mut self.button,
        ]
    }
}

pub struct Renderer {
    programs: Programs,
    light: LightSettings,

    terrain: Option<Terrain>,
    landing_pad: Option<glium::VertexBuffer<TexturedVertex>>,
    vehicle: glium::VertexBuffer<Vertex>,
    buttons: glium::VertexBuffer<button::ButtonVertex>,
}

impl Renderer {
    pub fn new(display: &Display, config: &Config) -> anyhow::Result<Self> {
        let programs = Programs::new(display, &config.assets)?;

        let spaceship = scene::build_spaceship()?;
        log::debug!("Built spaceship with {} vertices", spaceship.len());
        let vehicle = spaceship.vertex_buffer(display)?;
        let buttons = button::button_vertex_buffer(display)?;

        let terrain = Self::load_terrain(display, &config.assets)
            .inspect_err(|err| log::warn!("Skipping terrain: {err}"))
            .ok();
        let landing_pad = Self::load_landing_pad(display, &config.assets)
            .inspect_err(|err| log::warn!("Skipping landing pads: {err}"))
            .ok();

        Ok(Self {
            programs,
            light: config.light.clone(),

            terrain,
            landing_pad,
            vehicle,
            buttons,
        })
    }

    fn load_terrain(display: &Display, paths: &AssetPaths) -> anyhow::Result<Terrain> {
        let mesh = assets::load_wavefront_obj(&paths.terrain_mesh)?;
        let texture = assets::load_texture_2d(display, &paths.terrain_texture)?;

        Ok(Terrain {
            vertex_buffer: mesh.vertex_buffer(display)?,
            texture,
        })
    }

    fn load_landing_pad(
        display: &Display,
        paths: &AssetPaths,
    ) -> anyhow::Result<glium::VertexBuffer<TexturedVertex>> {
        let mesh = assets::load_wavefront_obj(&paths.landing_pad_mesh)?;
        Ok(mesh.vertex_buffer(display)?)
    }

    /// Recompiles every program. Programs that fail keep their previous version.
    pub fn reload_shaders(&mut self, display: &Display) {
        for program in self.programs.all_mut() {
            if let Err(err) = program.reload(display) {
                log::error!("{err}");
            }
        }
    }

    pub fn draw(
        &self,
        frame: &mut glium::Frame,
        state: &FrameState,
        projection: Mat4,
    ) -> Result<(), RenderError> {
        frame.clear_color_srgb_and_depth(CLEAR_COLOR, 1.0);

        let matrices = FrameMatrices {
            projection,
            view: state.view,
        };
        let (width, height) = frame.get_dimensions();

        for viewport in viewports(width, height, state.split_screen) {
            let params = DrawParameters {
                depth: glium::Depth {
                    test: glium::draw_parameters::DepthTest::IfLess,
                    write: true,
                    ..Default::default()
                },
                viewport: Some(viewport),
                ..Default::default()
            };

            self.draw_terrain(frame, &matrices, &params)?;
            self.draw_landing_pads(frame, &matrices, &params)?;
            if let Some(model) = state.vehicle_model {
                self.draw_vehicle(frame, &matrices, model, &params)?;
            }
        }

        if !state.split_screen {
            frame.draw(
                &self.buttons,
                NoIndices(PrimitiveType::TrianglesList),
                self.programs.button.program(),
                &glium::uniforms::EmptyUniforms,
                &Default::default(),
            )?;
        }

        Ok(())
    }

    fn draw_terrain(
        &self,
        frame: &mut glium::Frame,
        matrices: &FrameMatrices,
        params: &DrawParameters,
    ) -> Result<(), RenderError> {
        let Some(terrain) = &self.terrain else {
            return Ok(());
        };

        let model = scene::terrain_model();
        frame.draw(
            &terrain.vertex_buffer,
            NoIndices(PrimitiveType::TrianglesList),
            self.programs.terrain.program(),
            &uniform! {
                model: model.to_cols_array_2d(),
                view: matrices.view.to_cols_array_2d(),
                projection: matrices.projection.to_cols_array_2d(),
                normal_matrix: normal_uniform(model)?,
                light_direction: self.light.direction.to_array(),
                light_diffuse: self.light.diffuse.to_array(),
                light_ambient: self.light.ambient.to_array(),
                tex: &terrain.texture,
            },
            params,
        )?;

        Ok(())
    }

    fn draw_landing_pads(
        &self,
        frame: &mut glium::Frame,
        matrices: &FrameMatrices,
        params: &DrawParameters,
    ) -> Result<(), RenderError> {
        let Some(landing_pad) = &self.landing_pad else {
            return Ok(());
        };

        for model in scene::landing_pad_models() {
            frame.draw(
                landing_pad,
                NoIndices(PrimitiveType::TrianglesList),
                self.programs.pad.program(),
                &uniform! {
                    model: model.to_cols_array_2d(),
                    view: matrices.view.to_cols_array_2d(),
                    projection: matrices.projection.to_cols_array_2d(),
                    normal_matrix: normal_uniform(model)?,
                    light_direction: self.light.direction.to_array(),
                    light_diffuse: self.light.diffuse.to_array(),
                    light_ambient: self.light.ambient.to_array(),
                },
                params,
            )?;
        }

        Ok(())
    }

    fn draw_vehicle(
        &self,
        frame: &mut glium::Frame,
        matrices: &FrameMatrices,
        model: Mat4,
        params: &DrawParameters,
    ) -> Result<(), RenderError> {
        frame.draw(
            &self.vehicle,
            NoIndices(PrimitiveType::TrianglesList),
            self.programs.vehicle.program(),
            &uniform! {
                model: model.to_cols_array_2d(),
                view: matrices.view.to_cols_array_2d(),
                projection: matrices.projection.to_cols_array_2d(),
                normal_matrix: normal_uniform(model)?,
                light_position: self.light.vehicle_light_position.to_array(),
                light_diffuse: self.light.vehicle_diffuse.to_array(),
                light_specular: self.light.vehicle_specular.to_array(),
                light_ambient: self.light.vehicle_ambient.to_array(),
            },
            params,
        )?;

        Ok(())
    }
}

fn normal_uniform(model: Mat4) -> Result<[[f32; 3]; 3], MathError> {
    math::normal_matrix(model).map(|m: Mat3| m.to_cols_array_2d())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_viewport_covers_window() {
        let rects = viewports(1280, 720, false);
        assert_eq!(
            rects,
            vec![glium::Rect {
                left: 0,
                bottom: 0,
                width: 1280,
                height: 720,
            }]
        );
    }

    #[test]
    fn split_viewports_share_the_width() {
        let rects = viewports(1281, 720, true);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].left, 0);
        assert_eq!(rects[1].left, rects[0].width);
        assert_eq!(rects[0].width + rects[1].width, 1281);
        assert!(rects.iter().all(|rect| rect.height == 720));
    }

    #[test]
    fn normal_uniform_of_translation_is_identity() {
        let model = math::make_translation(glam::Vec3::new(10.0, -0.9, 40.0));
        assert_eq!(
            normal_uniform(model).unwrap(),
            Mat3::IDENTITY.to_cols_array_2d()
        );
    }
}
