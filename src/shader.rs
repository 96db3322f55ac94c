use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::app::Display;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to build shader program from {vertex} and {fragment}: {source}")]
    Program {
        vertex: PathBuf,
        fragment: PathBuf,
        source: glium::ProgramCreationError,
    },
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A GLSL program that remembers where its sources live so it can be rebuilt.
pub struct ShaderProgram<P = glium::Program> {
    vertex_path: PathBuf,
    fragment_path: PathBuf,
    program: P,
}

impl ShaderProgram {
    pub fn from_files(
        display: &Display,
        vertex_path: impl Into<PathBuf>,
        fragment_path: impl Into<PathBuf>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.into();
        let fragment_path = fragment_path.into();
        let program = compile(&vertex_path, &fragment_path, |vertex, fragment| {
            glium::Program::from_source(display, vertex, fragment, None)
        })?;

        Ok(Self {
            vertex_path,
            fragment_path,
            program,
        })
    }

    /// Rebuilds from disk. On failure the previous program stays in use.
    pub fn reload(&mut self, display: &Display) -> Result<(), ShaderError> {
        self.rebuild(|vertex, fragment| {
            glium::Program::from_source(display, vertex, fragment, None)
        })?;
        log::info!(
            "Reloaded shader {} + {}",
            self.vertex_path.display(),
            self.fragment_path.display()
        );
        Ok(())
    }
}

impl<P> ShaderProgram<P> {
    /// Replaces the program only if both sources read and `build` succeeds.
    fn rebuild(
        &mut self,
        build: impl FnOnce(&str, &str) -> Result<P, glium::ProgramCreationError>,
    ) -> Result<(), ShaderError> {
        self.program = compile(&self.vertex_path, &self.fragment_path, build)?;
        Ok(())
    }

    pub fn program(&self) -> &P {
        &self.program
    }
}

fn compile<P>(
    vertex_path: &Path,
    fragment_path: &Path,
    build: impl FnOnce(&str, &str) -> Result<P, glium::ProgramCreationError>,
) -> Result<P, ShaderError> {
    let vertex_source = read_source(vertex_path)?;
    let fragment_source = read_source(fragment_path)?;

    build(&vertex_source, &fragment_source).map_err(|source| ShaderError::Program {
        vertex: vertex_path.to_path_buf(),
        fragment: fragment_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_reports_path() {
        let path = Path::new("assets/shaders/does-not-exist.vert");
        let err = read_source(path).unwrap_err();

        assert!(matches!(&err, ShaderError::Io { path: p, .. } if p == path));
        assert!(err.to_string().contains("does-not-exist.vert"));
    }

    #[test]
    fn reads_bundled_source() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/shaders/vehicle.vert");
        let source = read_source(&path).unwrap();
        assert!(source.starts_with("#version 330"));
    }

    fn bundled(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/shaders").join(name)
    }

    fn program_with(vertex_path: PathBuf) -> ShaderProgram<u32> {
        ShaderProgram {
            vertex_path,
            fragment_path: bundled("vehicle.frag"),
            program: 1,
        }
    }

    #[test]
    fn failed_reload_keeps_previous_program() {
        let mut shader = program_with(bundled("missing.vert"));
        let result = shader.rebuild(|_, _| Ok(2));

        assert!(matches!(result, Err(ShaderError::Io { .. })));
        assert_eq!(*shader.program(), 1);
    }

    #[test]
    fn failed_compile_keeps_previous_program() {
        let mut shader = program_with(bundled("vehicle.vert"));
        let result = shader.rebuild(|_, _| {
            Err(glium::ProgramCreationError::LinkingError(String::from(
                "syntax error",
            )))
        });

        assert!(matches!(result, Err(ShaderError::Program { .. })));
        assert_eq!(*shader.program(), 1);
    }

    #[test]
    fn successful_reload_swaps_program() {
        let mut shader = program_with(bundled("vehicle.vert"));
        shader
            .rebuild(|vertex, fragment| {
                assert!(vertex.contains("gl_Position"));
                assert!(fragment.contains("light_specular"));
                Ok(2)
            })
            .unwrap();

        assert_eq!(*shader.program(), 2);
    }
}
