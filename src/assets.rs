//! Loading of meshes and textures from disk.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

use crate::{app::Display, mesh::TexturedMesh};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        source: tobj::LoadError,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to upload texture {path}: {source}")]
    Texture {
        path: PathBuf,
        source: glium::texture::TextureCreationError,
    },
}

const LOAD_OPTIONS: tobj::LoadOptions = tobj::LoadOptions {
    single_index: true,
    triangulate: true,
    ignore_points: true,
    ignore_lines: true,
};

/// Vertex color used when a model has no material.
const DEFAULT_COLOR: Vec3 = Vec3::ONE;

/// Loads a Wavefront OBJ as a flat triangle list.
///
/// Vertex colors come from each model's material ambient term. Missing normals
/// and texture coordinates are filled with zeros.
pub fn load_wavefront_obj(path: &Path) -> Result<TexturedMesh, AssetError> {
    let (models, materials) =
        tobj::load_obj(path, &LOAD_OPTIONS).map_err(|source| AssetError::Mesh {
            path: path.to_path_buf(),
            source,
        })?;

    let materials = materials.unwrap_or_else(|err| {
        log::warn!("Ignoring materials of {}: {err}", path.display());
        Vec::new()
    });

    let mesh = flatten(&models, &materials);
    log::debug!(
        "Loaded {} ({} models, {} vertices)",
        path.display(),
        models.len(),
        mesh.len()
    );

    Ok(mesh)
}

fn flatten(models: &[tobj::Model], materials: &[tobj::Material]) -> TexturedMesh {
    let mut mesh = TexturedMesh::default();

    for model in models {
        let data = &model.mesh;
        let color = data
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|material| material.ambient)
            .map(Vec3::from)
            .unwrap_or(DEFAULT_COLOR);

        for &index in &data.indices {
            let i = index as usize;

            mesh.positions.push(vec3_at(&data.positions, i));
            mesh.colors.push(color);
            mesh.normals.push(vec3_at(&data.normals, i));
            mesh.tex_coords.push(
                data.texcoords
                    .get(2 * i..2 * i + 2)
                    .map(Vec2::from_slice)
                    .unwrap_or(Vec2::ZERO),
            );
        }
    }

    debug_assert!(mesh.is_well_formed());
    mesh
}

fn vec3_at(values: &[f32], i: usize) -> Vec3 {
    values
        .get(3 * i..3 * i + 3)
        .map(Vec3::from_slice)
        .unwrap_or(Vec3::ZERO)
}

fn read_image(path: &Path) -> Result<image::RgbaImage, AssetError> {
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads an image as an sRGB texture, flipped so row 0 is the bottom.
pub fn load_texture_2d(
    display: &Display,
    path: &Path,
) -> Result<glium::texture::SrgbTexture2d, AssetError> {
    let image = read_image(path)?;
    let dimensions = image.dimensions();
    let raw = glium::texture::RawImage2d::from_raw_rgba_reversed(&image.into_raw(), dimensions);

    glium::texture::SrgbTexture2d::new(display, raw).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::BufRead;

    use super::*;

    fn parse_wavefront_obj(reader: &mut impl BufRead) -> Result<TexturedMesh, tobj::LoadError> {
        let (models, _) = tobj::load_obj_buf(reader, &LOAD_OPTIONS, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;

        Ok(flatten(&models, &[]))
    }

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_triangulated() {
        let mesh = parse_wavefront_obj(&mut QUAD.as_bytes()).unwrap();

        assert_eq!(mesh.len(), 6);
        assert!(mesh.is_well_formed());
        assert!(mesh.normals.iter().all(|normal| *normal == Vec3::Z));
        assert!(mesh.colors.iter().all(|color| *color == DEFAULT_COLOR));
        assert!(mesh.tex_coords.contains(&Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn missing_attributes_are_zero_filled() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_wavefront_obj(&mut source.as_bytes()).unwrap();

        assert_eq!(mesh.len(), 3);
        assert_eq!(mesh.positions[1], Vec3::X);
        assert!(mesh.normals.iter().all(|normal| *normal == Vec3::ZERO));
        assert!(mesh.tex_coords.iter().all(|uv| *uv == Vec2::ZERO));
    }

    #[test]
    fn material_ambient_becomes_vertex_color() {
        let models = vec![tobj::Model::new(
            tobj::Mesh {
                positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                indices: vec![0, 1, 2],
                material_id: Some(0),
                ..Default::default()
            },
            "pad".to_string(),
        )];
        let materials = vec![tobj::Material {
            ambient: Some([0.2, 0.4, 0.6]),
            ..Default::default()
        }];

        let mesh = flatten(&models, &materials);
        assert!(mesh
            .colors
            .iter()
            .all(|color| *color == Vec3::new(0.2, 0.4, 0.6)));
    }

    #[test]
    fn missing_files_are_reported() {
        let path = Path::new("assets/missing.obj");
        assert!(matches!(
            load_wavefront_obj(path),
            Err(AssetError::Mesh { .. })
        ));
        assert!(matches!(
            read_image(Path::new("assets/missing.png")),
            Err(AssetError::Image { .. })
        ));
    }
}
