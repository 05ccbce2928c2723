use std::{
    error::Error,
    fmt::{Display, Formatter},
    path::Path,
};

use crate::data_structures::scene::Scene;

/**
 * This module contains all logic for loading scenes from external model files.
 *
 * Every loader hands back the same importer-neutral [`Scene`], already
 * triangulated and, if requested, with generated normals.
 */
pub mod gltf;
pub mod mesh;
pub mod obj;

/// Post-processing the loaders apply before handing out a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    /// Convert strips, fans and polygons into plain triangle lists.
    pub triangulate: bool,
    /// Fill in per-vertex normals for meshes that come without them.
    pub generate_normals: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            triangulate: true,
            generate_normals: true,
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    UnsupportedFormat(String),
    MissingExtension,
    NoScene,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::UnsupportedFormat(ext) => {
                write!(f, "unsupported model format `.{ext}`")
            }
            ImportError::MissingExtension => write!(f, "model file has no extension"),
            ImportError::NoScene => write!(f, "model file contains no scene"),
        }
    }
}

impl Error for ImportError {}

/// File extensions [`import_scene`] knows how to load.
pub fn supported_extensions() -> &'static [&'static str] {
    &["gltf", "glb", "obj"]
}

/// Load the model at `path` into a [`Scene`], choosing the loader by file extension.
pub fn import_scene(path: &Path, options: &ImportOptions) -> anyhow::Result<Scene> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or(ImportError::MissingExtension)?;

    if !supported_extensions().contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext).into());
    }

    log::debug!("Importing {} as .{}", path.display(), ext);
    let scene = match ext.as_str() {
        "obj" => obj::load_scene_obj(path, options)?,
        _ => gltf::load_scene_gltf(path, options)?,
    };
    log::info!(
        "Imported {}: {} meshes, {} materials",
        path.display(),
        scene.meshes.len(),
        scene.materials.len()
    );
    Ok(scene)
}
