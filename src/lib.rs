//! bake-model
//!
//! Converts a 3D model file into a runtime-ready asset: one binary blob of
//! interleaved vertices and indices, a JSON manifest with the per-mesh byte
//! offsets, and four textures per mesh (copied from the model's directory or
//! synthesized as flat-color PNGs).
//!
//! High-level modules
//! - `resources`: loaders turning glTF/OBJ files into an importer-neutral scene
//! - `data_structures`: scene graph, baked mesh/material types, flat textures
//! - `extract`: depth-first flattening of the scene into a [`Model`]
//! - `bake`: writes the blob, textures and manifest
//! - `manifest`: the JSON manifest format
//! - `config`: bake settings
//!

pub mod bake;
pub mod config;
pub mod data_structures;
pub mod extract;
pub mod manifest;
pub mod resources;

use std::path::Path;

pub use bake::{BakeReport, bake};
pub use config::BakeConfig;
pub use data_structures::model::{MaterialChannel, Mesh, Model, Vertex};
pub use extract::extract_model;
pub use manifest::{Manifest, MeshAttributes};
pub use resources::{ImportOptions, import_scene};

/// Import, extract and bake `input` in one go.
///
/// A file that cannot be imported is logged and baked as an empty model,
/// unless [`BakeConfig::fail_on_import_error`] is set.
pub fn bake_file(input: &Path, config: &BakeConfig) -> anyhow::Result<BakeReport> {
    let model = match import_scene(input, &config.import) {
        Ok(scene) => extract_model(&scene),
        Err(e) if config.fail_on_import_error => {
            return Err(e.context(format!("failed to import {}", input.display())));
        }
        Err(e) => {
            log::error!("Failed to import {}: {:#}", input.display(), e);
            Model::default()
        }
    };
    bake(&model, input, config)
}
