//! Data structures shared by the importer, extractor and baker.
//!
//! - `scene` is the importer-neutral scene graph (nodes, meshes, materials)
//! - `model` contains the baked mesh, vertex and material channel types
//! - `texture` synthesizes the flat fallback textures

pub mod model;
pub mod scene;
pub mod texture;
