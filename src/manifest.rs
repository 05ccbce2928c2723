//! The JSON side file describing the `.bin` blob.
//!
//! Numbers are written as base-10 strings and keys are declared in
//! lexicographic order, so the serialized text matches manifests produced by
//! earlier bakers byte for byte. An empty model has `"MeshAttributes": null`.

use std::{fmt::Display, str::FromStr};

use anyhow::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "MeshAttributes")]
    pub mesh_attributes: Option<Vec<MeshAttributes>>,
    #[serde(rename = "MeshCount")]
    pub mesh_count: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MeshAttributes {
    #[serde(rename = "AOTexture")]
    pub ao_texture: String,
    pub base_color_texture: String,
    pub index_count: String,
    pub index_offset: String,
    pub metallic_roughness_texture: String,
    pub normal_texture: String,
    pub vertex_count: String,
    pub vertex_offset: String,
}

impl MeshAttributes {
    pub fn vertex_count(&self) -> Result<usize> {
        parse_field("VertexCount", &self.vertex_count)
    }

    pub fn vertex_offset(&self) -> Result<usize> {
        parse_field("VertexOffset", &self.vertex_offset)
    }

    pub fn index_count(&self) -> Result<usize> {
        parse_field("IndexCount", &self.index_count)
    }

    pub fn index_offset(&self) -> Result<usize> {
        parse_field("IndexOffset", &self.index_offset)
    }
}

fn parse_field<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| anyhow!("manifest field {field} is not a number ({value:?}): {e}"))
}

impl Manifest {
    pub fn new(meshes: Vec<MeshAttributes>) -> Self {
        Self {
            mesh_count: meshes.len().to_string(),
            mesh_attributes: if meshes.is_empty() { None } else { Some(meshes) },
        }
    }

    pub fn meshes(&self) -> &[MeshAttributes] {
        self.mesh_attributes.as_deref().unwrap_or_default()
    }

    pub fn mesh_count(&self) -> Result<usize> {
        parse_field("MeshCount", &self.mesh_count)
    }

    /// Compact JSON, the on-disk form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
