//! Baked mesh and material definitions.
//!
//! These are the types the extractor produces and the baker consumes. A
//! [`Model`] is built once per run from an imported scene and written out
//! once; nothing here outlives a bake.

use std::mem;

/// A single interleaved vertex as it is laid out in the `.bin` blob.
///
/// Exactly eight `f32`s with no padding: position, normal, texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Size of one packed vertex in bytes.
    pub const SIZE: usize = mem::size_of::<Vertex>();
}

/// Size of one packed index in bytes.
pub const INDEX_SIZE: usize = mem::size_of::<u32>();

/// One resolved material channel: a texture file shipped next to the source
/// model, or a constant factor that the baker turns into a flat texture.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialChannel<F> {
    /// File name as referenced by the source material, relative to the
    /// directory of the input model.
    Texture(String),
    Factor(F),
}

pub type BaseColor = MaterialChannel<[f32; 3]>;
/// Metallic in `[0]`, roughness in `[1]`.
pub type MetallicRoughness = MaterialChannel<[f32; 2]>;
pub type NormalMap = MaterialChannel<[f32; 3]>;
pub type AmbientOcclusion = MaterialChannel<f32>;

pub const DEFAULT_BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const DEFAULT_METALLIC: f32 = 1.0;
pub const DEFAULT_ROUGHNESS: f32 = 1.0;
/// Tangent-space "up", the color of an undisturbed normal map.
pub const DEFAULT_NORMAL: [f32; 3] = [0.5, 0.5, 1.0];
pub const DEFAULT_AMBIENT_OCCLUSION: f32 = 1.0;

/// The four channels every baked mesh carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub base_color: BaseColor,
    pub metallic_roughness: MetallicRoughness,
    pub normal: NormalMap,
    pub ambient_occlusion: AmbientOcclusion,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: MaterialChannel::Factor(DEFAULT_BASE_COLOR),
            metallic_roughness: MaterialChannel::Factor([DEFAULT_METALLIC, DEFAULT_ROUGHNESS]),
            normal: MaterialChannel::Factor(DEFAULT_NORMAL),
            ambient_occlusion: MaterialChannel::Factor(DEFAULT_AMBIENT_OCCLUSION),
        }
    }
}

/// Geometry plus material of one baked mesh.
///
/// Vertex and index data cannot be changed once the mesh is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: Material) -> Self {
        Self {
            vertices,
            indices,
            material,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bytes this mesh occupies in the blob: vertex buffer then index buffer.
    pub fn byte_len(&self) -> usize {
        self.vertices.len() * Vertex::SIZE + self.indices.len() * INDEX_SIZE
    }
}

/// Every mesh found in one imported scene, in traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
