//! Importer-neutral scene graph.
//!
//! Both loaders in [`crate::resources`] produce a [`Scene`]: a tree of nodes
//! that reference meshes by index, plus flat mesh and material tables. The
//! extractor only ever reads this representation, never the file formats.

use cgmath::SquareMatrix;

/// Named texture slots a material can be asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    BaseColor,
    /// Combined metallic (blue) and roughness (green) texture.
    MetallicRoughness,
    Normal,
    AmbientOcclusion,
}

/// A node of the scene tree.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    /// Local transform. Recorded for completeness, the bake keeps vertices in mesh space.
    pub transform: cgmath::Matrix4<f32>,
    /// Indices into [`Scene::meshes`], in declared order.
    pub meshes: Vec<usize>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: cgmath::Matrix4::identity(),
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_meshes(mut self, meshes: Vec<usize>) -> Self {
        self.meshes = meshes;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Triangulated geometry of one imported mesh.
#[derive(Clone, Debug, Default)]
pub struct SceneMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// One entry per position once normals are generated; may be empty otherwise.
    pub normals: Vec<[f32; 3]>,
    /// First UV channel, `None` when the source has none.
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub faces: Vec<[u32; 3]>,
    /// Index into [`Scene::materials`].
    pub material: Option<usize>,
}

/// Material properties as declared by the source file.
///
/// Every field is optional: a lookup that finds nothing returns `None` and the
/// extractor decides the fallback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneMaterial {
    pub name: String,
    pub base_color: Option<[f32; 3]>,
    pub metallic: Option<f32>,
    pub roughness: Option<f32>,
    pub base_color_texture: Option<String>,
    pub metallic_roughness_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub ambient_occlusion_texture: Option<String>,
}

impl SceneMaterial {
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        match slot {
            TextureSlot::BaseColor => self.base_color_texture.as_deref(),
            TextureSlot::MetallicRoughness => self.metallic_roughness_texture.as_deref(),
            TextureSlot::Normal => self.normal_texture.as_deref(),
            TextureSlot::AmbientOcclusion => self.ambient_occlusion_texture.as_deref(),
        }
    }

    pub fn base_color(&self) -> Option<[f32; 3]> {
        self.base_color
    }

    pub fn metallic(&self) -> Option<f32> {
        self.metallic
    }

    pub fn roughness(&self) -> Option<f32> {
        self.roughness
    }
}

/// An imported scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub root: SceneNode,
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
}

impl Scene {
    /// A scene with a bare root node. Baking it produces zero meshes.
    pub fn empty() -> Self {
        Self {
            root: SceneNode::new(""),
            meshes: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn mesh(&self, index: usize) -> Option<&SceneMesh> {
        self.meshes.get(index)
    }

    pub fn material(&self, index: usize) -> Option<&SceneMaterial> {
        self.materials.get(index)
    }

    /// The material a mesh references, if it references one that exists.
    pub fn material_of(&self, mesh: &SceneMesh) -> Option<&SceneMaterial> {
        mesh.material.and_then(|index| self.material(index))
    }
}
