//! Flattening an imported [`Scene`] into a bakeable [`Model`].
//!
//! The scene tree is walked depth-first: a node's own meshes come first, in
//! the order the node lists them, then its children in their declared order.
//! Nothing in here fails; data the scene does not provide falls back to the
//! documented defaults.

use crate::data_structures::{
    model::{
        AmbientOcclusion, BaseColor, DEFAULT_AMBIENT_OCCLUSION, DEFAULT_BASE_COLOR,
        DEFAULT_METALLIC, DEFAULT_NORMAL, DEFAULT_ROUGHNESS, Material, MaterialChannel, Mesh,
        MetallicRoughness, Model, NormalMap, Vertex,
    },
    scene::{Scene, SceneMaterial, SceneMesh, SceneNode, TextureSlot},
};

/// Collect every mesh referenced from the scene's root, in traversal order.
pub fn extract_model(scene: &Scene) -> Model {
    let mut model = Model::default();
    let mut stack: Vec<&SceneNode> = vec![&scene.root];
    while let Some(node) = stack.pop() {
        process_node(&mut model, node, scene);
        // Reversed so the first child is popped next
        stack.extend(node.children.iter().rev());
    }
    log::debug!("Extracted {} meshes", model.meshes.len());
    model
}

/// Append the meshes a single node references. Children are not visited.
pub fn process_node(model: &mut Model, node: &SceneNode, scene: &Scene) {
    for &mesh_index in &node.meshes {
        match scene.mesh(mesh_index) {
            Some(mesh) => model.meshes.push(process_mesh(mesh, scene)),
            None => log::warn!(
                "Node {:?} references mesh {} which does not exist",
                node.name,
                mesh_index
            ),
        }
    }
}

pub fn process_mesh(mesh: &SceneMesh, scene: &Scene) -> Mesh {
    let vertices = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex {
            position,
            normal: mesh.normals.get(i).copied().unwrap_or_default(),
            tex_coords: mesh
                .tex_coords
                .as_ref()
                .and_then(|tex_coords| tex_coords.get(i).copied())
                .unwrap_or_default(),
        })
        .collect();

    let indices = mesh.faces.iter().flatten().copied().collect();

    let material = match scene.material_of(mesh) {
        Some(material) => resolve_material(material),
        None => Material::default(),
    };

    Mesh::new(vertices, indices, material)
}

pub fn resolve_material(material: &SceneMaterial) -> Material {
    Material {
        base_color: resolve_base_color(material),
        metallic_roughness: resolve_metallic_roughness(material),
        normal: resolve_normal(material),
        ambient_occlusion: resolve_ambient_occlusion(material),
    }
}

fn texture(material: &SceneMaterial, slot: TextureSlot) -> Option<String> {
    material.texture(slot).map(str::to_string)
}

pub fn resolve_base_color(material: &SceneMaterial) -> BaseColor {
    if let Some(name) = texture(material, TextureSlot::BaseColor) {
        MaterialChannel::Texture(name)
    } else {
        MaterialChannel::Factor(material.base_color().unwrap_or(DEFAULT_BASE_COLOR))
    }
}

/// Metallic and roughness each fall back on their own when missing.
pub fn resolve_metallic_roughness(material: &SceneMaterial) -> MetallicRoughness {
    if let Some(name) = texture(material, TextureSlot::MetallicRoughness) {
        MaterialChannel::Texture(name)
    } else {
        MaterialChannel::Factor([
            material.metallic().unwrap_or(DEFAULT_METALLIC),
            material.roughness().unwrap_or(DEFAULT_ROUGHNESS),
        ])
    }
}

pub fn resolve_normal(material: &SceneMaterial) -> NormalMap {
    match texture(material, TextureSlot::Normal) {
        Some(name) => MaterialChannel::Texture(name),
        None => MaterialChannel::Factor(DEFAULT_NORMAL),
    }
}

pub fn resolve_ambient_occlusion(material: &SceneMaterial) -> AmbientOcclusion {
    match texture(material, TextureSlot::AmbientOcclusion) {
        Some(name) => MaterialChannel::Texture(name),
        None => MaterialChannel::Factor(DEFAULT_AMBIENT_OCCLUSION),
    }
}
