//! glTF 2.0 loader (`.gltf` and `.glb`).

use std::path::Path;

use ::gltf::{buffer::Data, image::Source, mesh::Mode};

use crate::{
    data_structures::scene::{Scene, SceneMaterial, SceneMesh, SceneNode},
    resources::{ImportError, ImportOptions, mesh},
};

pub fn load_scene_gltf(path: &Path, options: &ImportOptions) -> anyhow::Result<Scene> {
    let ::gltf::Gltf { document, blob } = ::gltf::Gltf::open(path)?;
    // Images are only ever referenced by name, so only the buffers get loaded
    let buffers = ::gltf::import_buffers(&document, path.parent(), blob)?;

    let materials = document.materials().map(load_material).collect();

    // Every primitive becomes its own mesh; remember which ones each glTF mesh produced
    let mut meshes = Vec::new();
    let mut mesh_map = Vec::new();
    for gltf_mesh in document.meshes() {
        let name = gltf_mesh.name().unwrap_or("unknown_mesh");
        let mut produced = Vec::new();
        for primitive in gltf_mesh.primitives() {
            if let Some(mesh) = load_primitive(&primitive, &buffers, name, options) {
                produced.push(meshes.len());
                meshes.push(mesh);
            }
        }
        mesh_map.push(produced);
    }

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ImportError::NoScene)?;
    let mut root = SceneNode::new(scene.name().unwrap_or_default());
    for node in scene.nodes() {
        root.children.push(to_scene_node(node, &mesh_map));
    }

    Ok(Scene {
        root,
        meshes,
        materials,
    })
}

fn to_scene_node(node: ::gltf::Node, mesh_map: &[Vec<usize>]) -> SceneNode {
    let mut scene_node = SceneNode::new(node.name().unwrap_or_default());
    scene_node.transform = node.transform().matrix().into();
    if let Some(mesh) = node.mesh() {
        scene_node.meshes = mesh_map.get(mesh.index()).cloned().unwrap_or_default();
    }
    for child in node.children() {
        scene_node.children.push(to_scene_node(child, mesh_map));
    }
    scene_node
}

fn load_primitive(
    primitive: &::gltf::Primitive,
    buffers: &[Data],
    name: &str,
    options: &ImportOptions,
) -> Option<SceneMesh> {
    let reader =
        primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let Some(positions) = reader.read_positions() else {
        log::warn!(
            "Primitive {} of mesh {} has no positions, skipping it",
            primitive.index(),
            name
        );
        return None;
    };
    let positions: Vec<[f32; 3]> = positions.collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let faces = match (primitive.mode(), options.triangulate) {
        (Mode::Triangles, _) => mesh::triangle_list(&indices),
        (Mode::TriangleStrip, true) => mesh::triangulate_strip(&indices),
        (Mode::TriangleFan, true) => mesh::triangulate_fan(&indices),
        (mode, _) => {
            log::warn!(
                "Primitive {} of mesh {} uses {:?} which is not baked, skipping it",
                primitive.index(),
                name,
                mode
            );
            return None;
        }
    };

    let mut normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|normals| normals.collect())
        .unwrap_or_default();
    if normals.is_empty() && options.generate_normals {
        normals = mesh::generate_normals(&positions, &faces);
    }

    let tex_coords = reader
        .read_tex_coords(0)
        .map(|tex_coords| tex_coords.into_f32().collect());

    Some(SceneMesh {
        name: name.to_string(),
        positions,
        normals,
        tex_coords,
        faces,
        material: primitive.material().index(),
    })
}

fn load_material(material: ::gltf::Material) -> SceneMaterial {
    let name = material.name().unwrap_or_default().to_string();
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();

    SceneMaterial {
        base_color: Some([r, g, b]),
        metallic: Some(pbr.metallic_factor()),
        roughness: Some(pbr.roughness_factor()),
        base_color_texture: pbr
            .base_color_texture()
            .and_then(|info| texture_file_name(info.texture(), &name)),
        metallic_roughness_texture: pbr
            .metallic_roughness_texture()
            .and_then(|info| texture_file_name(info.texture(), &name)),
        normal_texture: material
            .normal_texture()
            .and_then(|normal| texture_file_name(normal.texture(), &name)),
        ambient_occlusion_texture: material
            .occlusion_texture()
            .and_then(|occlusion| texture_file_name(occlusion.texture(), &name)),
        name,
    }
}

/// The file name an external texture image is stored under.
///
/// Images embedded in a buffer view or a `data:` URI have no file to copy and
/// are reported as missing.
fn texture_file_name(texture: ::gltf::Texture, material: &str) -> Option<String> {
    match texture.source().source() {
        Source::Uri { uri, .. } if !uri.starts_with("data:") => Some(percent_decode(uri)),
        _ => {
            log::warn!(
                "Material {} embeds the image of texture {}, using constant factors instead",
                material,
                texture.index()
            );
            None
        }
    }
}

/// Undo `%XX` escapes in a relative URI. Escapes that do not decode to
/// UTF-8 leave the URI as written.
fn percent_decode(uri: &str) -> String {
    urlencoding::decode(uri)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| uri.to_string())
}
