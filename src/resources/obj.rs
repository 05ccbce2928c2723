//! Wavefront OBJ loader, with materials from the referenced `.mtl` files.

use std::path::Path;

use crate::{
    data_structures::scene::{Scene, SceneMaterial, SceneMesh, SceneNode},
    resources::{ImportOptions, mesh},
};

pub fn load_scene_obj(path: &Path, options: &ImportOptions) -> anyhow::Result<Scene> {
    let (models, obj_materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: options.triangulate,
            single_index: true,
            ..Default::default()
        },
    )?;

    let materials = match obj_materials {
        Ok(materials) => materials.into_iter().map(load_material).collect(),
        Err(e) => {
            log::warn!("Materials for {} could not be loaded: {}", path.display(), e);
            Vec::new()
        }
    };

    let mut root = SceneNode::new(
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    let mut meshes = Vec::new();
    for model in models {
        let node = SceneNode::new(model.name.as_str()).with_meshes(vec![meshes.len()]);
        meshes.push(load_mesh(model, options));
        root.children.push(node);
    }

    Ok(Scene {
        root,
        meshes,
        materials,
    })
}

fn load_mesh(model: tobj::Model, options: &ImportOptions) -> SceneMesh {
    let m = model.mesh;
    let positions: Vec<[f32; 3]> = m
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let faces = if m.face_arities.is_empty() {
        mesh::triangle_list(&m.indices)
    } else {
        // Only populated when triangulation was not requested
        let mut faces = Vec::new();
        let mut start = 0;
        for &arity in &m.face_arities {
            let end = start + arity as usize;
            match m.indices.get(start..end) {
                Some(&[a, b, c]) => faces.push([a, b, c]),
                _ => log::warn!("Skipping {}-sided face in {}", arity, model.name),
            }
            start = end;
        }
        faces
    };

    let mut normals: Vec<[f32; 3]> = m
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect();
    if normals.len() != positions.len() {
        normals = if options.generate_normals {
            mesh::generate_normals(&positions, &faces)
        } else {
            Vec::new()
        };
    }

    let tex_coords = if m.texcoords.is_empty() {
        None
    } else {
        Some(m.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect())
    };

    SceneMesh {
        name: model.name,
        positions,
        normals,
        tex_coords,
        faces,
        material: m.material_id,
    }
}

fn load_material(m: tobj::Material) -> SceneMaterial {
    // PBR extension keys end up in the unknown parameters
    let factor = |key: &str| {
        m.unknown_param
            .get(key)
            .and_then(|value| value.trim().parse::<f32>().ok())
    };
    let texture = |key: &str| m.unknown_param.get(key).map(|value| value.trim().to_string());

    SceneMaterial {
        base_color: m.diffuse,
        metallic: factor("Pm"),
        roughness: factor("Pr"),
        base_color_texture: m.diffuse_texture.clone(),
        metallic_roughness_texture: None,
        normal_texture: m.normal_texture.clone().or_else(|| texture("norm")),
        ambient_occlusion_texture: texture("map_ao"),
        name: m.name.clone(),
    }
}
