//! Geometry post-processing shared by the loaders.
//!
//! Not every file comes with normals or with plain triangle lists, so these
//! helpers fill in what the baked vertex layout needs.

use cgmath::{InnerSpace, Vector3, Zero};

/// Generate smooth per-vertex normals from triangle faces.
///
/// Each face contributes its area-weighted normal to its three corners; the
/// sums are normalized afterwards. Vertices that no face touches, or whose
/// contributions cancel out, end up as `[0, 0, 0]`.
pub fn generate_normals(positions: &[[f32; 3]], faces: &[[u32; 3]]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vector3::<f32>::zero(); positions.len()];

    for face in faces {
        let [a, b, c] = face.map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            log::warn!("Skipping face {:?} with out of range index", face);
            continue;
        }
        let pos0: Vector3<f32> = positions[a].into();
        let pos1: Vector3<f32> = positions[b].into();
        let pos2: Vector3<f32> = positions[c].into();

        // Cross product length is twice the triangle area, which is the weight we want
        let face_normal = (pos1 - pos0).cross(pos2 - pos0);
        sums[a] += face_normal;
        sums[b] += face_normal;
        sums[c] += face_normal;
    }

    sums.into_iter()
        .map(|sum| {
            let length = sum.magnitude();
            if length > f32::EPSILON {
                (sum / length).into()
            } else {
                [0.0; 3]
            }
        })
        .collect()
}

/// Turn a triangle strip into a triangle list, keeping the winding consistent.
pub fn triangulate_strip(indices: &[u32]) -> Vec<[u32; 3]> {
    indices
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        })
        .collect()
}

/// Turn a triangle fan into a triangle list.
pub fn triangulate_fan(indices: &[u32]) -> Vec<[u32; 3]> {
    match indices.split_first() {
        Some((&center, rest)) => rest.windows(2).map(|w| [center, w[0], w[1]]).collect(),
        None => Vec::new(),
    }
}

/// Group a flat triangle list into faces. A trailing partial triangle is dropped.
pub fn triangle_list(indices: &[u32]) -> Vec<[u32; 3]> {
    indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}
