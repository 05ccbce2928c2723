#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use bake_model::{BakeConfig, Manifest};
use image::{ImageFormat, RgbImage};

/// A fresh, empty directory under cargo's per-target scratch space.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).expect("failed to clear scratch dir");
    }
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Separate input and output directories inside one scratch dir, and a
/// config writing into the output one.
pub fn workspace(name: &str) -> (PathBuf, BakeConfig) {
    let root = scratch_dir(name);
    let input = root.join("input");
    let output = root.join("output");
    fs::create_dir_all(&input).unwrap();
    fs::create_dir_all(&output).unwrap();
    (input, BakeConfig::default().with_output_root(output))
}

pub const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save_with_format(&path, ImageFormat::Png)
        .expect("failed to write png fixture");
    path
}

pub fn read_manifest(path: &Path) -> Manifest {
    let text = fs::read_to_string(path).expect("manifest missing");
    Manifest::from_json(&text).expect("manifest is not valid")
}

/// Assert a PNG is a 16x16 image filled with exactly `rgb`.
pub fn assert_flat_png(path: &Path, rgb: [u8; 3]) {
    let image = image::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e))
        .to_rgb8();
    assert_eq!(image.dimensions(), (16, 16), "{} has wrong size", path.display());
    for (x, y, pixel) in image.enumerate_pixels() {
        assert_eq!(pixel.0, rgb, "pixel mismatch at ({}, {}) in {}", x, y, path.display());
    }
}

/// Read the floats of vertex `index` of a mesh starting at `vertex_offset`.
pub fn read_vertex(bin: &[u8], vertex_offset: usize, index: usize) -> [f32; 8] {
    let start = vertex_offset + index * 32;
    let mut vertex = [0.0; 8];
    for (i, chunk) in bin[start..start + 32].chunks_exact(4).enumerate() {
        vertex[i] = f32::from_le_bytes(chunk.try_into().unwrap());
    }
    vertex
}

pub fn read_indices(bin: &[u8], index_offset: usize, count: usize) -> Vec<u32> {
    bin[index_offset..index_offset + count * 4]
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Offsets must tile the blob exactly: every mesh starts where the previous ended.
pub fn assert_contiguous(manifest: &Manifest, bin_len: usize) {
    let mut expected = 0;
    for mesh in manifest.meshes() {
        assert_eq!(mesh.vertex_offset().unwrap(), expected);
        expected += mesh.vertex_count().unwrap() * 32;
        assert_eq!(mesh.index_offset().unwrap(), expected);
        expected += mesh.index_count().unwrap() * 4;
    }
    assert_eq!(expected, bin_len);
}
