//! Writing a [`Model`] to disk.
//!
//! Given `path/to/Model.ext`, [`bake`] produces:
//!
//! ```text
//! <output_root>/Model/
//!   Model.bin             vertex and index buffers of every mesh, back to back
//!   Model.json            the manifest, see [`crate::manifest`]
//!   Mesh<i><Channel>.png  flat textures for channels without a texture file
//!   <texture file>        textures copied from the model's directory
//! ```

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::*;
use fs_extra::file::CopyOptions;

use crate::{
    config::BakeConfig,
    data_structures::{
        model::{MaterialChannel, Mesh, Model, Vertex},
        texture::FlatTexture,
    },
    manifest::{Manifest, MeshAttributes},
};

/// What a bake wrote.
#[derive(Clone, Debug, Default)]
pub struct BakeReport {
    pub output_dir: PathBuf,
    pub bin_path: PathBuf,
    pub manifest_path: PathBuf,
    pub bin_size: u64,
    pub manifest: Manifest,
    /// File names of synthesized flat textures.
    pub synthesized: Vec<String>,
    /// File names of textures copied by this bake.
    pub copied: Vec<String>,
    /// File names that were already present in the output directory.
    pub reused: Vec<String>,
    /// Texture files the model references but that do not exist next to it.
    pub missing: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    BaseColor,
    MetallicRoughness,
    Normal,
    AmbientOcclusion,
}

impl Channel {
    fn suffix(self) -> &'static str {
        match self {
            Channel::BaseColor => "BaseColor",
            Channel::MetallicRoughness => "MetallicRoughness",
            Channel::Normal => "Normal",
            Channel::AmbientOcclusion => "AO",
        }
    }
}

/// Name of the flat texture synthesized for `channel` of mesh `mesh_index`.
fn flat_texture_name(mesh_index: usize, channel: Channel) -> String {
    format!("Mesh{}{}.png", mesh_index, channel.suffix())
}

/// The stem of the input file names the output directory and its two files.
pub fn output_stem(input: &Path) -> Result<String> {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| anyhow!("cannot derive an output name from {}", input.display()))
}

/// Bake `model`, imported from `input`, into `<output_root>/<stem>/`.
pub fn bake(model: &Model, input: &Path, config: &BakeConfig) -> Result<BakeReport> {
    config.validate()?;
    let stem = output_stem(input)?;
    let output_dir = config.output_root.join(&stem);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let mut baker = Baker {
        source_dir: input.parent().unwrap_or(Path::new("")).to_path_buf(),
        texture_size: config.texture_size,
        report: BakeReport {
            bin_path: output_dir.join(format!("{stem}.bin")),
            manifest_path: output_dir.join(format!("{stem}.json")),
            output_dir,
            ..Default::default()
        },
    };

    let bin_path = baker.report.bin_path.clone();
    let bin_file = File::create(&bin_path)
        .with_context(|| format!("failed to create {}", bin_path.display()))?;
    let mut bin = BufWriter::new(bin_file);

    if model.is_empty() {
        log::warn!("{} has no meshes, baking an empty manifest", input.display());
    }

    let mut offset = 0usize;
    let mut attributes = Vec::with_capacity(model.meshes.len());
    for (i, mesh) in model.meshes.iter().enumerate() {
        attributes.push(baker.bake_mesh(i, mesh, &mut offset, &mut bin)?);
    }
    bin.flush()
        .with_context(|| format!("failed to write {}", bin_path.display()))?;
    baker.report.bin_size = offset as u64;

    let manifest = Manifest::new(attributes);
    let manifest_path = &baker.report.manifest_path;
    fs::write(manifest_path, manifest.to_json()?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    baker.report.manifest = manifest;

    log::info!(
        "Baked {} meshes into {} ({} bytes, {} textures synthesized, {} copied)",
        model.meshes.len(),
        baker.report.output_dir.display(),
        baker.report.bin_size,
        baker.report.synthesized.len(),
        baker.report.copied.len()
    );
    Ok(baker.report)
}

struct Baker {
    source_dir: PathBuf,
    texture_size: u32,
    report: BakeReport,
}

impl Baker {
    fn bake_mesh(
        &mut self,
        index: usize,
        mesh: &Mesh,
        offset: &mut usize,
        bin: &mut impl Write,
    ) -> Result<MeshAttributes> {
        let vertex_offset = *offset;
        let index_offset = vertex_offset + mesh.vertices().len() * Vertex::SIZE;
        let bin_path = &self.report.bin_path;
        bin.write_all(mesh.vertex_bytes())
            .and_then(|_| bin.write_all(mesh.index_bytes()))
            .with_context(|| format!("failed to write {}", bin_path.display()))?;
        *offset += mesh.byte_len();

        let material = &mesh.material;
        let base_color_texture = self.texture(
            index,
            Channel::BaseColor,
            &material.base_color,
            |size, f| FlatTexture::base_color(size, *f),
        )?;
        let metallic_roughness_texture = self.texture(
            index,
            Channel::MetallicRoughness,
            &material.metallic_roughness,
            |size, f| FlatTexture::metallic_roughness(size, *f),
        )?;
        let normal_texture = self.texture(
            index,
            Channel::Normal,
            &material.normal,
            |size, f| FlatTexture::normal(size, *f),
        )?;
        let ao_texture = self.texture(
            index,
            Channel::AmbientOcclusion,
            &material.ambient_occlusion,
            |size, f| FlatTexture::ambient_occlusion(size, *f),
        )?;

        Ok(MeshAttributes {
            ao_texture,
            base_color_texture,
            index_count: mesh.indices().len().to_string(),
            index_offset: index_offset.to_string(),
            metallic_roughness_texture,
            normal_texture,
            vertex_count: mesh.vertices().len().to_string(),
            vertex_offset: vertex_offset.to_string(),
        })
    }

    /// Produce the texture file for one channel and return its file name.
    fn texture<F>(
        &mut self,
        mesh_index: usize,
        channel: Channel,
        value: &MaterialChannel<F>,
        flat: impl FnOnce(u32, &F) -> FlatTexture,
    ) -> Result<String> {
        match value {
            MaterialChannel::Texture(name) => Ok(self.copy_texture(name)),
            MaterialChannel::Factor(factor) => {
                let name = flat_texture_name(mesh_index, channel);
                flat(self.texture_size, factor).write_png(&self.report.output_dir.join(&name))?;
                self.report.synthesized.push(name.clone());
                Ok(name)
            }
        }
    }

    /// Copy a referenced texture into the output directory under its bare
    /// file name. An existing file of that name is left alone and a missing
    /// source is skipped with a warning.
    fn copy_texture(&mut self, name: &str) -> String {
        let source = self.source_dir.join(name);
        let file_name = source
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        let destination = self.report.output_dir.join(&file_name);

        if destination.exists() {
            log::debug!("{} already present, not copying", destination.display());
            self.report.reused.push(file_name.clone());
            return file_name;
        }
        if !source.is_file() {
            log::warn!(
                "Texture {} does not exist, {} will be missing from the output",
                source.display(),
                file_name
            );
            self.report.missing.push(source);
            return file_name;
        }

        let options = CopyOptions {
            skip_exist: true,
            ..CopyOptions::new()
        };
        match fs_extra::file::copy(&source, &destination, &options) {
            std::result::Result::Ok(_) => {
                log::debug!("Copied {} to {}", source.display(), destination.display());
                self.report.copied.push(file_name.clone());
            }
            Err(e) => {
                log::warn!("Could not copy texture {}: {}", source.display(), e);
                self.report.missing.push(source);
            }
        }
        file_name
    }
}
