use std::fs;

use bake_model::bake_file;

use crate::common::test_utils::*;

mod common;

const TEXTURED_OBJ: &str = "\
mtllib Model.mtl
usemtl painted
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
";

#[test]
fn should_copy_base_color_texture() {
    let (input_dir, config) = workspace("texture_copy");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nKd 0.5 0.5 0.5\nmap_Kd diffuse.png\n");
    let source = write_png(&input_dir, "diffuse.png", 4, 4, [200, 10, 30]);
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    let report = bake_file(&input, &config).unwrap();

    let output_dir = config.output_root.join("Model");
    let mesh = &report.manifest.meshes()[0];
    assert_eq!(mesh.base_color_texture, "diffuse.png");
    assert_eq!(
        fs::read(output_dir.join("diffuse.png")).unwrap(),
        fs::read(&source).unwrap()
    );
    assert_eq!(report.copied, vec!["diffuse.png".to_string()]);
    // The remaining channels have no textures and get flat fallbacks
    assert_eq!(mesh.normal_texture, "Mesh0Normal.png");
    assert!(!output_dir.join("Mesh0BaseColor.png").exists());
}

#[test]
fn should_use_diffuse_color_when_no_texture() {
    let (input_dir, config) = workspace("texture_diffuse_factor");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nKd 0.5 0.25 0\n");
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    bake_file(&input, &config).unwrap();

    assert_flat_png(
        &config.output_root.join("Model").join("Mesh0BaseColor.png"),
        [127, 63, 0],
    );
}

#[test]
fn should_default_metallic_and_roughness_independently() {
    let (input_dir, config) = workspace("texture_metallic_only");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nPm 0.0\n");
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    bake_file(&input, &config).unwrap();

    assert_flat_png(
        &config.output_root.join("Model").join("Mesh0MetallicRoughness.png"),
        [0, 255, 0],
    );
}

#[test]
fn should_not_recopy_existing_texture() {
    let (input_dir, config) = workspace("texture_idempotent");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nmap_Kd diffuse.png\n");
    let source = write_png(&input_dir, "diffuse.png", 4, 4, [1, 2, 3]);
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);
    let copied = config.output_root.join("Model").join("diffuse.png");

    bake_file(&input, &config).unwrap();
    let first = fs::read(&copied).unwrap();
    assert_eq!(first, fs::read(&source).unwrap());

    // A changed source must not overwrite the texture that is already baked
    write_png(&input_dir, "diffuse.png", 8, 8, [9, 9, 9]);
    let report = bake_file(&input, &config).unwrap();

    assert_eq!(fs::read(&copied).unwrap(), first);
    assert!(report.copied.is_empty());
    assert_eq!(report.reused, vec!["diffuse.png".to_string()]);
}

#[test]
fn should_copy_shared_texture_once() {
    let (input_dir, config) = workspace("texture_shared");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nmap_Kd diffuse.png\n");
    write_png(&input_dir, "diffuse.png", 4, 4, [1, 2, 3]);
    let input = write_file(
        &input_dir,
        "Model.obj",
        "mtllib Model.mtl\n\
         o a\nusemtl painted\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
         o b\nusemtl painted\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
    );

    let report = bake_file(&input, &config).unwrap();

    let meshes = report.manifest.meshes();
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].base_color_texture, "diffuse.png");
    assert_eq!(meshes[1].base_color_texture, "diffuse.png");
    assert_eq!(report.copied, vec!["diffuse.png".to_string()]);
    assert_eq!(report.reused, vec!["diffuse.png".to_string()]);
}

#[test]
fn should_skip_missing_texture() {
    let (input_dir, config) = workspace("texture_missing");
    write_file(&input_dir, "Model.mtl", "newmtl painted\nmap_Kd missing.png\n");
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    let report = bake_file(&input, &config).unwrap();

    assert_eq!(report.manifest.meshes()[0].base_color_texture, "missing.png");
    assert_eq!(report.missing, vec![input_dir.join("missing.png")]);
    assert!(!config.output_root.join("Model").join("missing.png").exists());
}

#[test]
fn should_flatten_texture_subdirectory() {
    let (input_dir, config) = workspace("texture_subdir");
    fs::create_dir_all(input_dir.join("textures")).unwrap();
    write_file(&input_dir, "Model.mtl", "newmtl painted\nmap_Kd textures/wood.png\n");
    write_png(&input_dir.join("textures"), "wood.png", 2, 2, [100, 50, 0]);
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    let report = bake_file(&input, &config).unwrap();

    assert_eq!(report.manifest.meshes()[0].base_color_texture, "wood.png");
    assert!(config.output_root.join("Model").join("wood.png").is_file());
}

#[test]
fn should_read_normal_occlusion_and_roughness_keys() {
    let (input_dir, config) = workspace("texture_pbr_keys");
    write_file(
        &input_dir,
        "Model.mtl",
        "newmtl painted\nPr 0.5\nnorm n.png\nmap_ao a.png\n",
    );
    let normal = write_png(&input_dir, "n.png", 2, 2, [128, 128, 255]);
    let occlusion = write_png(&input_dir, "a.png", 2, 2, [70, 70, 70]);
    let input = write_file(&input_dir, "Model.obj", TEXTURED_OBJ);

    let report = bake_file(&input, &config).unwrap();

    let output_dir = config.output_root.join("Model");
    let mesh = &report.manifest.meshes()[0];
    assert_eq!(mesh.normal_texture, "n.png");
    assert_eq!(mesh.ao_texture, "a.png");
    assert_eq!(fs::read(output_dir.join("n.png")).unwrap(), fs::read(&normal).unwrap());
    assert_eq!(fs::read(output_dir.join("a.png")).unwrap(), fs::read(&occlusion).unwrap());
    assert!(!output_dir.join("Mesh0Normal.png").exists());
    assert!(!output_dir.join("Mesh0AO.png").exists());
    // Metallic keeps its default while roughness comes from `Pr`
    assert_eq!(mesh.metallic_roughness_texture, "Mesh0MetallicRoughness.png");
    assert_flat_png(&output_dir.join("Mesh0MetallicRoughness.png"), [255, 127, 0]);
}
