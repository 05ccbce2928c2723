use std::{env, path::PathBuf};

use bake_model::{BakeConfig, bake_file};

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    // Missing input is not an error, matching older versions of the tool
    let Some(input) = env::args_os().nth(1) else {
        println!("Need file name.");
        return Ok(());
    };

    let config = BakeConfig::from_env();
    let report = bake_file(&PathBuf::from(input), &config)?;
    if !report.missing.is_empty() {
        log::warn!(
            "{} referenced textures were not found next to the model",
            report.missing.len()
        );
    }
    Ok(())
}
