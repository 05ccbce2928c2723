//! Bake configuration.
//!
//! The command line takes no flags, so everything here has a default that
//! reproduces the classic behavior. Library callers and tests set fields
//! directly; the binary only honors [`OUTPUT_ROOT_ENV`].

use std::{env, path::PathBuf};

use anyhow::*;

use crate::{data_structures::texture::DEFAULT_TEXTURE_SIZE, resources::ImportOptions};

/// Environment variable overriding [`BakeConfig::output_root`].
pub const OUTPUT_ROOT_ENV: &str = "BAKE_MODEL_OUTPUT_ROOT";

#[derive(Clone, Debug, PartialEq)]
pub struct BakeConfig {
    /// Directory the `<stem>/` output directory is created in.
    pub output_root: PathBuf,
    /// Edge length in pixels of synthesized flat textures.
    pub texture_size: u32,
    pub import: ImportOptions,
    /// Abort instead of baking an empty model when the input cannot be imported.
    pub fail_on_import_error: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            texture_size: DEFAULT_TEXTURE_SIZE,
            import: ImportOptions::default(),
            fail_on_import_error: false,
        }
    }
}

impl BakeConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(root) = env::var_os(OUTPUT_ROOT_ENV).filter(|root| !root.is_empty()) {
            config.output_root = PathBuf::from(root);
        }
        config
    }

    /// Reject settings no bake can honor.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.texture_size > 0,
            "texture size must be at least 1 pixel, got {}",
            self.texture_size
        );
        Ok(())
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }
}
