use std::{
    env::{consts::EXE_SUFFIX, VarError},
    path::PathBuf,
};

use crate::error::ConfigError;

pub const TOOLCHAIN_VAR: &str = "VULKAN_SDK";
pub const DEFAULT_SKIP_EXTENSION: &str = "py";

#[cfg(windows)]
const BIN_DIR: &str = "Bin";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

/// How a compiler invocation that fails or exits unsuccessfully is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Warn and still record the shader in the manifest.
    Lenient,
    /// Stop the run with an error.
    Strict,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::Lenient
    }
}

/// Installation root of the Vulkan SDK.
#[derive(Clone, Debug)]
pub struct Toolchain {
    root: PathBuf,
}

impl Toolchain {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the root through `lookup`, usually `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Result<String, VarError>,
    {
        let root = lookup(TOOLCHAIN_VAR).map_err(|source| ConfigError::ToolchainVar {
            name: TOOLCHAIN_VAR,
            source,
        })?;
        Ok(Self::new(root))
    }

    pub fn compiler_path(&self) -> PathBuf {
        self.root
            .join(BIN_DIR)
            .join(format!("glslangValidator{}", EXE_SUFFIX))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub compiler: PathBuf,
    pub skip_extension: String,
    pub status_policy: StatusPolicy,
    pub cargo_hints: bool,
}

impl Config {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        compiler: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            compiler: compiler.into(),
            skip_extension: DEFAULT_SKIP_EXTENSION.to_owned(),
            status_policy: StatusPolicy::default(),
            cargo_hints: false,
        }
    }

    pub fn with_skip_extension(mut self, extension: impl Into<String>) -> Self {
        self.skip_extension = extension.into();
        self
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    pub fn with_cargo_hints(mut self, cargo_hints: bool) -> Self {
        self.cargo_hints = cargo_hints;
        self
    }

    /// Whether a source directory entry is the build script itself.
    pub fn is_skipped(&self, file_name: &str) -> bool {
        let extension = self.skip_extension.trim_start_matches('.');
        !extension.is_empty() && file_name.ends_with(&format!(".{}", extension))
    }
}
