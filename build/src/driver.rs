use std::{
    ffi::OsString,
    fs::create_dir_all,
    io::{self, Write},
    path::Path,
};

use log::{debug, info, warn};

use crate::{
    compiler::{CompileStatus, ShaderCompiler, ShaderEntry},
    config::{Config, StatusPolicy},
    error::BuildError,
    manifest::{manifest_path, ManifestWriter},
};

#[derive(Debug, Default)]
pub struct BuildReport {
    /// Shaders written to the manifest, in directory listing order.
    pub recorded: Vec<ShaderEntry>,
    /// Recorded shaders whose compiler invocation did not succeed.
    pub failed: Vec<ShaderEntry>,
}

pub struct Driver<C> {
    config: Config,
    compiler: C,
    hints: Box<dyn Write>,
}

impl<C: ShaderCompiler> Driver<C> {
    pub fn new(config: Config, compiler: C) -> Self {
        Self {
            config,
            compiler,
            hints: Box::new(io::stdout()),
        }
    }

    /// Sends `cargo:rerun-if-changed` lines to `hints` instead of stdout.
    pub fn with_hint_output(mut self, hints: impl Write + 'static) -> Self {
        self.hints = Box::new(hints);
        self
    }

    pub fn run(&mut self) -> Result<BuildReport, BuildError> {
        info!("glslangValidator path: {}", self.config.compiler.display());
        let source_dir = self.config.source_dir.clone();
        // Listed up front so the manifest and outputs never show up as sources.
        let file_names = list_dir(&source_dir)?;
        if self.config.cargo_hints {
            self.rerun_if_changed(&source_dir)?;
        }
        let output_dir = self.config.output_dir.clone();
        let manifest = manifest_path(&output_dir);
        ManifestWriter::remove_stale(&manifest)
            .map_err(|error| BuildError::RemoveManifest(manifest.clone(), error))?;
        if !output_dir.exists() {
            create_dir_all(&output_dir)
                .map_err(|error| BuildError::CreateOutputDir(output_dir.clone(), error))?;
        }
        let mut writer = ManifestWriter::open(&manifest)
            .map_err(|error| BuildError::OpenManifest(manifest.clone(), error))?;
        let mut report = BuildReport::default();
        for file_name in file_names {
            if self.config.is_skipped(&file_name.to_string_lossy()) {
                debug!("Skipping {}", file_name.to_string_lossy());
                continue;
            }
            let shader = ShaderEntry::new(file_name);
            let succeeded = self.compile(&shader)?;
            writer
                .append(&shader)
                .map_err(|error| BuildError::WriteManifest(writer.path().to_owned(), error))?;
            if !succeeded {
                report.failed.push(shader.clone());
            }
            report.recorded.push(shader);
        }
        info!(
            "Wrote {} shaders to {}",
            report.recorded.len(),
            writer.path().display()
        );
        Ok(report)
    }

    fn compile(&mut self, shader: &ShaderEntry) -> Result<bool, BuildError> {
        let input = shader.input_path(&self.config.source_dir);
        let output = shader.output_path(&self.config.output_dir);
        if self.config.cargo_hints {
            self.rerun_if_changed(&input)?;
        }
        let status = match self.compiler.compile(&input, &output) {
            Ok(status) => status,
            Err(error) => match self.config.status_policy {
                StatusPolicy::Strict => return Err(BuildError::Spawn(input, error)),
                StatusPolicy::Lenient => {
                    warn!(
                        "Could not run shader compiler on {}: {}",
                        input.display(),
                        error
                    );
                    return Ok(false);
                }
            },
        };
        match (status, self.config.status_policy) {
            (CompileStatus::Success, _) => Ok(true),
            (status, StatusPolicy::Strict) => Err(BuildError::Compile(input, status)),
            (status, StatusPolicy::Lenient) => {
                warn!("Compiling {} failed ({})", input.display(), status);
                Ok(false)
            }
        }
    }

    fn rerun_if_changed(&mut self, path: &Path) -> Result<(), BuildError> {
        writeln!(self.hints, "cargo:rerun-if-changed={}", path.display())
            .map_err(BuildError::WriteHints)
    }
}

fn list_dir(dir: &Path) -> Result<Vec<OsString>, BuildError> {
    dir.read_dir()
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|entry| entry.file_name()))
                .collect()
        })
        .map_err(|error| BuildError::ReadSourceDir(dir.to_owned(), error))
}
