use std::{env::VarError, io, path::PathBuf};

use thiserror::Error;

use crate::compiler::CompileStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} environment variable")]
    ToolchainVar {
        name: &'static str,
        #[source]
        source: VarError,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("removing stale manifest {} failed", .0.display())]
    RemoveManifest(PathBuf, #[source] io::Error),
    #[error("creating output directory {} failed", .0.display())]
    CreateOutputDir(PathBuf, #[source] io::Error),
    #[error("opening manifest {} failed", .0.display())]
    OpenManifest(PathBuf, #[source] io::Error),
    #[error("writing manifest {} failed", .0.display())]
    WriteManifest(PathBuf, #[source] io::Error),
    #[error("listing shader directory {} failed", .0.display())]
    ReadSourceDir(PathBuf, #[source] io::Error),
    #[error("could not run shader compiler on {}", .0.display())]
    Spawn(PathBuf, #[source] io::Error),
    #[error("compiling {} failed ({})", .0.display(), .1)]
    Compile(PathBuf, CompileStatus),
    #[error("writing cargo hints failed")]
    WriteHints(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading {} failed", .0.display())]
    Read(PathBuf, #[source] io::Error),
    #[error("malformed manifest line {line}: {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("shader {name} listed in the manifest could not be loaded from {}", .path.display())]
    LoadShader {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
