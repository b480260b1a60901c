use std::{
    env::{var, VarError},
    path::PathBuf,
};

use build::{compile_shaders, Config, StatusPolicy, Toolchain};
use env_logger::Env;
use log::warn;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Compiles a directory of GLSL shaders to SPIR-V and writes index.lst")]
struct Opt {
    /// Directory containing the shader sources
    #[structopt(parse(from_os_str))]
    source: PathBuf,
    /// Directory receiving the .spv files and index.lst
    #[structopt(parse(from_os_str))]
    destination: PathBuf,
    /// Path to glslangValidator, instead of looking it up in $VULKAN_SDK
    #[structopt(long, parse(from_os_str))]
    compiler: Option<PathBuf>,
    /// Entries ending with this extension are not compiled
    #[structopt(long, default_value = "py")]
    skip_extension: String,
    /// Fail when the compiler cannot be run or reports an error
    #[structopt(long)]
    strict: bool,
    /// Print cargo:rerun-if-changed lines for use from a build script
    #[structopt(long)]
    cargo_hints: bool,
}

impl Opt {
    fn into_config(self) -> eyre::Result<Config> {
        self.into_config_with(|name| var(name))
    }

    fn into_config_with<F>(self, lookup: F) -> eyre::Result<Config>
    where
        F: FnOnce(&str) -> Result<String, VarError>,
    {
        let compiler = match self.compiler {
            Some(compiler) => compiler,
            None => Toolchain::from_lookup(lookup)?.compiler_path(),
        };
        let status_policy = if self.strict {
            StatusPolicy::Strict
        } else {
            StatusPolicy::Lenient
        };
        Ok(Config::new(self.source, self.destination, compiler)
            .with_skip_extension(self.skip_extension)
            .with_status_policy(status_policy)
            .with_cargo_hints(self.cargo_hints))
    }
}

fn main() -> eyre::Result<()> {
    stable_eyre::install()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = Opt::from_args().into_config()?;
    let report = compile_shaders(config)?;
    if !report.failed.is_empty() {
        warn!(
            "{} of {} shaders failed to compile",
            report.failed.len(),
            report.recorded.len()
        );
    }
    Ok(())
}
