mod compiler;
mod config;
mod driver;
mod error;
mod manifest;

pub use compiler::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use manifest::*;

/// Compiles every shader in `config.source_dir` with `glslangValidator` and
/// rewrites the manifest in `config.output_dir`.
pub fn compile_shaders(config: Config) -> Result<BuildReport, BuildError> {
    let validator = Validator::new(config.compiler.clone());
    Driver::new(config, validator).run()
}
