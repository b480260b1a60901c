use std::{
    ffi::OsString,
    fmt::{self, Display},
    io,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use log::{debug, info, warn};

pub const OUTPUT_EXTENSION: &str = "spv";

/// A shader source file and the names derived from it.
///
/// `file_name` is kept as listed by the file system so that the input path
/// stays valid for names that are not UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderEntry {
    pub file_name: OsString,
    pub name: String,
    pub output_file_name: String,
}

impl ShaderEntry {
    /// Only the final extension is stripped, so `basic.vert` becomes `basic`.
    pub fn new(file_name: impl Into<OsString>) -> Self {
        let file_name = file_name.into();
        let name: String = Path::new(&file_name)
            .file_stem()
            .unwrap_or_else(|| file_name.as_os_str())
            .to_string_lossy()
            .into_owned();
        let output_file_name = format!("{}.{}", name, OUTPUT_EXTENSION);
        Self {
            file_name,
            name,
            output_file_name,
        }
    }

    pub fn input_path(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.file_name)
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.output_file_name)
    }

    pub fn manifest_line(&self) -> String {
        format!("{} {}\n", self.name, self.output_file_name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompileStatus {
    Success,
    /// The compiler ran and exited unsuccessfully, with its exit code if it had one.
    Failed(Option<i32>),
}

impl CompileStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl Display for CompileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed(Some(code)) => write!(f, "exit code {}", code),
            Self::Failed(None) => write!(f, "terminated by signal"),
        }
    }
}

pub trait ShaderCompiler {
    fn compile(&mut self, input: &Path, output: &Path) -> io::Result<CompileStatus>;
}

/// Runs `glslangValidator -V <input> -o <output>` as a child process.
#[derive(Clone, Debug)]
pub struct Validator {
    program: PathBuf,
}

impl Validator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-V").arg(input).arg("-o").arg(output);
        command
    }
}

impl ShaderCompiler for Validator {
    fn compile(&mut self, input: &Path, output: &Path) -> io::Result<CompileStatus> {
        let mut command = self.command(input, output);
        info!("Calling command: {:?}", command);
        let Output {
            status,
            stdout,
            stderr,
        } = command.output()?;
        forward_output(&stdout, &stderr);
        Ok(if status.success() {
            CompileStatus::Success
        } else {
            CompileStatus::Failed(status.code())
        })
    }
}

fn forward_output(stdout: &[u8], stderr: &[u8]) {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(|line| debug!("{}", line));
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(|line| warn!("{}", line));
}
