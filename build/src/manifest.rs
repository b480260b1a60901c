use std::{
    fs::{read, read_to_string, remove_file, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{compiler::ShaderEntry, error::ManifestError};

pub const MANIFEST_FILE_NAME: &str = "index.lst";

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Appends one line per shader to a freshly created `index.lst`.
pub struct ManifestWriter {
    path: PathBuf,
    file: File,
}

impl ManifestWriter {
    /// Removes a stale manifest if there is one.
    pub fn remove_stale(path: &Path) -> io::Result<()> {
        if path.is_file() {
            remove_file(path)?;
        }
        Ok(())
    }

    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, entry: &ShaderEntry) -> io::Result<()> {
        self.file.write_all(entry.manifest_line().as_bytes())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub file_name: String,
}

/// A compiled shader loaded through the manifest.
#[derive(Clone, Debug)]
pub struct ShaderBinary {
    pub name: String,
    pub code: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let name = match fields.next() {
                Some(name) => name,
                None => continue,
            };
            let file_name = fields.next().ok_or_else(|| ManifestError::MalformedLine {
                line: index + 1,
                text: line.to_owned(),
            })?;
            entries.push(ManifestEntry {
                name: name.to_owned(),
                file_name: file_name.to_owned(),
            });
        }
        Ok(Self { entries })
    }

    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = manifest_path(dir);
        let text = read_to_string(&path).map_err(|error| ManifestError::Read(path, error))?;
        Self::parse(&text)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.file_name.as_str())
    }

    /// Reads every listed binary relative to `dir`.
    pub fn load_shaders(&self, dir: &Path) -> Result<Vec<ShaderBinary>, ManifestError> {
        self.entries
            .iter()
            .map(|entry| {
                let path = dir.join(&entry.file_name);
                match read(&path) {
                    Ok(code) => Ok(ShaderBinary {
                        name: entry.name.clone(),
                        code,
                    }),
                    Err(source) => Err(ManifestError::LoadShader {
                        name: entry.name.clone(),
                        path,
                        source,
                    }),
                }
            })
            .collect()
    }
}
