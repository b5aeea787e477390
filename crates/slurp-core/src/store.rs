use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::StoreError;
use crate::ir::OperationDescriptor;

/// What happened to a submitted descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No descriptor with this identifier existed.
    Written,
    /// An identical descriptor already exists; nothing was written.
    Identical,
    /// A different descriptor existed and the operator agreed to replace it.
    Replaced { previous_category: String },
    /// A different descriptor exists and the operator kept it.
    Kept { existing_category: String },
    /// The existing file could not be read as a descriptor and was overwritten.
    OverwroteCorrupt,
}

/// What is currently stored under an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored {
    Missing,
    Corrupt,
    Found(OperationDescriptor),
}

/// A directory of descriptors, one `<identifier>.json` file each.
#[derive(Debug, Clone)]
pub struct DescriptorStore {
    dir: PathBuf,
}

impl DescriptorStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{identifier}.json"))
    }

    pub fn load(&self, identifier: &str) -> Result<Stored, StoreError> {
        let path = self.path_for(identifier);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Stored::Missing),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        // Bytes that are not UTF-8 count as corrupt, same as bad JSON.
        Ok(match serde_json::from_slice(&content) {
            Ok(descriptor) => Stored::Found(descriptor),
            Err(_) => Stored::Corrupt,
        })
    }

    pub fn save(&self, descriptor: &OperationDescriptor) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(&descriptor.identifier);
        fs::write(&path, to_pretty_json(descriptor)?).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Store `descriptor`, asking `confirm_replace` before replacing a
    /// different descriptor with the same identifier.
    pub fn submit<F>(
        &self,
        descriptor: &OperationDescriptor,
        confirm_replace: F,
    ) -> Result<SubmitOutcome, StoreError>
    where
        F: FnOnce(&OperationDescriptor) -> bool,
    {
        let outcome = match self.load(&descriptor.identifier)? {
            Stored::Missing => SubmitOutcome::Written,
            Stored::Corrupt => {
                warn!(
                    "\"{}\" already exists but appears to be corrupted, overwriting",
                    descriptor.title
                );
                SubmitOutcome::OverwroteCorrupt
            }
            Stored::Found(existing) if existing == *descriptor => {
                info!(
                    "\"{}\" already exists and is identical, skipping",
                    descriptor.title
                );
                return Ok(SubmitOutcome::Identical);
            }
            Stored::Found(existing) => {
                if !confirm_replace(&existing) {
                    return Ok(SubmitOutcome::Kept {
                        existing_category: existing.category,
                    });
                }
                SubmitOutcome::Replaced {
                    previous_category: existing.category,
                }
            }
        };
        let path = self.save(descriptor)?;
        info!("wrote \"{}\" to {}", descriptor.title, path.display());
        Ok(outcome)
    }

    /// Load every readable descriptor in the directory.
    pub fn load_all(&self) -> Result<Vec<OperationDescriptor>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut descriptors = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            match serde_json::from_slice(&content) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => warn!("skipping corrupted descriptor {}: {e}", path.display()),
            }
        }
        Ok(descriptors)
    }
}

/// Pretty JSON with a four-space indent.
pub fn to_pretty_json(descriptor: &OperationDescriptor) -> Result<String, StoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    descriptor.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
