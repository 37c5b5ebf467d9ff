//! Student identity persistence: one display name stored locally between runs,
//! under the same `mathTutorName` key a browser build keeps in local storage.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

pub const NAME_KEY: &str = "mathTutorName";

#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("profile IO error: {0}")]
  Io(#[from] io::Error),
  #[error("profile is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

/// Storage for the student's name.
pub trait NameStore {
  fn load(&self) -> Result<Option<String>, ProfileError>;
  fn save(&mut self, name: &str) -> Result<(), ProfileError>;
  fn clear(&mut self) -> Result<(), ProfileError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileFile {
  #[serde(rename = "mathTutorName", default, skip_serializing_if = "Option::is_none")]
  name: Option<String>,
}

/// JSON file holding `{"mathTutorName": "..."}`.
#[derive(Debug, Clone)]
pub struct FileNameStore {
  path: PathBuf,
}

impl FileNameStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl NameStore for FileNameStore {
  #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
  fn load(&self) -> Result<Option<String>, ProfileError> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(s) => s,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    let file: ProfileFile = serde_json::from_str(&raw)?;
    Ok(file.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()))
  }

  fn save(&mut self, name: &str) -> Result<(), ProfileError> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir)?;
    }
    let body = serde_json::to_string_pretty(&ProfileFile { name: Some(name.to_string()) })?;
    fs::write(&self.path, body)?;
    debug!(target: "math_tutor", path = %self.path.display(), "Saved student name");
    Ok(())
  }

  fn clear(&mut self) -> Result<(), ProfileError> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryNameStore {
  pub name: Option<String>,
}

impl NameStore for MemoryNameStore {
  fn load(&self) -> Result<Option<String>, ProfileError> {
    Ok(self.name.clone())
  }

  fn save(&mut self, name: &str) -> Result<(), ProfileError> {
    self.name = Some(name.to_string());
    Ok(())
  }

  fn clear(&mut self) -> Result<(), ProfileError> {
    self.name = None;
    Ok(())
  }
}
