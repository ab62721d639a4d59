//! Locating and reading configuration files.

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Application name for configuration file storage paths.
const APPLICATION: &str = "thinksplit";

/// A configuration file, read into memory.
#[derive(Debug)]
pub struct ConfigFile {
    pub path: Utf8PathBuf,
    pub format: Format,
    pub content: String,
}

impl ConfigFile {
    /// Read the file at `path`, picking the format from its extension.
    pub fn read(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = path
            .extension()
            .and_then(Format::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat { path: path.clone() })?;

        let content = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            format,
            content,
        })
    }

    /// Deserialize the file content.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        trace!(path = %self.path, format = self.format.as_str(), "Parsing configuration file.");

        match self.format {
            Format::Toml => toml::from_str(&self.content).map_err(Into::into),
            Format::Json => serde_json::from_str(&self.content).map_err(Into::into),
        }
    }
}

/// A configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Supported formats, in order of preference when both files exist.
    pub const ALL: [Self; 2] = [Self::Toml, Self::Json];

    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == ext)
    }

    /// The file extension of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Read `{stem}.toml` or `{stem}.json` from `dir`, if either exists.
///
/// A missing `dir` holds no files.
pub fn find_in(dir: &Utf8Path, stem: &str) -> Result<Option<ConfigFile>> {
    for format in Format::ALL {
        let path = dir.join(format!("{stem}.{}", format.as_str()));
        if path.is_file() {
            debug!(path = %path, "Found configuration file.");
            return ConfigFile::read(path).map(Some);
        }
    }

    Ok(None)
}

/// Like [`find_in`], but also searches every parent of `dir`, closest first.
pub fn find_upwards(dir: &Utf8Path, stem: &str) -> Result<Option<ConfigFile>> {
    for dir in dir.ancestors() {
        if let Some(file) = find_in(dir, stem)? {
            return Ok(Some(file));
        }
    }

    Ok(None)
}

/// Get the path to the user's config directory, if it can be determined.
#[must_use]
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    ProjectDirs::from("", "", APPLICATION)
        .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok())
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
