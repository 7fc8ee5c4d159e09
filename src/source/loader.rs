use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SourceErrorKind, SuffixError};
use crate::types::RuleSet;

use super::format::{self, ListFormat};
use super::online::OnlineLoader;

/// Bundled copy of the Public Suffix List, as JSON
#[cfg(feature = "bundled")]
const BUNDLED_LIST: &str = include_str!("../../data/public_suffix_list.json");

/// Trait for obtaining a rule set
pub trait RuleLoader: Send + Sync {
    /// Load the full rule set
    fn load(&self) -> Result<RuleSet>;
}

/// Loads the list compiled into the crate
#[cfg(feature = "bundled")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

#[cfg(feature = "bundled")]
impl RuleLoader for EmbeddedLoader {
    fn load(&self) -> Result<RuleSet> {
        let rules = format::parse_json(BUNDLED_LIST).map_err(|e| {
            SuffixError::from_kind(
                SourceErrorKind::InvalidData,
                format!("Bundled list is corrupt: {}", e),
            )
        })?;
        tracing::debug!(rules = rules.len(), "loaded bundled public suffix list");
        Ok(rules)
    }
}

/// Loads a rule list from a file, JSON or plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoader {
    path: PathBuf,
    format: Option<ListFormat>,
}

impl FileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
        }
    }

    /// Set explicit format (overrides auto-detection)
    pub fn with_format(mut self, format: ListFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Explicit format, or detected from the extension, or JSON
    fn get_format(&self) -> ListFormat {
        self.format
            .or_else(|| ListFormat::detect(&self.path))
            .unwrap_or(ListFormat::Json)
    }
}

impl RuleLoader for FileLoader {
    fn load(&self) -> Result<RuleSet> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SuffixError::from_kind(
                SourceErrorKind::FileError,
                format!("Failed to read rules file '{}': {}", self.path.display(), e),
            )
        })?;

        let rules = self.get_format().parse(&text).map_err(|e| {
            SuffixError::from_kind(
                SourceErrorKind::InvalidData,
                format!("Failed to parse rules file '{}': {}", self.path.display(), e),
            )
        })?;

        tracing::debug!(
            path = %self.path.display(),
            rules = rules.len(),
            "loaded rules file"
        );
        Ok(rules)
    }
}

/// In-memory loader, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    rules: RuleSet,
}

impl MemoryLoader {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl RuleLoader for MemoryLoader {
    fn load(&self) -> Result<RuleSet> {
        Ok(self.rules.clone())
    }
}

/// Nil loader - always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NilLoader;

impl RuleLoader for NilLoader {
    fn load(&self) -> Result<RuleSet> {
        Err(SuffixError::from_kind(
            SourceErrorKind::NotConfigured,
            "No rule source configured",
        ))
    }
}

/// Where a rule set comes from, resolved once into a plain [`RuleSet`].
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// The list bundled with the crate
    #[cfg(feature = "bundled")]
    Embedded,
    /// A JSON or plain-text file
    File(FileLoader),
    /// Download over HTTP(S)
    Online(OnlineLoader),
    /// Rules already in memory
    Memory(RuleSet),
}

impl RuleSource {
    /// File source with format detected from the extension
    pub fn file(path: impl AsRef<Path>) -> Self {
        RuleSource::File(FileLoader::new(path))
    }

    /// Canonical online list with default timeout
    pub fn online() -> Self {
        RuleSource::Online(OnlineLoader::new())
    }

    /// Blocking load. For [`RuleSource::Online`] prefer
    /// [`RuleSource::load_async`] inside async code.
    pub fn load(&self) -> Result<RuleSet> {
        match self {
            #[cfg(feature = "bundled")]
            RuleSource::Embedded => EmbeddedLoader.load(),
            RuleSource::File(loader) => loader.load(),
            RuleSource::Online(loader) => loader.load(),
            RuleSource::Memory(rules) => Ok(rules.clone()),
        }
    }

    /// Load without blocking the async runtime
    #[cfg(feature = "async")]
    pub async fn load_async(&self) -> Result<RuleSet> {
        match self {
            RuleSource::Online(loader) => loader.fetch_async().await,
            other => {
                let source = other.clone();
                tokio::task::spawn_blocking(move || source.load())
                    .await
                    .map_err(|e| {
                        SuffixError::from_kind(
                            SourceErrorKind::FileError,
                            format!("Load task failed: {}", e),
                        )
                    })?
            }
        }
    }
}

impl RuleLoader for RuleSource {
    fn load(&self) -> Result<RuleSet> {
        RuleSource::load(self)
    }
}

/// Save a rule set as JSON.
///
/// Writes a temporary sibling file first and renames it into place, so a
/// reader never sees a half-written list.
pub fn save_json(rules: &RuleSet, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = format::to_json(rules)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    drop(file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), rules = rules.len(), "saved rules file");
    Ok(())
}
