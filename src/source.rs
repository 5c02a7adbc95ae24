use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::index::{SuffixIndex, BUNDLED_SUFFIX_LIST};
use crate::parser::read_suffix_list;

/// Trait for obtaining suffix list text
pub trait SuffixListSource: Send + Sync {
    /// Return the full suffix list text
    fn load_text(&self) -> Result<String>;

    /// Build an index from this source
    fn load_index(&self) -> Result<SuffixIndex> {
        let text = self.load_text()?;
        Ok(SuffixIndex::from_text(&text))
    }
}

/// The suffix list compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl SuffixListSource for BundledSource {
    fn load_text(&self) -> Result<String> {
        Ok(BUNDLED_SUFFIX_LIST.to_string())
    }

    fn load_index(&self) -> Result<SuffixIndex> {
        Ok(SuffixIndex::bundled())
    }
}

/// Suffix list read from a file on every load
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SuffixListSource for FileSource {
    fn load_text(&self) -> Result<String> {
        read_suffix_list(&self.path)
    }
}

/// In-memory suffix list (for testing or embedding)
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    /// Create a new memory source
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl SuffixListSource for MemorySource {
    fn load_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
