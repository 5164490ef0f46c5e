//! File handles the extractor reads from

use async_trait::async_trait;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Whole-file contents, shared by reference count
///
/// Cloning hands out the same buffer, so the chunk decoder and the duration
/// probe read one copy of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBytes(Arc<Vec<u8>>);

impl From<Vec<u8>> for FileBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Source of one file's name, size and bytes
#[async_trait]
pub trait FileHandle: Send + Sync {
    /// File name without directory
    fn name(&self) -> &str;

    /// Size as reported by the source, in bytes
    fn size_bytes(&self) -> u64;

    /// Read the whole file
    async fn read_bytes(&self) -> io::Result<FileBytes>;
}

/// File on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size_bytes: u64,
}

impl LocalFile {
    /// Stat `path` and capture its name and size
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(path = %path.display(), size = metadata.len(), "Opened file");

        Ok(Self {
            path,
            name,
            size_bytes: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileHandle for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    async fn read_bytes(&self) -> io::Result<FileBytes> {
        tokio::fs::read(&self.path).await.map(FileBytes::from)
    }
}

/// File held in memory, e.g. an upload
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    name: String,
    bytes: FileBytes,
    size_bytes: u64,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            name: name.into(),
            bytes: bytes.into(),
            size_bytes,
        }
    }

    /// Override the reported size (browsers and uploads report their own)
    pub fn with_reported_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

#[async_trait]
impl FileHandle for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    async fn read_bytes(&self) -> io::Result<FileBytes> {
        Ok(self.bytes.clone())
    }
}

/// Whether a file name has a `.wav` extension (any case)
pub fn is_wav_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}
