use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::trace;

use crate::errors::{SearchError, SearchResult};

/// Files at or above this size are memory mapped instead of read into a buffer.
pub(crate) const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Match records store offsets in 32 bits, so the buffer must fit one.
const MAX_DICTIONARY_BYTES: u64 = u32::MAX as u64;

#[derive(Debug)]
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

/// The dictionary contents, immutable for the duration of a run.
///
/// Words are expected one per line in lowercase. The scanner tolerates other
/// content (it skips tokens that are not lowercase words), so a dictionary
/// with stray punctuation or mixed case loads fine and simply yields fewer
/// candidates.
#[derive(Debug)]
pub struct Dictionary {
    backing: Backing,
}

impl Dictionary {
    /// Loads a dictionary file, choosing a read strategy by file size.
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SearchError::dictionary_not_found(path),
            std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
            _ => SearchError::IoError(e),
        })?;

        let size = metadata.len();
        if size > MAX_DICTIONARY_BYTES {
            return Err(SearchError::dictionary_too_large(size, MAX_DICTIONARY_BYTES));
        }

        if size >= MMAP_THRESHOLD {
            trace!("Memory mapping dictionary: {}", path.display());
            let file = File::open(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SearchError::dictionary_not_found(path),
                std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
                _ => SearchError::IoError(e),
            })?;
            let mmap = unsafe { Mmap::map(&file) }.map_err(SearchError::IoError)?;
            Ok(Self {
                backing: Backing::Mapped(mmap),
            })
        } else {
            trace!("Reading dictionary into memory: {}", path.display());
            let bytes = std::fs::read(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SearchError::dictionary_not_found(path),
                std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
                _ => SearchError::IoError(e),
            })?;
            Ok(Self {
                backing: Backing::Owned(bytes),
            })
        }
    }

    /// Wraps an in-memory buffer, for callers that already hold the contents.
    pub fn from_bytes(bytes: Vec<u8>) -> SearchResult<Self> {
        if bytes.len() as u64 > MAX_DICTIONARY_BYTES {
            return Err(SearchError::dictionary_too_large(
                bytes.len() as u64,
                MAX_DICTIONARY_BYTES,
            ));
        }
        Ok(Self {
            backing: Backing::Owned(bytes),
        })
    }

    /// The raw dictionary bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Owned(bytes) => bytes,
            Backing::Mapped(mmap) => mmap,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
