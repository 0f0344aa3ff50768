//! Read-only byte buffers backing a whole file.
//!
//! Files on disk are memory-mapped; in-memory content is held in a `Vec<u8>`.
//! Either way the parser only ever sees a `&[u8]` with at least one byte.

use crate::error::{CsvError, Result};
use log::debug;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Immutable, randomly addressable view of a file's bytes.
pub enum ByteBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl ByteBuffer {
    /// Map `path` read-only.
    ///
    /// # Errors
    /// [`CsvError::Io`] if the file cannot be opened, inspected or mapped;
    /// [`CsvError::EmptyInput`] for a zero-length file.
    pub fn map(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| CsvError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();
        if len == 0 {
            return Err(CsvError::EmptyInput);
        }
        // SAFETY: the map is read-only. Truncating the file while it is mapped is
        // outside this crate's contract.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
        debug!("mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(ByteBuffer::Mapped(mmap))
    }

    /// Take ownership of in-memory content.
    ///
    /// # Errors
    /// [`CsvError::EmptyInput`] if `bytes` is empty.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CsvError::EmptyInput);
        }
        Ok(ByteBuffer::Owned(bytes))
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteBuffer::Mapped(m) => m.as_ref(),
            ByteBuffer::Owned(v) => v.as_slice(),
        }
    }

    /// Always at least 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Never true for a constructed buffer; present for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ByteBuffer::Mapped(_) => "Mapped",
            ByteBuffer::Owned(_) => "Owned",
        };
        f.debug_struct("ByteBuffer")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}
