//! The file mapper: turns a path on disk into a memory-mapped source buffer.
//!
//! Grounded on the distilled source's `input_from_file`/`get_next_char` pair: the
//! scanner never reads the file a byte at a time from disk, it reads out of a
//! buffer that is mapped once up front. Here that buffer is a [`memmap2::Mmap`];
//! the mapped bytes are validated as UTF-8 and registered with a [`SourceManager`]
//! so the rest of the front end only ever deals in `FileID`s and byte offsets.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::types::{FileID, SourceManager};

/// A memory-mapped source file, kept alive only long enough to validate and
/// copy its text into the [`SourceManager`]. Held separately in case a caller
/// wants to avoid the copy for very large inputs.
pub struct MappedFile {
    path: PathBuf,
    mmap: Mmap,
}

impl MappedFile {
    /// Opens and memory-maps `path`.
    ///
    /// ## Errors
    ///
    /// Returns an I/O error if the file cannot be opened or mapped.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        // SAFETY: the mapping is read-only and we do not assume exclusive access to
        // the underlying file; concurrent external modification would only ever
        // produce garbled (but memory-safe) bytes, which UTF-8 validation rejects.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { path, mmap })
    }

    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    #[must_use]
    pub fn bytes(&self) -> &[u8] { &self.mmap }

    /// Validates the mapped bytes as UTF-8 source text.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file is not valid UTF-8.
    pub fn as_str(&self) -> io::Result<&str> {
        std::str::from_utf8(&self.mmap)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Memory-maps `path`, validates it as UTF-8, and registers it with `manager`,
/// returning its assigned [`FileID`].
///
/// ## Errors
///
/// Returns an I/O error if the file cannot be opened, mapped, or is not valid UTF-8.
pub fn input_from_file(path: impl AsRef<Path>, manager: &mut SourceManager) -> io::Result<FileID> {
    let path = path.as_ref();
    let mapped = MappedFile::open(path)?;
    let text = mapped.as_str()?;
    let name = path.to_string_lossy().into_owned();
    Ok(manager.add_file_with_path(name, path.to_path_buf(), text))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn maps_and_registers_a_utf8_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "entity e is\nend;\n").unwrap();

        let mut manager = SourceManager::new();
        let id = input_from_file(tmp.path(), &mut manager).unwrap();

        let file = manager.get_file(id).unwrap();
        assert_eq!(&*file.content, "entity e is\nend;\n");
        assert_eq!(file.line_starts, vec![0, 12]);
    }

    #[test]
    fn rejects_non_utf8_input() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let mapped = MappedFile::open(tmp.path()).unwrap();
        assert!(mapped.as_str().is_err());
    }
}
