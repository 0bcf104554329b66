//! Byte source abstraction over seekable, readable files.
//!
//! The tail readers and the follow tracker only talk to files through
//! [`ByteSource`] and [`SourceOpener`], so the filesystem can be swapped for
//! an in-memory implementation in tests.

mod fs;
mod memory;

use std::io;
use std::path::{Path, PathBuf};

pub use fs::{FileSource, FsOpener};
pub use memory::{MemoryOpener, MemorySource};

/// Line iterator returned by [`ByteSource::head_lines`].
///
/// Each item is the raw bytes of one line without its `\n` terminator.
pub type LineStream<'a> = Box<dyn Iterator<Item = io::Result<Vec<u8>>> + 'a>;

/// A seekable, readable file.
pub trait ByteSource {
    /// Current size of the underlying file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&mut self) -> io::Result<u64>;

    /// Seek to `offset` and read up to `len` bytes from there.
    ///
    /// Returns fewer than `len` bytes only when end of file is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if seeking or reading fails.
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>>;

    /// Stream lines from the beginning of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be started.
    fn head_lines(&mut self) -> io::Result<LineStream<'_>>;
}

/// Opens [`ByteSource`]s by path.
pub trait SourceOpener {
    type Source: ByteSource;

    /// Resolve a caller-supplied path to its stable absolute form.
    ///
    /// The resolved path keeps the file name as given and only canonicalizes
    /// the parent directory, so it matches the paths reported by a watch on
    /// that directory.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] if the file does not exist.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;

    /// Open a source for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    fn open(&self, path: &Path) -> io::Result<Self::Source>;
}
