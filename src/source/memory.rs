//! In-memory byte source.
//!
//! Buffers are shared between the opener and every source opened from it,
//! so content appended through the opener is visible to open handles, the
//! same way a growing file is visible through an open file descriptor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ByteSource, LineStream, SourceOpener};

/// Root that relative paths are resolved against.
const MEMORY_ROOT: &str = "/memory";

#[derive(Debug, Default)]
struct Entry {
    data: Vec<u8>,
    fail_reads: bool,
}

/// Opens in-memory files.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    files: Rc<RefCell<HashMap<PathBuf, Rc<RefCell<Entry>>>>>,
}

impl MemoryOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file with the given content.
    pub fn insert(&self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) {
        let key = absolute(path.as_ref());
        let entry = self.files.borrow_mut().entry(key).or_default().clone();
        entry.borrow_mut().data = data.into();
    }

    /// Append bytes to an existing file. Missing files are created.
    pub fn append(&self, path: impl AsRef<Path>, data: &[u8]) {
        let key = absolute(path.as_ref());
        let entry = self.files.borrow_mut().entry(key).or_default().clone();
        entry.borrow_mut().data.extend_from_slice(data);
    }

    /// Shrink a file to `len` bytes.
    pub fn truncate(&self, path: impl AsRef<Path>, len: usize) {
        if let Some(entry) = self.files.borrow().get(&absolute(path.as_ref())) {
            entry.borrow_mut().data.truncate(len);
        }
    }

    /// Make every subsequent read of a file fail.
    pub fn fail_reads(&self, path: impl AsRef<Path>, fail: bool) {
        if let Some(entry) = self.files.borrow().get(&absolute(path.as_ref())) {
            entry.borrow_mut().fail_reads = fail;
        }
    }

    fn entry(&self, path: &Path) -> io::Result<Rc<RefCell<Entry>>> {
        self.files
            .borrow()
            .get(&absolute(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }
}

impl SourceOpener for MemoryOpener {
    type Source = MemorySource;

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        self.entry(path)?;
        Ok(absolute(path))
    }

    fn open(&self, path: &Path) -> io::Result<MemorySource> {
        Ok(MemorySource {
            entry: self.entry(path)?,
            reads: Vec::new(),
        })
    }
}

/// Handle to an in-memory file.
///
/// Records every `read_at` call so tests can check the read pattern.
#[derive(Debug)]
pub struct MemorySource {
    entry: Rc<RefCell<Entry>>,
    reads: Vec<(u64, usize)>,
}

impl MemorySource {
    /// The `(offset, len)` of every window read so far.
    #[must_use]
    pub fn reads(&self) -> &[(u64, usize)] {
        &self.reads
    }

    fn check(&self) -> io::Result<()> {
        if self.entry.borrow().fail_reads {
            return Err(io::Error::other("injected read failure"));
        }
        Ok(())
    }
}

impl ByteSource for MemorySource {
    fn size(&mut self) -> io::Result<u64> {
        self.check()?;
        Ok(self.entry.borrow().data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.check()?;
        self.reads.push((offset, len));

        let entry = self.entry.borrow();
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?
            .min(entry.data.len());
        let end = start.saturating_add(len).min(entry.data.len());
        Ok(entry.data[start..end].to_vec())
    }

    fn head_lines(&mut self) -> io::Result<LineStream<'_>> {
        self.check()?;

        let data = self.entry.borrow().data.clone();
        if data.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let body = data.strip_suffix(b"\n").unwrap_or(&data);
        let lines: Vec<Vec<u8>> = body.split(|b| *b == b'\n').map(<[u8]>::to_vec).collect();
        Ok(Box::new(lines.into_iter().map(Ok)))
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(MEMORY_ROOT).join(path)
    }
}
