//! Filesystem-backed byte source.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::{ByteSource, LineStream, SourceOpener};

/// Opens files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl FsOpener {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceOpener for FsOpener {
    type Source = FileSource;

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let metadata = std::fs::metadata(path)?;
        if metadata.is_dir() {
            return std::fs::canonicalize(path);
        }

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        match path.file_name() {
            Some(name) => Ok(std::fs::canonicalize(parent)?.join(name)),
            None => std::fs::canonicalize(path),
        }
    }

    fn open(&self, path: &Path) -> io::Result<FileSource> {
        let file = File::open(path)?;
        tracing::trace!(path = %path.display(), "Opened file");
        Ok(FileSource { file })
    }
}

/// An open file handle.
#[derive(Debug)]
pub struct FileSource {
    file: File,
}

impl ByteSource for FileSource {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(offset))?;

        let mut buf = Vec::with_capacity(len);
        (&mut self.file).take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn head_lines(&mut self) -> io::Result<LineStream<'_>> {
        self.file.seek(SeekFrom::Start(0))?;

        let reader = BufReader::new(&mut self.file);
        Ok(Box::new(reader.split(b'\n')))
    }
}
