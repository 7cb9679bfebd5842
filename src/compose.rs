//! Composite adapters over multi-capability handles.
//!
//! A composite holds one single-capability adapter per capability, all
//! wrapping the same handle, and forwards each operation to its owner.
//! Nothing is reimplemented at this level. Construction is total:
//! capability absence only affects the sync/async choice inside the
//! member adapters, never whether the composite can be built.

use std::io::{self, Read, Seek, Write};

use crate::adapter::{Close, Closer, Reader, Seeker, Writer};
use crate::host::Object;

/// Reader + writer over one handle.
pub struct ReadWriter {
    reader: Reader,
    writer: Writer,
}

impl ReadWriter {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            writer: Writer::new(handle),
        }
    }
}

impl Read for ReadWriter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for ReadWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Reader + seeker over one handle.
pub struct ReadSeeker {
    reader: Reader,
    seeker: Seeker,
}

impl ReadSeeker {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            seeker: Seeker::new(handle),
        }
    }
}

impl Read for ReadSeeker {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Seek for ReadSeeker {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.seeker.seek(pos)
    }
}

/// Reader + closer over one handle.
pub struct ReadCloser {
    reader: Reader,
    closer: Closer,
}

impl ReadCloser {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            closer: Closer::new(handle),
        }
    }
}

impl Read for ReadCloser {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Close for ReadCloser {
    fn close(&mut self) -> io::Result<()> {
        self.closer.close()
    }
}

/// Writer + closer over one handle.
pub struct WriteCloser {
    writer: Writer,
    closer: Closer,
}

impl WriteCloser {
    pub fn new(handle: Object) -> Self {
        Self {
            writer: Writer::new(handle.clone()),
            closer: Closer::new(handle),
        }
    }
}

impl Write for WriteCloser {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Close for WriteCloser {
    fn close(&mut self) -> io::Result<()> {
        self.closer.close()
    }
}

/// Writer + seeker over one handle.
pub struct WriteSeeker {
    writer: Writer,
    seeker: Seeker,
}

impl WriteSeeker {
    pub fn new(handle: Object) -> Self {
        Self {
            writer: Writer::new(handle.clone()),
            seeker: Seeker::new(handle),
        }
    }
}

impl Write for WriteSeeker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Seek for WriteSeeker {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.seeker.seek(pos)
    }
}

/// Reader + writer + seeker over one handle.
pub struct ReadWriteSeeker {
    reader: Reader,
    writer: Writer,
    seeker: Seeker,
}

impl ReadWriteSeeker {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            writer: Writer::new(handle.clone()),
            seeker: Seeker::new(handle),
        }
    }
}

impl Read for ReadWriteSeeker {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for ReadWriteSeeker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Seek for ReadWriteSeeker {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.seeker.seek(pos)
    }
}

/// Reader + writer + closer over one handle.
pub struct ReadWriteCloser {
    reader: Reader,
    writer: Writer,
    closer: Closer,
}

impl ReadWriteCloser {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            writer: Writer::new(handle.clone()),
            closer: Closer::new(handle),
        }
    }
}

impl Read for ReadWriteCloser {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for ReadWriteCloser {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Close for ReadWriteCloser {
    fn close(&mut self) -> io::Result<()> {
        self.closer.close()
    }
}

/// Full file-like stream: read, write, seek, and close over one handle.
pub struct File {
    reader: Reader,
    writer: Writer,
    seeker: Seeker,
    closer: Closer,
}

impl File {
    pub fn new(handle: Object) -> Self {
        Self {
            reader: Reader::new(handle.clone()),
            writer: Writer::new(handle.clone()),
            seeker: Seeker::new(handle.clone()),
            closer: Closer::new(handle),
        }
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for File {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Seek for File {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.seeker.seek(pos)
    }
}

impl Close for File {
    fn close(&mut self) -> io::Result<()> {
        self.closer.close()
    }
}
