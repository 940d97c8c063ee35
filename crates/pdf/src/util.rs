//! Generic utilities

use std::io::{self, Write};

/// A writer that keeps track of the number of bytes written so far
///
/// The xref table needs the byte offset of every object.
pub struct ByteCounter<W> {
    inner: W,
    count: usize,
}

impl<W: Write> ByteCounter<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        ByteCounter { inner, count: 0 }
    }

    /// Return the inner writer
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Get the number of bytes written
    pub fn bytes_written(&self) -> usize {
        self.count
    }
}

impl<W: Write> Write for ByteCounter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.count += size;
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Hands out consecutive object numbers
pub(crate) struct NextId {
    obj_id: u64,
}

impl NextId {
    pub(crate) fn new(start: u64) -> Self {
        Self { obj_id: start }
    }

    pub(crate) fn next(&mut self) -> u64 {
        let next = self.obj_id;
        self.obj_id += 1;
        next
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::ByteCounter;

    #[test]
    fn counts_written_bytes() {
        let mut buf = Vec::new();
        let mut counter = ByteCounter::new(&mut buf);
        write!(counter, "%PDF-1.4").unwrap();
        counter.write_all(&[0x0a]).unwrap();
        assert_eq!(counter.bytes_written(), 9);
        assert_eq!(buf.len(), 9);
    }
}
