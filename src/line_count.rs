use std::io::{self, Read, Write};

use thiserror::Error;

/// The size of the scratch buffer used by [`count_lines`].
pub const BUFFER_SIZE: usize = 32 * 1024;

const LINE_TERMINATOR: u8 = b'\n';

/// A running count of line terminators.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineCount(usize);

impl LineCount {
    pub fn new() -> Self {
        LineCount(0)
    }

    pub fn count(&self) -> usize {
        self.0
    }

    /// Adds the terminators found in `chunk` to the count.
    pub fn add_chunk(&mut self, chunk: &[u8]) {
        self.0 += bytecount::count(chunk, LINE_TERMINATOR);
    }
}

impl Write for LineCount {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add_chunk(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A read failed before the end of the stream was reached.
///
/// `count` holds the terminators seen in the bytes read before the failure.
#[derive(Debug, Error)]
#[error("read failed after counting {count} lines")]
pub struct LineCountError {
    pub count: usize,
    #[source]
    pub source: io::Error,
}

/// Counts the `\n` bytes in `reader` until it reports end of input.
///
/// The reader is consumed with reads of at most [`BUFFER_SIZE`] bytes, so memory use
/// stays bounded whatever the length of the stream.
pub fn count_lines<R: Read>(reader: R) -> Result<usize, LineCountError> {
    count_lines_with_capacity(reader, BUFFER_SIZE)
}

/// Same as [`count_lines`] with a scratch buffer of `capacity` bytes (at least one).
pub fn count_lines_with_capacity<R: Read>(
    mut reader: R,
    capacity: usize,
) -> Result<usize, LineCountError> {
    let mut buf = vec![0; capacity.max(1)];
    let mut count = LineCount::new();

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(count.count()),
            // Only the freshly read prefix, the tail may hold bytes of a longer previous read.
            Ok(read) => count.add_chunk(&buf[..read]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(LineCountError { count: count.count(), source }),
        }
    }
}
