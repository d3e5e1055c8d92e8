//! Input ingestion
//!
//! The simulator never opens files itself. It reads from a [`ByteSource`]: any
//! [`std::io::Read`] implementor, or a closure wrapped with [`from_fn`]. The
//! whole input is accumulated into one [`Container<u8>`] that the parser then
//! borrows line by line.

use crate::memory::{AllocError, Container};
use std::fmt;
use std::io::{self, Read};

/// Bytes requested from the source per read
pub const READ_CHUNK_SIZE: usize = 4096;

/// Something that yields the input in chunks
pub trait ByteSource {
    /// Fill the front of `buf` and return how many bytes were written.
    /// `Ok(0)` means the input is exhausted.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read> ByteSource for R {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

/// [`ByteSource`] backed by a closure
pub struct FnSource<F> {
    next: F,
}

/// Wrap a chunk-producing closure as a [`ByteSource`].
pub fn from_fn<F>(next: F) -> FnSource<F>
where
    F: FnMut(&mut [u8]) -> io::Result<usize>,
{
    FnSource { next }
}

impl<F> ByteSource for FnSource<F>
where
    F: FnMut(&mut [u8]) -> io::Result<usize>,
{
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (self.next)(buf)
    }
}

/// Failure while accumulating input
#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    OutOfMemory(AllocError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "Failed to read input: {}", err),
            ReadError::OutOfMemory(err) => write!(f, "Failed to buffer input: {}", err),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::OutOfMemory(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<AllocError> for ReadError {
    fn from(err: AllocError) -> Self {
        ReadError::OutOfMemory(err)
    }
}

/// Read `source` to the end into a fresh buffer.
pub fn read_all<S: ByteSource + ?Sized>(source: &mut S) -> Result<Container<u8>, ReadError> {
    read_into(source, Container::new())
}

/// Read `source` to the end, appending to `buffer`.
///
/// Each chunk is appended all-or-nothing; on any error the partially filled
/// buffer is dropped and nothing is returned.
pub fn read_into<S: ByteSource + ?Sized>(
    source: &mut S,
    mut buffer: Container<u8>,
) -> Result<Container<u8>, ReadError> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let n = source.read_chunk(&mut chunk)?;
        if n == 0 {
            return Ok(buffer);
        }
        buffer.try_extend_from_slice(&chunk[..n.min(READ_CHUNK_SIZE)])?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunked(parts: Vec<&'static [u8]>) -> impl ByteSource {
        let mut parts = parts.into_iter();
        from_fn(move |buf: &mut [u8]| {
            let Some(part) = parts.next() else {
                return Ok(0);
            };
            buf[..part.len()].copy_from_slice(part);
            Ok(part.len())
        })
    }

    #[test]
    fn test_read_all_from_reader() {
        let mut reader: &[u8] = b"[A]\n 1 \n";
        let data = read_all(&mut reader).unwrap();
        assert_eq!(data.as_slice(), b"[A]\n 1 \n");
    }

    #[test]
    fn test_read_all_concatenates_chunks() {
        let mut source = chunked(vec![b"move 1 ", b"from 1 ", b"to 2"]);
        let data = read_all(&mut source).unwrap();
        assert_eq!(data.as_slice(), b"move 1 from 1 to 2");
    }

    #[test]
    fn test_io_error_propagates() {
        let mut source = from_fn(|_: &mut [u8]| Err(io::Error::new(io::ErrorKind::Other, "boom")));
        assert!(matches!(read_all(&mut source), Err(ReadError::Io(_))));
    }

    #[test]
    fn test_buffer_limit_is_out_of_memory() {
        let mut source = chunked(vec![b"abcd", b"efgh", b"i"]);
        let result = read_into(&mut source, Container::with_max_capacity(8));
        assert!(matches!(result, Err(ReadError::OutOfMemory(_))));
    }
}
