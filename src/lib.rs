//! # rle7
//!
//! A streaming run-length codec. Input is split into literal packets (a run of
//! bytes with no two neighbours equal) and repeat packets (one byte repeated),
//! each led by a code byte whose top bit picks the packet kind and whose low
//! seven bits carry the length. A zero code byte terminates the stream.
//!
//! ```rust
//! use rle7::{compress_bytes, decompress_bytes};
//!
//! let compressed = compress_bytes(b"AAAB").unwrap();
//! assert_eq!(compressed, vec![0x03, 0x41, 0x81, 0x42, 0x00]);
//! assert_eq!(decompress_bytes(&compressed).unwrap(), b"AAAB");
//! ```

mod buffer;
pub mod counter;
pub mod error;
pub mod packet;
pub mod rle;

pub use counter::{Accumulator, CounterPair, DigitGroupCounter};
pub use error::{Result, RleError};
pub use packet::CodeByte;
pub use rle::{compress, decompress};

use std::io::Cursor;

/// Compresses an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompresses an in-memory packet stream.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}
