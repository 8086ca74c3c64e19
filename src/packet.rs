//! Code-byte framing.
//!
//! The top bit of a code byte selects a literal (1) or repeat (0) packet and
//! the low seven bits carry the length. A code byte of zero ends the stream.

/// Longest literal or repeat run a single packet can describe.
pub const MAX_RUN: usize = 0x7F;

/// Code byte marking the end of a compressed stream.
pub const TERMINATOR: u8 = 0x00;

const LITERAL_FLAG: u8 = 0x80;
const LENGTH_MASK: u8 = 0x7F;

/// Decoded meaning of one code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeByte {
    Terminator,
    /// `n` raw bytes follow.
    Literal(u8),
    /// One byte follows, repeated `n` times.
    Repeat(u8),
}

impl CodeByte {
    pub fn parse(code: u8) -> Self {
        let length = code & LENGTH_MASK;
        if code & LITERAL_FLAG != 0 {
            CodeByte::Literal(length)
        } else if length == 0 {
            CodeByte::Terminator
        } else {
            CodeByte::Repeat(length)
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            CodeByte::Terminator => TERMINATOR,
            CodeByte::Literal(length) => LITERAL_FLAG | (length & LENGTH_MASK),
            CodeByte::Repeat(length) => length & LENGTH_MASK,
        }
    }

    /// Buffer slots occupied by the packet, code byte included.
    pub fn frame_len(self) -> usize {
        match self {
            CodeByte::Terminator => 1,
            CodeByte::Literal(length) => usize::from(length) + 1,
            CodeByte::Repeat(_) => 2,
        }
    }
}
