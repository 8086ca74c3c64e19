use std::io::{Read, Write};

use log::{debug, trace, warn};

use crate::buffer::{LookaheadBuffer, Slot, CAPACITY};
use crate::counter::{Accumulator, CounterPair};
use crate::error::{Result, RleError};
use crate::packet::{CodeByte, MAX_RUN, TERMINATOR};

/// Compresses data from a reader to a writer as literal and repeat packets
///
/// # Arguments
/// * `reader` - The uncompressed source, read one byte at a time
/// * `writer` - Receives the packets followed by a single terminator byte
///
/// # Returns
/// The byte tallies for the run: bytes read from `reader` and bytes written
/// to `writer`
pub fn compress(reader: &mut impl Read, writer: &mut impl Write) -> Result<CounterPair> {
    let mut counters = CounterPair::new();
    encode_stream(reader, writer, &mut counters)?;
    Ok(counters)
}

/// Decompresses a packet stream from a reader to a writer
///
/// Decoding stops at the terminator byte or when the input runs out.
///
/// # Errors
/// Returns [`RleError::MalformedStream`] if a packet declares more payload
/// than the input holds, or if a literal packet has zero length
pub fn decompress(reader: &mut impl Read, writer: &mut impl Write) -> Result<CounterPair> {
    let mut counters = CounterPair::new();
    decode_stream(reader, writer, &mut counters)?;
    Ok(counters)
}

// At most `CAPACITY - 1` slots are filled so that the slot after the valid
// span is always `Slot::Empty`.
fn encode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    counters: &mut CounterPair,
) -> Result<()> {
    debug!("compress: starting");
    let mut buffer = LookaheadBuffer::new();
    buffer.refill(reader, CAPACITY - 1, counters)?;

    let mut packet = [0u8; MAX_RUN + 1];
    let mut scan = 0usize;

    while !buffer.is_exhausted() {
        let head = match buffer.get(scan) {
            Slot::Byte(byte) => byte,
            Slot::Empty => break,
        };

        let mut run = 1;
        while run < MAX_RUN && buffer.get(scan + run) == Slot::Byte(head) {
            run += 1;
        }

        let (written, consumed) = if run > 1 {
            let code = CodeByte::Repeat(run as u8);
            packet[0] = code.to_byte();
            packet[1] = head;
            trace!("repeat {} x {:#04x}", run, head);
            (code.frame_len(), run)
        } else {
            let mut length = 0;
            while length < MAX_RUN {
                let current = buffer.get(scan + length);
                if current == buffer.get(scan + length + 1) {
                    break;
                }
                let Slot::Byte(byte) = current else { break };
                packet[length + 1] = byte;
                length += 1;
            }
            let code = CodeByte::Literal(length as u8);
            packet[0] = code.to_byte();
            trace!("literal of {} bytes", length);
            (code.frame_len(), length)
        };

        writer.write_all(&packet[..written])?;
        counters.increment(Accumulator::Output, written as u64);

        buffer.consume(scan, consumed);
        buffer.refill(reader, consumed, counters)?;
        scan = (scan + consumed) % CAPACITY;
    }

    writer.write_all(&[TERMINATOR])?;
    counters.increment(Accumulator::Output, 1);
    writer.flush()?;

    debug!(
        "compress: {} bytes in, {} bytes out",
        counters.input, counters.output
    );
    Ok(())
}

fn decode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    counters: &mut CounterPair,
) -> Result<()> {
    debug!("decompress: starting");
    let mut buffer = LookaheadBuffer::new();
    buffer.refill(reader, CAPACITY, counters)?;

    let mut output = Vec::with_capacity(MAX_RUN);
    let mut scan = 0usize;

    loop {
        if buffer.is_exhausted() {
            warn!(
                "compressed stream ended after {} bytes without a terminator",
                buffer.consumed()
            );
            break;
        }

        let offset = buffer.consumed();
        let code = match buffer.get(scan) {
            Slot::Byte(byte) => CodeByte::parse(byte),
            Slot::Empty => {
                warn!("compressed stream ended at byte {} without a terminator", offset);
                break;
            }
        };

        let length = match code {
            CodeByte::Terminator => {
                trace!("terminator at byte {}", offset);
                break;
            }
            CodeByte::Literal(0) => {
                return Err(RleError::malformed(offset, "literal packet with zero length"));
            }
            CodeByte::Literal(length) | CodeByte::Repeat(length) => usize::from(length),
        };

        let frame = code.frame_len();
        if frame > buffer.remaining() {
            return Err(RleError::malformed(
                offset,
                format!(
                    "packet needs {} bytes but only {} remain",
                    frame,
                    buffer.remaining()
                ),
            ));
        }

        output.clear();
        match code {
            CodeByte::Literal(_) => {
                for position in 1..=length {
                    output.push(payload_byte(&buffer, scan + position, offset)?);
                }
                trace!("literal of {} bytes at byte {}", length, offset);
            }
            _ => {
                let byte = payload_byte(&buffer, scan + 1, offset)?;
                output.resize(length, byte);
                trace!("repeat {} x {:#04x} at byte {}", length, byte, offset);
            }
        }

        counters.increment(Accumulator::Output, length as u64);
        writer.write_all(&output)?;

        buffer.consume(scan, frame);
        buffer.refill(reader, frame, counters)?;
        scan = (scan + frame) % CAPACITY;
    }

    writer.flush()?;
    debug!(
        "decompress: {} bytes in, {} bytes out",
        counters.input, counters.output
    );
    Ok(())
}

fn payload_byte(buffer: &LookaheadBuffer, position: usize, offset: u64) -> Result<u8> {
    buffer
        .get(position)
        .byte()
        .ok_or_else(|| RleError::malformed(offset, "payload runs past end of stream"))
}
