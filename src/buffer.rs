use std::io::{self, ErrorKind, Read};

use crate::counter::{Accumulator, CounterPair};

/// Number of slots in the lookahead window.
pub const CAPACITY: usize = 128;

/// One lookahead slot.
///
/// `Empty` marks a slot that was never filled or whose byte has already been
/// consumed. It never equals a `Byte`, while two `Empty` slots compare equal,
/// which is what stops a literal scan at the end of the valid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Byte(u8),
}

impl Slot {
    pub fn byte(self) -> Option<u8> {
        match self {
            Slot::Byte(b) => Some(b),
            Slot::Empty => None,
        }
    }
}

/// Fixed-capacity circular window of pending input bytes.
///
/// `index` is the next write position and `remaining` the number of valid
/// slots currently held. Consumed spans are reset to [`Slot::Empty`].
#[derive(Debug, Clone)]
pub struct LookaheadBuffer {
    slots: [Slot; CAPACITY],
    index: usize,
    remaining: usize,
    exhausted: bool,
    consumed: u64,
}

impl LookaheadBuffer {
    pub fn new() -> Self {
        Self {
            slots: [Slot::Empty; CAPACITY],
            index: 0,
            remaining: 0,
            exhausted: false,
            consumed: 0,
        }
    }

    /// Slot at `position`, taken modulo the capacity.
    pub fn get(&self, position: usize) -> Slot {
        self.slots[position % CAPACITY]
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once a refill found the source empty with nothing left buffered.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Total slots consumed so far, i.e. the source offset of the oldest
    /// valid slot.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Reads up to `amount` bytes from `source` into the slots starting at
    /// `index`. Returns the number of bytes read.
    ///
    /// The buffer is marked exhausted only when the very first read hits end
    /// of input and no valid slots remain.
    pub fn refill<R: Read>(
        &mut self,
        source: &mut R,
        amount: usize,
        counters: &mut CounterPair,
    ) -> io::Result<usize> {
        for read in 0..amount {
            match read_byte(source)? {
                Some(byte) => {
                    self.slots[self.index] = Slot::Byte(byte);
                    self.index = (self.index + 1) % CAPACITY;
                    self.remaining += 1;
                    counters.increment(Accumulator::Input, 1);
                }
                None => {
                    if read == 0 && self.remaining == 0 {
                        self.exhausted = true;
                    }
                    return Ok(read);
                }
            }
        }
        Ok(amount)
    }

    /// Resets `amount` slots starting at `start` to [`Slot::Empty`].
    pub fn invalidate(&mut self, start: usize, amount: usize) {
        for offset in 0..amount {
            self.slots[(start + offset) % CAPACITY] = Slot::Empty;
        }
    }

    /// Drops `amount` valid slots starting at `start`.
    pub fn consume(&mut self, start: usize, amount: usize) {
        debug_assert!(amount <= self.remaining);
        self.remaining -= amount.min(self.remaining);
        self.consumed += amount as u64;
        self.invalidate(start, amount);
    }
}

fn read_byte<R: Read>(source: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
