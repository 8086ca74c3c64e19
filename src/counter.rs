use std::fmt;

/// Number of base-1000 groups held by one counter.
pub const GROUP_COUNT: usize = 9;

const GROUP_MAX: u16 = 999;

/// Base-1000 byte tally used for the human-readable report.
///
/// Group 0 is the least significant. A carry out of the last group is
/// dropped, so the counter wraps at 1000^9.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitGroupCounter {
    groups: [u16; GROUP_COUNT],
}

impl DigitGroupCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` one unit at a time, walking the carry chain for each unit.
    pub fn increment(&mut self, amount: u64) {
        for _ in 0..amount {
            self.tick();
        }
    }

    fn tick(&mut self) {
        for group in self.groups.iter_mut() {
            if *group == GROUP_MAX {
                *group = 0;
            } else {
                *group += 1;
                return;
            }
        }
    }

    pub fn groups(&self) -> &[u16; GROUP_COUNT] {
        &self.groups
    }

    /// Integer value of the groups.
    pub fn value(&self) -> u128 {
        self.groups
            .iter()
            .rev()
            .fold(0u128, |acc, &group| acc * 1000 + u128::from(group))
    }

    /// Renders the groups most significant first as comma separated
    /// three-digit fields, dropping leading zero groups. Zero renders as `000`.
    pub fn format(&self) -> String {
        let top = self
            .groups
            .iter()
            .rposition(|&group| group != 0)
            .unwrap_or(0);

        self.groups[..=top]
            .iter()
            .rev()
            .map(|group| format!("{:03}", group))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for DigitGroupCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Selects one side of a [`CounterPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulator {
    Input,
    Output,
}

/// Bytes processed and bytes produced for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterPair {
    pub input: DigitGroupCounter,
    pub output: DigitGroupCounter,
}

impl CounterPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, accumulator: Accumulator, amount: u64) {
        match accumulator {
            Accumulator::Input => self.input.increment(amount),
            Accumulator::Output => self.output.increment(amount),
        }
    }
}
