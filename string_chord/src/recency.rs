use std::collections::VecDeque;

/// Fixed-size FIFO of the most recently visited pins.
#[derive(Clone, Debug)]
pub struct RecencyWindow {
    pins: VecDeque<usize>,
    size: usize,
}

impl RecencyWindow {
    /// A full window holding `size` copies of `seed`.
    pub fn new(size: usize, seed: usize) -> Self {
        Self {
            pins: std::iter::repeat(seed).take(size).collect(),
            size,
        }
    }

    pub fn contains(&self, pin: usize) -> bool {
        self.pins.contains(&pin)
    }

    pub fn push(&mut self, pin: usize) {
        if self.size == 0 {
            return;
        }
        if self.pins.len() == self.size {
            self.pins.pop_front();
        }
        self.pins.push_back(pin);
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.pins.iter().copied()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}
