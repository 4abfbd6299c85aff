use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A source of uniformly distributed bytes for the RND instruction.
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

/// Draws from the thread-local generator; unpredictable across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_byte(&mut self) -> u8 {
        rand::random()
    }
}

/// A seeded generator; the same seed always yields the same bytes.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_byte(&mut self) -> u8 {
        (self.rng.next_u32() & 0xFF) as u8
    }
}

/// Replays a fixed sequence of bytes, starting over once it runs out.
/// An empty sequence always yields 0.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    bytes: Vec<u8>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        SequenceRandom {
            bytes: bytes.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_byte(&mut self) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        let byte = self.bytes[self.cursor];
        self.cursor = (self.cursor + 1) % self.bytes.len();
        byte
    }
}
