//! Simulated price history.
//!
//! The explorer only reports the current price, so the chart is fed a
//! generated walk that ends at that price. The values are illustrative and
//! must always be labelled as simulated wherever they are shown.

use crate::config::HistoryConfig;
use log::warn;
use ring::rand::{SecureRandom, SystemRandom};

/// Uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Unseeded randomness backed by the operating system.
#[derive(Debug)]
pub struct OsRandom {
    rng: SystemRandom,
}

impl OsRandom {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for OsRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> f64 {
        let mut bytes = [0u8; 8];
        if self.rng.fill(&mut bytes).is_err() {
            warn!("System randomness unavailable, using a flat step");
            return 0.5;
        }
        unit_from_bits(u64::from_le_bytes(bytes))
    }
}

/// Deterministic xorshift64* generator for reproducible charts and tests.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // xorshift is stuck at zero forever
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        unit_from_bits(x.wrapping_mul(0x2545_F491_4F6C_DD1D))
    }
}

fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSynthesizer {
    length: usize,
    floor: f64,
    max_step: f64,
}

impl SeriesSynthesizer {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            length: config.length,
            floor: config.floor,
            max_step: config.max_step,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Builds `length` points, oldest first, ending at `latest`.
    ///
    /// Each earlier point moves at most `max_step / 2` away from its successor
    /// and never drops below the floor. A `latest` below the floor is lifted to it.
    pub fn synthesize(&self, latest: f64, rng: &mut dyn RandomSource) -> Vec<f64> {
        if self.length == 0 {
            return Vec::new();
        }

        let anchor = if latest.is_finite() { latest.max(self.floor) } else { self.floor };
        let mut series = vec![0.0; self.length];
        series[self.length - 1] = anchor;

        for i in (0..self.length - 1).rev() {
            let next = series[i + 1];
            let step = (rng.next_unit() - 0.5) * self.max_step;
            series[i] = (next + step).max(self.floor);
        }
        series
    }
}

impl Default for SeriesSynthesizer {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}
