//! Test utilities for Varna integration tests.
//!
//! Deterministic input generators so every run sees the same lanes.

#![allow(dead_code)]

/// Xorshift32 stream; deterministic and seedable.
pub struct Xorshift(u32);

impl Xorshift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// `n` arbitrary bytes.
pub fn bytes(n: usize, seed: u32) -> Vec<u8> {
    let mut rng = Xorshift::new(seed);
    (0..n).map(|_| rng.next_u32() as u8).collect()
}

/// `n` arbitrary 16-bit values.
pub fn halfwords(n: usize, seed: u32) -> Vec<u16> {
    let mut rng = Xorshift::new(seed);
    (0..n).map(|_| rng.next_u32() as u16).collect()
}

/// `n` arbitrary 32-bit signed values.
pub fn ints(n: usize, seed: u32) -> Vec<i32> {
    let mut rng = Xorshift::new(seed);
    (0..n).map(|_| rng.next_u32() as i32).collect()
}

/// `n` finite floats in `-1000.0..1000.0`.
pub fn floats(n: usize, seed: u32) -> Vec<f32> {
    let mut rng = Xorshift::new(seed);
    (0..n)
        .map(|_| (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32 * 2000.0 - 1000.0)
        .collect()
}

/// A row of RGBA8888 pixels with a horizontal gradient and varying alpha.
pub fn gradient_rgba(width: usize) -> Vec<u8> {
    (0..width)
        .flat_map(|x| {
            let t = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
            [t, 255 - t, (x % 256) as u8, 255]
        })
        .collect()
}
