//! # Varna: Portable Fixed-Width SIMD Vectors
//!
//! Small fixed-width vectors of 8/16/32-bit integers and `f32`, with one
//! operation surface that compiles to SSE instructions on x86 and to plain
//! per-lane loops everywhere else. Built for pixel pipelines: interleaved
//! RGBA load/store, saturating narrowing casts and exact `u8 <-> f32`
//! round trips.
//!
//! ## Quick Start
//!
//! ```rust
//! use varna::{F32x4, I32x4, SimdVector, RoundToInt, cast};
//!
//! let v = F32x4::new(1.0, -2.5, 3.99, -0.001);
//! let truncated: I32x4 = cast(v);
//! assert_eq!(truncated.to_array(), [1, -2, 3, 0]);
//! assert_eq!(v.round().to_array(), [1, -2, 4, 0]);
//!
//! let mask = I32x4::new(1, 2, 3, 4).simd_lt(I32x4::new(5, 0, 3, 10));
//! assert!(mask.any_true() && !mask.all_true());
//! ```
//!
//! ## Architecture
//!
//! - [`vector`]: the operation traits ([`SimdVector`], [`SimdFloat`], ...)
//! - [`backend`]: native 128-bit-or-smaller types, chosen at build time
//! - [`pair`]: wider vectors as a [`Pair`] of two halves
//! - [`half`]: half-float conversion
//! - [`pixel`]: whole-image format and alpha conversion
//! - [`config`]: YAML job configuration
//!
//! ```text
//!   ┌────────────────────────┐      ┌────────────────────────┐
//!   │ pixel / half / config  │ ───► │  vector traits          │
//!   └────────────────────────┘      └───────────┬────────────┘
//!                                               │ implemented by
//!                        ┌──────────────────────┼──────────────────────┐
//!                        ▼                      ▼                      ▼
//!               ┌────────────────┐     ┌────────────────┐     ┌────────────────┐
//!               │  backend::sse  │ or  │ backend::scalar│     │   Pair<H>      │
//!               │  (x86 SSE2+)   │     │  (portable)    │     │ (two halves)   │
//!               └────────────────┘     └────────────────┘     └────────────────┘
//! ```
//!
//! ## Build flags
//!
//! - `--features force-scalar`: use the portable backend on x86 too.
//! - `-C target-feature=+ssse3,+sse4.1` (or a suitable `target-cpu`): enable the
//!   SSSE3 / SSE4.1 refinements of the SSE backend.

pub mod backend;
mod cast;
pub mod config;
pub mod error;
pub mod half;
pub mod lane;
pub mod pair;
pub mod pixel;
pub mod vector;

pub use backend::{
    BackendKind, F32x2, F32x4, I8x16, I16x4, I16x8, I32x4, U8x4, U8x16, U16x4, U16x8, U32x4,
};
pub use config::ConversionConfig;
pub use error::{Error, Result};
pub use lane::Lane;
pub use pair::{F32x8, F32x16, I32x8, Pair, U8x8, U16x16, U32x8};
pub use pixel::{AlphaType, ColorType, PixelInfo, clamp_f16, read_pixels};
pub use vector::{
    Halves, Interleave4, LaneCast, RoundToInt, SaturatingAdd, SimdFloat, SimdVector, cast,
};
