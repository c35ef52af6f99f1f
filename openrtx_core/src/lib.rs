//! # OpenRTX Core
//!
//! Foundational, allocation-free mechanisms shared by every crate in this
//! workspace: error codes, a lock-free SPSC ring buffer for audio-thread to
//! I/O-thread handoff, a stack-allocated vector, denormal flushing for the
//! correlator's floating-point EMA accumulators, byte-swap helpers for the
//! wire format, and a small PRNG used by tests and the CLI demo.

pub mod denormal;
pub mod error;
pub mod random;
pub mod spsc;
pub mod stack_vec;
pub mod swap;

pub use denormal::{flush_denormal_f32, flush_denormal_f64, flush_denormals_f32_batch, flush_denormals_f64_batch};
pub use error::{CoreError, Result};
pub use random::XorShiftRng;
pub use spsc::{Consumer, Producer, SpscRingBuffer};
pub use stack_vec::StackVec;
pub use swap::{swap16, swap32, swap64};
