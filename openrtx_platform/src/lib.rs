//! # OpenRTX Platform
//!
//! The hardware-independent audio-stream substrate: priority-arbitrated
//! input/output streams, `LINEAR` and `CIRC_DOUBLE` buffer modes, and the
//! fixed-size PCM buffers they run on. [`stream::StreamPool`] is exercised
//! directly on the host; the `stm32h7` feature adds a thin SAI/DMA adapter
//! (`hw`) that drives it from real interrupt context on Daisy hardware.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod buffer;
pub mod clock;
pub mod stream;

#[cfg(feature = "stm32h7")]
pub mod hw;

#[cfg(any(test, feature = "std"))]
pub mod wait;

pub use buffer::StaticSampleBuffer;
pub use clock::SampleRate;
pub use stream::{BufferMode, DataBlock, Priority, StreamId, StreamPool};

#[cfg(any(test, feature = "std"))]
pub use wait::WakeHandle;
