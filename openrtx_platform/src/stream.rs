//! Hardware-independent audio stream substrate.
//!
//! Mediates access to an input or output audio path with priority
//! arbitration, `LINEAR` and `CIRC_DOUBLE` buffer modes, and the
//! half-transfer-boundary bookkeeping a DMA driver would otherwise need to
//! get right. This module contains no MCU-specific code: a [`StreamPool`]
//! is exercised directly in host tests, and the `stm32h7` feature's SAI/DMA
//! driver (`hw` module) is a thin adapter that calls into it from interrupt
//! context.

use alloc::vec::Vec;

use openrtx_core::CoreError;

/// Total order over audio path ownership: higher pre-empts lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Beep,
    Rx,
    VoicePrompt,
    Tx,
}

/// Buffer management discipline for one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// One acquisition fills the whole buffer once, then stops.
    Linear,
    /// The buffer is split into two halves; producer and consumer
    /// alternate, one filling/draining while the other is held by the
    /// caller.
    CircDouble,
}

/// Which half of a `CIRC_DOUBLE` buffer is currently owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Half {
    A,
    B,
}

/// Buffer-management state, mirroring §4.1's state diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Idle,
    /// `LINEAR` mode, waiting for the single acquisition to complete.
    Armed,
    /// `LINEAR` mode, acquisition complete and not yet consumed.
    Done,
    /// `CIRC_DOUBLE` mode, alternating halves.
    Running(Half),
    /// The stream was pre-empted or its DMA engine reported an error; the
    /// next `get_data` returns `{ NULL, 0 }`.
    Failed,
}

/// A slice of a stream buffer handed back to the caller: `{ ptr, len }` in
/// the reference API, represented here as a borrowed slice with an
/// explicit "this is a partial or empty result" flag folded into `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBlock<'a> {
    pub data: &'a [i16],
}

impl<'a> DataBlock<'a> {
    pub fn empty() -> DataBlock<'a> {
        DataBlock { data: &[] }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

struct Stream {
    priority: Priority,
    mode: BufferMode,
    state: StreamState,
    sample_rate: u32,
}

/// A handle to an open input or output stream. Negative in the reference C
/// API; here, simply an opaque non-copyable token backed by a pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamId(usize);

impl StreamId {
    /// Constructs a handle for a pool slot known by index, for callers (the
    /// `stm32h7` hardware adapter) that pin a stream to a fixed slot rather
    /// than threading the handle `open` returned through interrupt context.
    pub fn from_raw(index: usize) -> Self {
        StreamId(index)
    }
}

/// Owns the set of streams for one direction (input or output) and arbitrates
/// opens against the running priority order.
pub struct StreamPool {
    streams: Vec<Option<Stream>>,
}

impl StreamPool {
    pub fn new() -> Self {
        StreamPool { streams: Vec::new() }
    }

    /// Opens a stream at `priority`, claiming the (single, direction-wide)
    /// resource this pool represents.
    ///
    /// Fails with [`CoreError::ResourceBusy`] if an equal-or-higher priority
    /// owner already holds the resource, or [`CoreError::InvalidBufferSize`]
    /// if `length` is odd while `mode` is [`BufferMode::CircDouble`].
    pub fn open(
        &mut self,
        priority: Priority,
        length: usize,
        mode: BufferMode,
        sample_rate: u32,
    ) -> Result<StreamId, CoreError> {
        if mode == BufferMode::CircDouble && length % 2 != 0 {
            return Err(CoreError::InvalidBufferSize);
        }

        if let Some((slot, existing)) = self.current_owner() {
            if priority < existing.priority {
                return Err(CoreError::ResourceBusy);
            }
            if priority == existing.priority {
                return Err(CoreError::ResourceBusy);
            }
            // Higher priority: pre-empt.
            self.streams[slot].as_mut().unwrap().state = StreamState::Failed;
        }

        let state = match mode {
            BufferMode::Linear => StreamState::Armed,
            BufferMode::CircDouble => StreamState::Running(Half::A),
        };

        let stream = Stream { priority, mode, state, sample_rate };
        let id = self.insert(stream);
        Ok(id)
    }

    fn current_owner(&self) -> Option<(usize, &Stream)> {
        self.streams.iter().enumerate().find_map(|(i, s)| match s {
            Some(s) if s.state != StreamState::Failed => Some((i, s)),
            _ => None,
        })
    }

    fn insert(&mut self, stream: Stream) -> StreamId {
        for (i, slot) in self.streams.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(stream);
                return StreamId(i);
            }
        }
        self.streams.push(Some(stream));
        StreamId(self.streams.len() - 1)
    }

    /// Delivers data for `id`'s buffer, given that `buffer` has just been
    /// fully acquired (`LINEAR`) or a half-transfer boundary (`CIRC_DOUBLE`)
    /// has been reached.
    pub fn on_transfer_complete<'a>(&mut self, id: StreamId, buffer: &'a [i16]) -> DataBlock<'a> {
        let Some(stream) = self.streams.get_mut(id.0).and_then(|s| s.as_mut()) else {
            return DataBlock::empty();
        };

        match stream.state {
            StreamState::Failed => DataBlock::empty(),
            StreamState::Armed => {
                stream.state = StreamState::Done;
                DataBlock { data: buffer }
            }
            StreamState::Running(half) => {
                let (this_half, next_half) = match half {
                    Half::A => (&buffer[..buffer.len() / 2], Half::B),
                    Half::B => (&buffer[buffer.len() / 2..], Half::A),
                };
                stream.state = StreamState::Running(next_half);
                DataBlock { data: this_half }
            }
            StreamState::Idle | StreamState::Done => DataBlock::empty(),
        }
    }

    /// Re-arms a `LINEAR` stream for its next acquisition after `get_data`
    /// has consumed a `Done` buffer.
    pub fn rearm(&mut self, id: StreamId) {
        if let Some(Some(stream)) = self.streams.get_mut(id.0) {
            if stream.mode == BufferMode::Linear && stream.state == StreamState::Done {
                stream.state = StreamState::Armed;
            }
        }
    }

    /// Stops a stream, freeing its resource and invalidating the handle for
    /// further transfers.
    pub fn stop(&mut self, id: StreamId) {
        if let Some(slot) = self.streams.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Marks a stream's underlying DMA engine as having reported a transfer
    /// error. Subsequent `on_transfer_complete` calls return empty blocks.
    pub fn fail(&mut self, id: StreamId) {
        if let Some(Some(stream)) = self.streams.get_mut(id.0) {
            stream.state = StreamState::Failed;
        }
    }

    pub fn is_failed(&self, id: StreamId) -> bool {
        matches!(self.streams.get(id.0), Some(Some(s)) if s.state == StreamState::Failed)
    }

    pub fn sample_rate(&self, id: StreamId) -> Option<u32> {
        self.streams.get(id.0)?.as_ref().map(|s| s.sample_rate)
    }
}

impl Default for StreamPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_acquisition_completes_once_then_stops() {
        let mut pool = StreamPool::new();
        let id = pool.open(Priority::Rx, 80, BufferMode::Linear, 24_000).unwrap();
        let buf = [1i16, 2, 3, 4];
        let block = pool.on_transfer_complete(id, &buf);
        assert_eq!(block.data, &buf);
    }

    #[test]
    fn circ_double_alternates_halves() {
        let mut pool = StreamPool::new();
        let id = pool.open(Priority::Rx, 8, BufferMode::CircDouble, 24_000).unwrap();
        let buf = [1i16, 2, 3, 4, 5, 6, 7, 8];

        let first = pool.on_transfer_complete(id, &buf);
        assert_eq!(first.data, &buf[..4]);
        let second = pool.on_transfer_complete(id, &buf);
        assert_eq!(second.data, &buf[4..]);
        let third = pool.on_transfer_complete(id, &buf);
        assert_eq!(third.data, &buf[..4]);
    }

    #[test]
    fn odd_length_circ_double_is_rejected() {
        let mut pool = StreamPool::new();
        let err = pool.open(Priority::Rx, 7, BufferMode::CircDouble, 24_000).unwrap_err();
        assert_eq!(err, CoreError::InvalidBufferSize);
    }

    #[test]
    fn equal_priority_is_rejected_while_owner_active() {
        let mut pool = StreamPool::new();
        pool.open(Priority::Rx, 8, BufferMode::CircDouble, 24_000).unwrap();
        let err = pool.open(Priority::Rx, 8, BufferMode::CircDouble, 24_000).unwrap_err();
        assert_eq!(err, CoreError::ResourceBusy);
    }

    #[test]
    fn lower_priority_is_rejected() {
        let mut pool = StreamPool::new();
        pool.open(Priority::Tx, 8, BufferMode::CircDouble, 48_000).unwrap();
        let err = pool.open(Priority::Beep, 8, BufferMode::Linear, 8_000).unwrap_err();
        assert_eq!(err, CoreError::ResourceBusy);
    }

    #[test]
    fn higher_priority_preempts_and_fails_previous_owner() {
        let mut pool = StreamPool::new();
        let low = pool.open(Priority::Beep, 8, BufferMode::CircDouble, 8_000).unwrap();
        let high = pool.open(Priority::Tx, 8, BufferMode::CircDouble, 48_000).unwrap();

        assert!(pool.is_failed(low));
        let buf = [0i16; 8];
        assert!(pool.on_transfer_complete(low, &buf).is_empty());
        assert!(!pool.on_transfer_complete(high, &buf).is_empty());
    }

    #[test]
    fn failed_stream_returns_empty_blocks() {
        let mut pool = StreamPool::new();
        let id = pool.open(Priority::Rx, 8, BufferMode::CircDouble, 24_000).unwrap();
        pool.fail(id);
        let buf = [0i16; 8];
        assert!(pool.on_transfer_complete(id, &buf).is_empty());
    }

    #[test]
    fn stopped_stream_is_reusable_by_a_new_open() {
        let mut pool = StreamPool::new();
        let id = pool.open(Priority::Rx, 8, BufferMode::CircDouble, 24_000).unwrap();
        pool.stop(id);
        let id2 = pool.open(Priority::Beep, 8, BufferMode::Linear, 8_000).unwrap();
        assert_ne!(id, id2);
    }
}
