//! Stream synchronization over a raw serial byte stream.
//!
//! Uses `bytes::BytesMut` for buffer management. The synchronizer owns the
//! only copy of unconsumed bytes: [`feed`](StreamSynchronizer::feed) appends
//! at the tail, and the scan loop consumes from the head, one byte on a
//! marker mismatch or a full window on a match. Leftover bytes below a full
//! window survive between calls, so the stream may be fed in chunks of any
//! size.
//!
//! # Example
//!
//! ```
//! use rangewire::protocol::StreamSynchronizer;
//!
//! let mut sync = StreamSynchronizer::new();
//!
//! // Data arrives in arbitrary chunks from the serial port
//! let outcomes = sync.feed(&[0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0x05]);
//! assert_eq!(outcomes.len(), 1);
//! assert!(outcomes[0].is_valid());
//! ```

use bytes::{Buf, BytesMut};

use super::wire_format::{window_hex, DecodeOutcome, FrameDecoder, FRAME_SIZE, SYNC_BYTE};

/// Initial buffer capacity. Serial reads are small and the scan loop never
/// leaves a full window behind, so the buffer stays near one read's worth.
const INITIAL_CAPACITY: usize = 256;

/// Locates frame boundaries in an unbounded, possibly misaligned byte stream.
///
/// One synchronizer per serial session; it exclusively owns its buffer and
/// holds no other state, so a fresh instance starts with no alignment
/// history to unlearn.
pub struct StreamSynchronizer {
    /// Unconsumed bytes carried across `feed` calls.
    buffer: BytesMut,
}

impl StreamSynchronizer {
    /// Create a synchronizer with a fresh empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Append incoming bytes and drain every classifiable window.
    ///
    /// Returns one [`DecodeOutcome`] per consumed 7-byte window, in stream
    /// order (possibly none). Feeding a frame whole, split at any byte
    /// boundary, or one byte at a time produces identical outcomes.
    pub fn feed(&mut self, data: &[u8]) -> Vec<DecodeOutcome> {
        self.buffer.extend_from_slice(data);

        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_window() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Scan for the next classifiable window.
    ///
    /// Slides one byte at a time until the buffer head carries the sync
    /// marker, then consumes a full window unconditionally: the verdict is
    /// reported either way, and marker bytes inside a consumed window are
    /// never re-examined.
    fn next_window(&mut self) -> Option<DecodeOutcome> {
        while self.buffer.len() >= FRAME_SIZE {
            if self.buffer[0] != SYNC_BYTE || self.buffer[1] != SYNC_BYTE {
                self.buffer.advance(1);
                continue;
            }

            let mut window = [0u8; FRAME_SIZE];
            window.copy_from_slice(&self.buffer[..FRAME_SIZE]);
            self.buffer.advance(FRAME_SIZE);

            let outcome = FrameDecoder::decode(&window);
            match outcome {
                DecodeOutcome::Valid { distance } => {
                    tracing::trace!("frame {}: {} cm", window_hex(&window), distance);
                }
                DecodeOutcome::Invalid { reason } => {
                    tracing::warn!("frame {} rejected: {}", window_hex(&window), reason);
                }
            }
            return Some(outcome);
        }

        None
    }

    /// Get the number of buffered bytes awaiting a full window.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered bytes, losing alignment progress.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for StreamSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
