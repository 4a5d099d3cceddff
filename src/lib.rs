//! # rangewire
//!
//! Frame-synchronizing decoder for serial ultrasonic range sensors.
//!
//! The sensor emits a continuous stream of fixed 7-byte binary frames:
//!
//! ```text
//! ┌───────────┬──────┬────────┬───────────┬──────────┐
//! │ Sync      │ Type │ Length │ Distance  │ Checksum │
//! │ 0x5A 0x5A │ 0x45 │ 0x02   │ uint16 BE │ sum & FF │
//! └───────────┴──────┴────────┴───────────┴──────────┘
//! ```
//!
//! The stream may begin mid-frame and may carry corruption. The
//! [`StreamSynchronizer`] locates frame boundaries (sliding a single byte on
//! a marker mismatch, consuming a full window on a match) and classifies
//! every consumed window as a measurement or a diagnosable rejection. The
//! underlying [`FrameDecoder`] is pure and total: no window fails hard.
//!
//! ## Architecture
//!
//! - **Core** (synchronous): [`FrameDecoder`] + [`StreamSynchronizer`], fed
//!   explicitly via [`StreamSynchronizer::feed`]
//! - **Session** (async): [`SensorReader`] pumps any `AsyncRead` byte source
//!   through a synchronizer on a spawned task
//!
//! ## Example
//!
//! ```
//! use rangewire::{DecodeOutcome, StreamSynchronizer};
//!
//! let mut sync = StreamSynchronizer::new();
//!
//! // One leading garbage byte, then a frame carrying 10 cm
//! let outcomes = sync.feed(&[0x00, 0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0x05]);
//! assert_eq!(outcomes, vec![DecodeOutcome::Valid { distance: 10 }]);
//! ```

pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

pub use error::RangewireError;
pub use protocol::{DecodeOutcome, FrameDecoder, RejectionReason, StreamSynchronizer};
pub use session::{ReaderConfig, SensorReader};
