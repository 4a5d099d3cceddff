//! Protocol module - wire format, frame decoding, and stream synchronization.
//!
//! This module implements the binary protocol for the sensor link:
//! - 7-byte distance frame constants, decoding, and classification
//! - Stream synchronizer locating frame boundaries in a raw byte stream

mod synchronizer;
mod wire_format;

pub use synchronizer::StreamSynchronizer;
pub use wire_format::{
    checksum, encode_distance, window_hex, DecodeOutcome, FrameDecoder, RejectionReason,
    DISTANCE_FRAME_TYPE, DISTANCE_PAYLOAD_LEN, FRAME_SIZE, RANGE_OVERFLOW, RANGE_UNDERFLOW,
    SYNC_BYTE,
};
