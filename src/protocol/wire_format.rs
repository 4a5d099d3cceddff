//! Wire format constants and frame decoding.
//!
//! Implements the 7-byte distance frame:
//! ```text
//! ┌───────────┬──────┬────────┬───────────┬──────────┐
//! │ Sync      │ Type │ Length │ Distance  │ Checksum │
//! │ 2 bytes   │ 1 B  │ 1 B    │ 2 bytes   │ 1 B      │
//! │ 0x5A 0x5A │ 0x45 │ 0x02   │ uint16 BE │ sum & FF │
//! └───────────┴──────┴────────┴───────────┴──────────┘
//! ```
//!
//! The checksum is the low 8 bits of the sum of bytes 0..=5. The distance is
//! in centimeters, Big Endian. The sensor reports its underflow/overflow
//! conditions in-band as the sentinel readings 20 and 720; those frames are
//! well-formed but carry no usable measurement.

use serde::{Deserialize, Serialize};

/// Frame size in bytes (fixed, exactly 7).
pub const FRAME_SIZE: usize = 7;

/// Sync marker byte; a frame starts with two of these.
pub const SYNC_BYTE: u8 = 0x5A;

/// Type code identifying a distance frame.
pub const DISTANCE_FRAME_TYPE: u8 = 0x45;

/// Declared payload length for a distance frame (two distance bytes).
pub const DISTANCE_PAYLOAD_LEN: u8 = 0x02;

/// Sensor underflow sentinel (cm).
pub const RANGE_UNDERFLOW: u16 = 20;

/// Sensor overflow sentinel (cm).
pub const RANGE_OVERFLOW: u16 = 720;

/// Why a consumed window was rejected.
///
/// The taxonomy is flat and total: together with a valid reading these five
/// reasons cover every possible 7-byte window, so operators can tell stream
/// corruption (`BadMarker`, `ChecksumMismatch`), protocol mismatches
/// (`WrongType`, `BadLength`), and sensor range conditions (`OutOfRange`)
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The window does not start with the two sync marker bytes.
    BadMarker,
    /// The type code is not the distance frame type.
    WrongType,
    /// The declared payload length is not the expected constant.
    BadLength,
    /// The checksum byte does not match the sum of the preceding bytes.
    ChecksumMismatch,
    /// The reading equals a range sentinel; the frame is well-formed but
    /// carries no usable measurement.
    OutOfRange,
}

impl RejectionReason {
    /// Short human-readable label used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadMarker => "bad sync marker",
            Self::WrongType => "not a distance frame",
            Self::BadLength => "unexpected payload length",
            Self::ChecksumMismatch => "checksum mismatch",
            Self::OutOfRange => "reading out of range",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one consumed 7-byte window.
///
/// Exactly one outcome is produced per window, in stream order. Both variants
/// are reported to the caller; invalid windows are never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeOutcome {
    /// A well-formed frame carrying a usable distance in centimeters.
    Valid { distance: u16 },
    /// A rejected window with the first failing check.
    Invalid { reason: RejectionReason },
}

impl DecodeOutcome {
    /// Check if this outcome carries a usable measurement.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get the measured distance, if any.
    #[inline]
    pub fn distance(&self) -> Option<u16> {
        match self {
            Self::Valid { distance } => Some(*distance),
            Self::Invalid { .. } => None,
        }
    }
}

/// Compute the 8-bit wrapping checksum over a byte slice.
///
/// For a frame this is taken over bytes 0..=5 and compared to byte 6.
#[inline]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// Encode a distance reading as a complete, well-formed frame.
///
/// # Example
///
/// ```
/// use rangewire::protocol::{encode_distance, FrameDecoder, DecodeOutcome};
///
/// let frame = encode_distance(137);
/// assert_eq!(FrameDecoder::decode(&frame), DecodeOutcome::Valid { distance: 137 });
/// ```
pub fn encode_distance(distance: u16) -> [u8; FRAME_SIZE] {
    let mut frame = [0u8; FRAME_SIZE];
    frame[0] = SYNC_BYTE;
    frame[1] = SYNC_BYTE;
    frame[2] = DISTANCE_FRAME_TYPE;
    frame[3] = DISTANCE_PAYLOAD_LEN;
    frame[4..6].copy_from_slice(&distance.to_be_bytes());
    frame[6] = checksum(&frame[..6]);
    frame
}

/// Render a byte window as space-separated uppercase hex.
///
/// Produces the form used in frame diagnostics, e.g. `"5A 5A 45 02 00 0A 05"`.
pub fn window_hex(window: &[u8]) -> String {
    window
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stateless decoder for candidate 7-byte windows.
///
/// Pure, total, and deterministic: every window maps to exactly one
/// [`DecodeOutcome`] and the decoder never fails hard. Checks run in strict
/// order (marker, type, length, checksum, range) and the first violation wins.
pub struct FrameDecoder;

impl FrameDecoder {
    /// Classify a candidate window.
    pub fn decode(window: &[u8; FRAME_SIZE]) -> DecodeOutcome {
        if window[0] != SYNC_BYTE || window[1] != SYNC_BYTE {
            return DecodeOutcome::Invalid {
                reason: RejectionReason::BadMarker,
            };
        }

        if window[2] != DISTANCE_FRAME_TYPE {
            return DecodeOutcome::Invalid {
                reason: RejectionReason::WrongType,
            };
        }

        if window[3] != DISTANCE_PAYLOAD_LEN {
            return DecodeOutcome::Invalid {
                reason: RejectionReason::BadLength,
            };
        }

        if checksum(&window[..6]) != window[6] {
            return DecodeOutcome::Invalid {
                reason: RejectionReason::ChecksumMismatch,
            };
        }

        let distance = u16::from_be_bytes([window[4], window[5]]);
        if distance == RANGE_UNDERFLOW || distance == RANGE_OVERFLOW {
            return DecodeOutcome::Invalid {
                reason: RejectionReason::OutOfRange,
            };
        }

        DecodeOutcome::Valid { distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_frame() {
        // 10 cm: 5A+5A+45+02+00+0A = 0x105, low byte 0x05
        let window = [0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0x05];
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Valid { distance: 10 }
        );
    }

    #[test]
    fn test_decode_underflow_sentinel() {
        let window = [0x5A, 0x5A, 0x45, 0x02, 0x00, 0x14, 0x0F];
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::OutOfRange
            }
        );
    }

    #[test]
    fn test_decode_overflow_sentinel() {
        // 720 = 0x02D0
        let window = [0x5A, 0x5A, 0x45, 0x02, 0x02, 0xD0, 0xCD];
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::OutOfRange
            }
        );
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let window = [0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0xFF];
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::ChecksumMismatch
            }
        );
    }

    #[test]
    fn test_decode_bad_marker_either_byte() {
        let mut window = encode_distance(100);
        window[0] = 0x00;
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::BadMarker
            }
        );

        let mut window = encode_distance(100);
        window[1] = 0x00;
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::BadMarker
            }
        );
    }

    #[test]
    fn test_decode_wrong_type() {
        let mut window = encode_distance(100);
        window[2] = 0x46;
        window[6] = checksum(&window[..6]);
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::WrongType
            }
        );
    }

    #[test]
    fn test_decode_bad_length() {
        let mut window = encode_distance(100);
        window[3] = 0x04;
        window[6] = checksum(&window[..6]);
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::BadLength
            }
        );
    }

    #[test]
    fn test_first_failing_check_wins() {
        // Wrong type AND stale checksum: the type check fires first.
        let mut window = encode_distance(100);
        window[2] = 0x99;
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::WrongType
            }
        );

        // Bad marker beats everything else.
        let window = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(
            FrameDecoder::decode(&window),
            DecodeOutcome::Invalid {
                reason: RejectionReason::BadMarker
            }
        );
    }

    #[test]
    fn test_distance_is_big_endian() {
        let frame = encode_distance(0x0102);
        assert_eq!(frame[4], 0x01);
        assert_eq!(frame[5], 0x02);
        assert_eq!(
            FrameDecoder::decode(&frame),
            DecodeOutcome::Valid { distance: 0x0102 }
        );
    }

    #[test]
    fn test_checksum_wraps_at_eight_bits() {
        assert_eq!(checksum(&[0xFF, 0x01]), 0x00);
        assert_eq!(checksum(&[0xFF, 0xFF]), 0xFE);
        assert_eq!(checksum(&[]), 0x00);

        // A large distance forces the sum past 255.
        let frame = encode_distance(0xFEFE);
        assert_eq!(
            FrameDecoder::decode(&frame),
            DecodeOutcome::Valid { distance: 0xFEFE }
        );
    }

    #[test]
    fn test_encode_distance_layout() {
        let frame = encode_distance(10);
        assert_eq!(frame, [0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0x05]);
    }

    #[test]
    fn test_outcome_accessors() {
        let valid = DecodeOutcome::Valid { distance: 42 };
        assert!(valid.is_valid());
        assert_eq!(valid.distance(), Some(42));

        let invalid = DecodeOutcome::Invalid {
            reason: RejectionReason::BadMarker,
        };
        assert!(!invalid.is_valid());
        assert_eq!(invalid.distance(), None);
    }

    #[test]
    fn test_window_hex_format() {
        let window = [0x5A, 0x5A, 0x45, 0x02, 0x00, 0x0A, 0x05];
        assert_eq!(window_hex(&window), "5A 5A 45 02 00 0A 05");
        assert_eq!(window_hex(&[]), "");
    }

    #[test]
    fn test_rejection_reason_labels() {
        assert_eq!(RejectionReason::BadMarker.as_str(), "bad sync marker");
        assert_eq!(
            RejectionReason::ChecksumMismatch.to_string(),
            "checksum mismatch"
        );
    }
}
