//! Error types for replay decoding and configuration.
//!
//! Decoding failures are data-corruption or protocol-mismatch conditions
//! and are always reported as [`FormatError`]. A replay that decodes
//! cleanly but never finishes its course is *not* an error; see the
//! validation outcome type in `polyburn-replay`.

use std::fmt;

use thiserror::Error;

/// Which sub-stream of an encoded replay a decode error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// The run-length packed rotation-delta section.
    Delta,
    /// The run-length packed thrust section.
    Thrust,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => write!(f, "delta"),
            Self::Thrust => write!(f, "thrust"),
        }
    }
}

/// An encoded replay could not be decoded.
///
/// Decoding aborts on the first error; a partially decoded frame
/// sequence is never returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The buffer ended in the middle of a count field or chunk.
    #[error(
        "truncated {section} section at byte {offset}: needed {needed} bytes, {available} available"
    )]
    Truncated {
        /// Section being decoded when the buffer ran out.
        section: Section,
        /// Byte offset of the read that failed.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },
    /// A run-length chunk carried a count of zero.
    #[error("{section} chunk {chunk} has a zero run count")]
    ZeroRunCount {
        /// Section containing the chunk.
        section: Section,
        /// Zero-based chunk index within the section.
        chunk: u32,
    },
    /// A thrust chunk's flag byte was neither 0 nor 1.
    #[error("thrust chunk {chunk} has invalid flag byte {value:#04x}")]
    InvalidThrustFlag {
        /// Zero-based chunk index within the thrust section.
        chunk: u32,
        /// The offending byte.
        value: u8,
    },
    /// The two sections decoded to different frame counts.
    #[error("delta section decodes to {deltas} frames but thrust section to {thrusts}")]
    LengthMismatch {
        /// Frames produced by the delta section.
        deltas: usize,
        /// Frames produced by the thrust section.
        thrusts: usize,
    },
    /// Bytes remained after the thrust section.
    #[error("{remaining} trailing bytes after thrust section at byte {offset}")]
    TrailingBytes {
        /// Offset where the thrust section ended.
        offset: usize,
        /// Number of unread bytes.
        remaining: usize,
    },
}

/// Errors detected by `validate()` on tracker and reward configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The follow radius is NaN, infinite, zero, or negative.
    #[error("follow_radius must be finite and positive, got {value}")]
    InvalidRadius {
        /// The invalid value.
        value: f64,
    },
    /// A reward-shaping invariant was violated.
    #[error("invalid reward config: {reason}")]
    InvalidReward {
        /// Description of which invariant was violated.
        reason: String,
    },
}
