//! Input capture, binary replay codec and deterministic replay validation.
//!
//! A live session records one [`Frame`](polyburn_core::Frame) per tick
//! through a [`FrameCapture`], which quantizes every rotation change to
//! half precision and hands the quantized absolute rotation back to the
//! live simulation. The frames are packed into a compact byte buffer by
//! [`encode`], and any other party can [`decode`] that buffer and
//! [`replay`] it through a fresh simulation to reconstruct the exact same
//! run.
//!
//! # Architecture
//!
//! - [`quantize`] rounds a value to the nearest half-precision float
//! - [`FrameCapture`] / [`ReplayRecorder`] build the frame log during play
//! - [`encode`] / [`decode`] implement the two-section run-length format
//! - [`replay`] / [`replay_with`] re-drive a simulation from frames
//! - [`validate`] turns a replayed run into an accept/reject decision
//! - [`submit_run`] applies the personal-best policy against a [`RunStore`]
//!
//! # Format
//!
//! ```text
//! EncodedReplay := DeltaSection ThrustSection
//! DeltaSection  := u32(chunkCount) (ZeroRun | NonZero)*
//! ZeroRun       := f16(0.0) u8(runCount)         ; 3 bytes
//! NonZero       := f16(value)                    ; 2 bytes
//! ThrustSection := u32(chunkCount) (u8(0|1) u8(runCount))*
//! ```
//!
//! All integers and floats are little-endian. There is no header, magic
//! or version byte; the buffer's length is discovered by parsing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capture;
pub mod codec;
pub mod hash;
pub mod leaderboard;
pub mod quantize;
pub mod replayer;
pub mod validate;

pub use capture::{FrameCapture, ReplayRecorder};
pub use codec::{decode, encode, encode_with_stats, DeltaChunk, EncodeStats, ThrustRun};
pub use hash::replay_fingerprint;
pub use leaderboard::{
    is_improvement, submit_run, PlayerId, RunKey, RunStore, StoredRun, SubmitError, Submission,
};
pub use quantize::{canonical_delta, quantize, CAPTURE_EPSILON};
pub use replayer::{absolute_inputs, replay, replay_with, AbsoluteInputs};
pub use validate::{validate, validate_encoded, Validation, ValidationRejected};
