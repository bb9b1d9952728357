//! Replay fingerprinting.
//!
//! FNV-1a over the canonical frame encoding. Not cryptographic; it is a
//! cheap identity for deduplicating stored runs.

use half::f16;
use polyburn_core::Frame;

use crate::quantize::to_half;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Fingerprint a frame sequence.
///
/// Each frame contributes its half-precision delta bits (little-endian)
/// followed by one thrust byte. Negative zero hashes as positive zero,
/// matching how the codec stores it. Returns the FNV offset basis for
/// an empty sequence.
pub fn replay_fingerprint(frames: &[Frame]) -> u64 {
    let mut hash = FNV_OFFSET;
    for frame in frames {
        let mut bits = to_half(frame.delta);
        if bits.to_f64() == 0.0 {
            bits = f16::ZERO;
        }
        for b in bits.to_le_bytes() {
            hash = fnv1a_byte(hash, b);
        }
        hash = fnv1a_byte(hash, u8::from(frame.thrust));
    }
    hash
}
