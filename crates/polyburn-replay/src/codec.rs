//! Binary encode/decode for the replay format.
//!
//! A replay is two independently run-length packed sections written back
//! to back: rotation deltas, then thrust flags. Each section starts with a
//! little-endian `u32` chunk count and re-derives its own frame count when
//! decoded; the decoder cross-checks the two. There is no overall length,
//! magic or version field.
//!
//! Delta chunks carry no tag. A chunk whose half-precision value is zero
//! is a zero run and is followed by a one-byte count; anything else is a
//! single nonzero delta. This only works because capture never produces
//! a nonzero delta that rounds to a zero half (see
//! [`CAPTURE_EPSILON`](crate::quantize::CAPTURE_EPSILON)).

use std::collections::HashSet;

use half::f16;
use polyburn_core::{Frame, FormatError, Section};
use tracing::{debug, warn};

use crate::quantize::to_half;

/// Longest run a single chunk can describe.
pub const MAX_RUN: u8 = u8::MAX;

/// Size of a section's leading chunk count.
pub const COUNT_BYTES: usize = 4;
/// Encoded size of a zero-run delta chunk.
pub const ZERO_RUN_BYTES: usize = 3;
/// Encoded size of a nonzero delta chunk.
pub const NONZERO_BYTES: usize = 2;
/// Encoded size of a thrust chunk.
pub const THRUST_RUN_BYTES: usize = 2;

/// One chunk of the delta section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeltaChunk {
    /// `n` consecutive zero deltas, `1 <= n <= 255`.
    ZeroRun(u8),
    /// A single nonzero delta.
    NonZero(f16),
}

impl DeltaChunk {
    /// Bytes this chunk occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::ZeroRun(_) => ZERO_RUN_BYTES,
            Self::NonZero(_) => NONZERO_BYTES,
        }
    }

    /// Frames this chunk expands to.
    pub fn frame_count(&self) -> usize {
        match self {
            Self::ZeroRun(n) => *n as usize,
            Self::NonZero(_) => 1,
        }
    }
}

/// One chunk of the thrust section: `count` consecutive equal flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrustRun {
    /// The repeated flag.
    pub thrust: bool,
    /// Run length, `1 <= count <= 255`.
    pub count: u8,
}

/// Size breakdown of an encoded replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Frames encoded.
    pub frames: usize,
    /// Zero-run chunks in the delta section.
    pub zero_runs: usize,
    /// Nonzero chunks in the delta section.
    pub nonzero_chunks: usize,
    /// Distinct nonzero half-precision values.
    pub unique_nonzero: usize,
    /// Chunks in the thrust section.
    pub thrust_runs: usize,
    /// Bytes in the delta section, including its count.
    pub delta_bytes: usize,
    /// Bytes in the thrust section, including its count.
    pub thrust_bytes: usize,
}

impl EncodeStats {
    /// Total encoded size.
    pub fn total_bytes(&self) -> usize {
        self.delta_bytes + self.thrust_bytes
    }
}

fn is_zero(value: f16) -> bool {
    // Matches both +0.0 and -0.0.
    value.to_f64() == 0.0
}

// ── Packing ─────────────────────────────────────────────────────

/// Split frame deltas into delta-section chunks.
///
/// Consecutive zeros merge into runs of at most [`MAX_RUN`]. Every
/// nonzero delta gets its own chunk, even when equal to its neighbour.
pub fn pack_deltas(frames: &[Frame]) -> Vec<DeltaChunk> {
    let mut chunks: Vec<DeltaChunk> = Vec::new();

    for (tick, frame) in frames.iter().enumerate() {
        let value = to_half(frame.delta);
        if !is_zero(value) {
            chunks.push(DeltaChunk::NonZero(value));
            continue;
        }
        if frame.delta != 0.0 {
            warn!(
                tick,
                delta = frame.delta,
                "nonzero delta underflows half precision, stored as zero"
            );
        }
        match chunks.last_mut() {
            Some(DeltaChunk::ZeroRun(n)) if *n < MAX_RUN => *n += 1,
            _ => chunks.push(DeltaChunk::ZeroRun(1)),
        }
    }

    chunks
}

/// Split frame thrust flags into thrust-section runs of at most [`MAX_RUN`].
pub fn pack_thrusts(frames: &[Frame]) -> Vec<ThrustRun> {
    let mut runs: Vec<ThrustRun> = Vec::new();

    for frame in frames {
        match runs.last_mut() {
            Some(run) if run.thrust == frame.thrust && run.count < MAX_RUN => run.count += 1,
            _ => runs.push(ThrustRun {
                thrust: frame.thrust,
                count: 1,
            }),
        }
    }

    runs
}

// ── Encode ──────────────────────────────────────────────────────

/// Encode frames into a replay buffer.
///
/// Frames whose deltas are exact half-precision values (everything a
/// [`FrameCapture`](crate::FrameCapture) produces) decode back
/// bit-for-bit.
pub fn encode(frames: &[Frame]) -> Vec<u8> {
    encode_with_stats(frames).0
}

/// Encode frames and report the size breakdown.
pub fn encode_with_stats(frames: &[Frame]) -> (Vec<u8>, EncodeStats) {
    let deltas = pack_deltas(frames);
    let thrusts = pack_thrusts(frames);

    let mut stats = EncodeStats {
        frames: frames.len(),
        thrust_runs: thrusts.len(),
        delta_bytes: COUNT_BYTES + deltas.iter().map(DeltaChunk::encoded_len).sum::<usize>(),
        thrust_bytes: COUNT_BYTES + thrusts.len() * THRUST_RUN_BYTES,
        ..EncodeStats::default()
    };
    let mut unique = HashSet::new();
    for chunk in &deltas {
        match chunk {
            DeltaChunk::ZeroRun(_) => stats.zero_runs += 1,
            DeltaChunk::NonZero(v) => {
                stats.nonzero_chunks += 1;
                unique.insert(v.to_bits());
            }
        }
    }
    stats.unique_nonzero = unique.len();

    let mut buf = Vec::with_capacity(stats.total_bytes());
    write_delta_section(&mut buf, &deltas);
    write_thrust_section(&mut buf, &thrusts);
    debug_assert_eq!(buf.len(), stats.total_bytes());

    debug!(
        frames = stats.frames,
        zero_runs = stats.zero_runs,
        nonzero = stats.nonzero_chunks,
        unique_nonzero = stats.unique_nonzero,
        thrust_runs = stats.thrust_runs,
        bytes = buf.len(),
        "encoded replay"
    );

    (buf, stats)
}

/// Append a delta section (count + chunks) to `buf`.
///
/// Chunk counts are written as `u32`; a section can describe at most
/// `u32::MAX` chunks.
pub fn write_delta_section(buf: &mut Vec<u8>, chunks: &[DeltaChunk]) {
    buf.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
    for chunk in chunks {
        match chunk {
            DeltaChunk::ZeroRun(n) => {
                buf.extend_from_slice(&f16::ZERO.to_le_bytes());
                buf.push(*n);
            }
            DeltaChunk::NonZero(v) => buf.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

/// Append a thrust section (count + chunks) to `buf`.
pub fn write_thrust_section(buf: &mut Vec<u8>, runs: &[ThrustRun]) {
    buf.extend_from_slice(&(runs.len() as u32).to_le_bytes());
    for run in runs {
        buf.push(u8::from(run.thrust));
        buf.push(run.count);
    }
}

// ── Decode ──────────────────────────────────────────────────────

/// Bounds-checked little-endian reader over one section of a buffer.
struct SectionReader<'a> {
    buf: &'a [u8],
    offset: usize,
    section: Section,
}

impl<'a> SectionReader<'a> {
    fn new(buf: &'a [u8], offset: usize, section: Section) -> Self {
        Self {
            buf,
            offset,
            section,
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let available = self.buf.len().saturating_sub(self.offset);
        let bytes = self
            .buf
            .get(self.offset..self.offset + N)
            .ok_or(FormatError::Truncated {
                section: self.section,
                offset: self.offset,
                needed: N,
                available,
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.offset += N;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take::<1>()?[0])
    }

    fn read_u32_le(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    fn read_f16_le(&mut self) -> Result<f16, FormatError> {
        Ok(f16::from_le_bytes(self.take::<2>()?))
    }
}

/// Decode the delta section starting at the beginning of `buf`.
///
/// Returns the expanded deltas and the offset just past the section.
pub fn decode_delta_section(buf: &[u8]) -> Result<(Vec<f64>, usize), FormatError> {
    let mut r = SectionReader::new(buf, 0, Section::Delta);
    let chunk_count = r.read_u32_le()?;
    let mut deltas = Vec::new();

    for chunk in 0..chunk_count {
        let value = r.read_f16_le()?;
        if is_zero(value) {
            let run = r.read_u8()?;
            if run == 0 {
                return Err(FormatError::ZeroRunCount {
                    section: Section::Delta,
                    chunk,
                });
            }
            deltas.extend(std::iter::repeat_n(0.0, run as usize));
        } else {
            deltas.push(value.to_f64());
        }
    }

    Ok((deltas, r.offset))
}

/// Decode the thrust section starting at `offset`.
///
/// Returns the expanded flags and the offset just past the section.
pub fn decode_thrust_section(
    buf: &[u8],
    offset: usize,
) -> Result<(Vec<bool>, usize), FormatError> {
    let mut r = SectionReader::new(buf, offset, Section::Thrust);
    let chunk_count = r.read_u32_le()?;
    let mut thrusts = Vec::new();

    for chunk in 0..chunk_count {
        let flag = r.read_u8()?;
        let run = r.read_u8()?;
        let thrust = match flag {
            0 => false,
            1 => true,
            value => return Err(FormatError::InvalidThrustFlag { chunk, value }),
        };
        if run == 0 {
            return Err(FormatError::ZeroRunCount {
                section: Section::Thrust,
                chunk,
            });
        }
        thrusts.extend(std::iter::repeat_n(thrust, run as usize));
    }

    Ok((thrusts, r.offset))
}

/// Decode a replay buffer into frames.
///
/// # Errors
///
/// Returns [`FormatError`] if either section is truncated or carries a
/// zero run count or invalid flag, if bytes remain after the thrust
/// section, or if the two sections expand to different frame counts.
pub fn decode(buf: &[u8]) -> Result<Vec<Frame>, FormatError> {
    let (deltas, offset) = decode_delta_section(buf)?;
    let (thrusts, end) = decode_thrust_section(buf, offset)?;

    if end != buf.len() {
        return Err(FormatError::TrailingBytes {
            offset: end,
            remaining: buf.len() - end,
        });
    }
    if deltas.len() != thrusts.len() {
        return Err(FormatError::LengthMismatch {
            deltas: deltas.len(),
            thrusts: thrusts.len(),
        });
    }

    Ok(deltas
        .into_iter()
        .zip(thrusts)
        .map(|(delta, thrust)| Frame::new(delta, thrust))
        .collect())
}
