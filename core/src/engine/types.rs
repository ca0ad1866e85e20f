//! engine/types.rs
//! The uniform call contract every codec adapter implements.

use crate::error::CodecError;

/// Flush directive for one compress step. Decompression never takes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// The engine may buffer internally and is free to produce no output.
    #[default]
    None,
    /// Emit all processable output and align to a byte boundary, so a
    /// decoder fed only the bytes produced so far can recover everything
    /// consumed so far.
    Sync,
    /// Emit all remaining output and signal stream completion.
    Finish,
}

/// What one engine step did with the presented regions.
///
/// The counts are reported even when `status` is a failure so the driver
/// can advance cursors by partial progress before classifying. An adapter
/// with catastrophic overflow semantics reports zero counts instead (see
/// the lz4 adapter).
#[derive(Debug)]
pub struct StepOutcome {
    /// Input bytes the engine consumed.
    pub consumed: usize,
    /// Output bytes the engine produced.
    pub produced: usize,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn working(consumed: usize, produced: usize) -> Self {
        Self {
            consumed,
            produced,
            status: StepStatus::Working,
        }
    }

    pub fn stalled(status: StepStatus) -> Self {
        Self {
            consumed: 0,
            produced: 0,
            status,
        }
    }
}

/// Native status of one step, pre-mapped onto the driver's taxonomy by
/// the adapter that understands the engine's own status domain.
#[derive(Debug)]
pub enum StepStatus {
    /// Progress made, stream still open.
    Working,
    /// The engine signalled logical end of stream.
    StreamEnd,
    /// Destination exhausted for this step/flush mode.
    BufferOverflow,
    /// Decompression only: input exhausted short of a stream boundary.
    InputBufferOverflow,
    /// Permanent failure, already expressed in taxonomy terms.
    Fatal(CodecError),
}

/// Compression side of the engine contract.
pub trait CompressEngine: Send {
    /// Feed `input` and write into `output` under `flush`.
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepOutcome;

    /// Return the engine to its freshly opened state.
    fn reset(&mut self);

    /// Upper bound on output size for compressing `input_len` bytes in
    /// one step under `flush`. An upper bound only, never optimality.
    fn bound(&self, input_len: usize, flush: FlushMode) -> usize;

    /// Whether the engine still holds state a `Finish` flush has not
    /// drained. Used to detect premature stream release.
    fn pending(&self) -> bool;
}

/// Decompression side of the engine contract.
pub trait DecompressEngine: Send {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> StepOutcome;

    fn reset(&mut self);
}
