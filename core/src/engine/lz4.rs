//! engine/lz4.rs
//! Block codec adapter: LZ4 blocks via lz4_flex, chained through a
//! trailing dictionary.
//!
//! Design notes:
//! - Every step is one complete, self-contained block; there is no
//!   byte-boundary flush concept and no partial block resume.
//! - Overflow is catastrophic for the block: the adapter reports zero
//!   consumed/produced so the driver leaves both cursors where they
//!   were, and the caller retries the whole block into a larger
//!   destination. This diverges from the window adapter on purpose.
//! - Later blocks reference earlier plaintext through the dictionary:
//!   the compressor retains the trailing 64 KiB of its own pre-step
//!   source history, the decompressor the trailing 64 KiB of its
//!   decompressed output, re-seeded into the engine on every block.
//! - A stream must be decompressed at the block boundaries it was
//!   compressed with. Mismatched segmentation is allowed to fail with
//!   `CorruptData`; it is never silently accepted.

use std::collections::VecDeque;

use bytes::Bytes;
use lz4_flex::block::{
    self, compress_into, compress_into_with_dict, decompress_into, decompress_into_with_dict,
    get_maximum_output_size,
};

use crate::constants::BLOCK_DICT_SIZE;
use crate::engine::types::{CompressEngine, DecompressEngine, FlushMode, StepOutcome, StepStatus};
use crate::error::CodecError;

const CODEC_NAME: &str = "lz4";

/// Trailing plaintext history seeded into the engine as an external
/// dictionary.
///
/// Eviction keeps only as many trailing buffers as sum to at least
/// 64 KiB, dropping older buffers whole once the tail covers them.
#[derive(Default)]
struct BlockHistory {
    chunks: VecDeque<Bytes>,
    total: usize,
}

impl BlockHistory {
    fn push(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.chunks.push_back(Bytes::copy_from_slice(chunk));
        self.total += chunk.len();
        while let Some(front) = self.chunks.front() {
            if self.total - front.len() >= BLOCK_DICT_SIZE {
                self.total -= front.len();
                self.chunks.pop_front();
            } else {
                break;
            }
        }
    }

    /// Contiguous dictionary view, truncated to the trailing 64 KiB so
    /// compressor and decompressor always seed identical bytes.
    fn materialize(&self) -> Vec<u8> {
        let mut dict = Vec::with_capacity(self.total);
        for chunk in &self.chunks {
            dict.extend_from_slice(chunk);
        }
        let start = dict.len().saturating_sub(BLOCK_DICT_SIZE);
        dict.split_off(start)
    }

    fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn clear(&mut self) {
        self.chunks.clear();
        self.total = 0;
    }
}

/// LZ4 block compressor.
#[derive(Default)]
pub struct Lz4CompressEngine {
    history: BlockHistory,
}

impl Lz4CompressEngine {
    pub fn open() -> Self {
        Self::default()
    }
}

impl CompressEngine for Lz4CompressEngine {
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepOutcome {
        let end = |status| {
            if matches!(status, StepStatus::Working) && flush == FlushMode::Finish {
                StepStatus::StreamEnd
            } else {
                status
            }
        };

        if input.is_empty() {
            return StepOutcome {
                consumed: 0,
                produced: 0,
                status: end(StepStatus::Working),
            };
        }

        let result = if self.history.is_empty() {
            compress_into(input, output)
        } else {
            compress_into_with_dict(input, output, &self.history.materialize())
        };

        match result {
            Ok(produced) => {
                self.history.push(input);
                StepOutcome {
                    consumed: input.len(),
                    produced,
                    status: end(StepStatus::Working),
                }
            }
            // Block compression only fails for lack of destination
            // space; the whole block is discarded and must be retried
            // from the same source into a larger destination.
            Err(_) => StepOutcome::stalled(StepStatus::BufferOverflow),
        }
    }

    fn reset(&mut self) {
        // No native reset call exists; dropping the dictionary is the
        // full reopen.
        self.history.clear();
    }

    fn bound(&self, input_len: usize, _flush: FlushMode) -> usize {
        get_maximum_output_size(input_len)
    }

    fn pending(&self) -> bool {
        // Blocks are self-contained; nothing is ever buffered.
        false
    }
}

/// LZ4 block decompressor.
#[derive(Default)]
pub struct Lz4DecompressEngine {
    history: BlockHistory,
}

impl Lz4DecompressEngine {
    pub fn open() -> Self {
        Self::default()
    }
}

impl DecompressEngine for Lz4DecompressEngine {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> StepOutcome {
        if input.is_empty() {
            return StepOutcome::stalled(StepStatus::InputBufferOverflow);
        }

        let result = if self.history.is_empty() {
            decompress_into(input, output)
        } else {
            decompress_into_with_dict(input, output, &self.history.materialize())
        };

        match result {
            Ok(produced) => {
                self.history.push(&output[..produced]);
                StepOutcome::working(input.len(), produced)
            }
            Err(block::DecompressError::OutputTooSmall { .. }) => {
                // Partial progress inside the block is discarded; retry
                // from the original unread source.
                StepOutcome::stalled(StepStatus::BufferOverflow)
            }
            Err(e) => StepOutcome::stalled(StepStatus::Fatal(CodecError::CorruptData {
                codec: CODEC_NAME,
                msg: e.to_string(),
            })),
        }
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
