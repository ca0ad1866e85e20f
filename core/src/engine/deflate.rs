//! engine/deflate.rs
//! Window codec adapter: DEFLATE family via flate2's low-level stream
//! objects (`Compress`/`Decompress`).
//!
//! Design notes:
//! - Consumed/produced counts come from `total_in`/`total_out` deltas, so
//!   partial progress survives a failing step and the driver can advance
//!   cursors before classifying.
//! - Framing selects the constructor: raw and zlib share
//!   `new_with_window_bits` (header flag negates or keeps the exponent),
//!   gzip has its own constructor. Derived once at open.
//! - A `Finish` step that does not reach `StreamEnd` is reported as
//!   `BufferOverflow`: the caller retries exactly as for ordinary
//!   overflow, which unifies the two failure paths.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::config::{DeflateConfig, DeflateFormat};
use crate::engine::types::{CompressEngine, DecompressEngine, FlushMode, StepOutcome, StepStatus};
use crate::error::CodecError;

const CODEC_NAME: &str = "deflate";

fn flush_compress(flush: FlushMode) -> FlushCompress {
    match flush {
        FlushMode::None => FlushCompress::None,
        FlushMode::Sync => FlushCompress::Sync,
        FlushMode::Finish => FlushCompress::Finish,
    }
}

fn compression_level(level: i32) -> Compression {
    if level < 0 {
        Compression::default()
    } else {
        Compression::new(level as u32)
    }
}

/// Deflate compressor stream state.
pub struct DeflateCompressEngine {
    ctx: Compress,
    format: DeflateFormat,
    seen_end: bool,
}

impl DeflateCompressEngine {
    pub fn open(config: &DeflateConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let level = compression_level(config.level);
        let ctx = match config.format {
            DeflateFormat::Gzip => Compress::new_gzip(level, config.window_log2),
            DeflateFormat::Zlib => Compress::new_with_window_bits(level, true, config.window_log2),
            DeflateFormat::Raw => Compress::new_with_window_bits(level, false, config.window_log2),
        };
        Ok(Self {
            ctx,
            format: config.format,
            seen_end: false,
        })
    }
}

impl CompressEngine for DeflateCompressEngine {
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepOutcome {
        // Nothing to feed and nothing to flush: deflate would report
        // Z_BUF_ERROR for the no-op, which is not an overflow.
        if input.is_empty() && flush == FlushMode::None {
            return StepOutcome::working(0, 0);
        }

        let before_in = self.ctx.total_in();
        let before_out = self.ctx.total_out();
        let result = self.ctx.compress(input, output, flush_compress(flush));
        let consumed = (self.ctx.total_in() - before_in) as usize;
        let produced = (self.ctx.total_out() - before_out) as usize;

        let status = match result {
            Err(e) => StepStatus::Fatal(CodecError::Internal {
                codec: CODEC_NAME,
                msg: e.to_string(),
            }),
            Ok(Status::StreamEnd) => {
                self.seen_end = true;
                StepStatus::StreamEnd
            }
            // No forward progress possible without more destination space.
            Ok(Status::BufError) => StepStatus::BufferOverflow,
            Ok(Status::Ok) => {
                if flush == FlushMode::Finish {
                    // Finish returned without StreamEnd: the destination
                    // filled up mid-trailer. Same retry contract.
                    StepStatus::BufferOverflow
                } else if produced == output.len()
                    && (consumed < input.len() || flush == FlushMode::Sync)
                {
                    // Destination exhausted with input left over, or a
                    // sync flush that could not confirm completion
                    // (complete iff the engine leaves destination space).
                    StepStatus::BufferOverflow
                } else {
                    StepStatus::Working
                }
            }
        };

        StepOutcome {
            consumed,
            produced,
            status,
        }
    }

    fn reset(&mut self) {
        // deflateReset keeps the configured framing and window.
        self.ctx.reset();
        self.seen_end = false;
    }

    fn bound(&self, input_len: usize, flush: FlushMode) -> usize {
        // zlib's deflateBound worst case for stored blocks, plus framing
        // overhead and the empty stored block a sync flush appends.
        let base = input_len + (input_len >> 12) + (input_len >> 14) + (input_len >> 25) + 13;
        let framing = match self.format {
            DeflateFormat::Raw => 0,
            DeflateFormat::Zlib => 6,
            DeflateFormat::Gzip => 18,
        };
        let sync = if flush == FlushMode::Sync { 5 } else { 0 };
        base + framing + sync
    }

    fn pending(&self) -> bool {
        self.ctx.total_in() > 0 && !self.seen_end
    }
}

/// Inflate stream state.
pub struct DeflateDecompressEngine {
    ctx: Decompress,
    format: DeflateFormat,
    window_log2: u8,
}

impl DeflateDecompressEngine {
    pub fn open(config: &DeflateConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let ctx = Self::open_ctx(config.format, config.window_log2);
        Ok(Self {
            ctx,
            format: config.format,
            window_log2: config.window_log2,
        })
    }

    fn open_ctx(format: DeflateFormat, window_log2: u8) -> Decompress {
        match format {
            DeflateFormat::Gzip => Decompress::new_gzip(window_log2),
            DeflateFormat::Zlib => Decompress::new_with_window_bits(true, window_log2),
            DeflateFormat::Raw => Decompress::new_with_window_bits(false, window_log2),
        }
    }
}

impl DecompressEngine for DeflateDecompressEngine {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> StepOutcome {
        let before_in = self.ctx.total_in();
        let before_out = self.ctx.total_out();
        let result = self.ctx.decompress(input, output, FlushDecompress::None);
        let consumed = (self.ctx.total_in() - before_in) as usize;
        let produced = (self.ctx.total_out() - before_out) as usize;

        let status = match result {
            // inflate data errors mean the stream does not match the
            // configured algorithm or was damaged in transit.
            Err(e) => StepStatus::Fatal(CodecError::CorruptData {
                codec: CODEC_NAME,
                msg: e.to_string(),
            }),
            Ok(Status::StreamEnd) => StepStatus::StreamEnd,
            Ok(Status::BufError) => {
                if output.is_empty() {
                    // No destination space at all; pending output may
                    // still be buffered inside the engine.
                    StepStatus::BufferOverflow
                } else if input.is_empty() {
                    // Consumed everything available without reaching the
                    // logical end of the compressed stream.
                    StepStatus::InputBufferOverflow
                } else {
                    StepStatus::BufferOverflow
                }
            }
            // A step that fills the destination exactly is still Ok: the
            // leftover input may be nothing but the frame trailer, which
            // inflate consumes without output space. Genuine overflow
            // surfaces as BufError on the caller's next probe.
            Ok(Status::Ok) => StepStatus::Working,
        };

        StepOutcome {
            consumed,
            produced,
            status,
        }
    }

    fn reset(&mut self) {
        match self.format {
            // flate2 models the gzip wrapper only at construction time.
            DeflateFormat::Gzip => self.ctx = Self::open_ctx(self.format, self.window_log2),
            DeflateFormat::Zlib => self.ctx.reset(true),
            DeflateFormat::Raw => self.ctx.reset(false),
        }
    }
}
