//! stream/decompress.rs
//! Decompression session: raw step, window strategy, auto-growing
//! one-shot helper.

use crate::buffer::ByteBuffer;
use crate::config::Codec;
use crate::constants::{GROW_INITIAL_DEN, GROW_INITIAL_NUM, GROW_MIN_ALLOC};
use crate::engine::DecompressEngine;
use crate::error::{classify, CodecError, Progress};
use crate::stream::open_decompress_engine;

/// One directional decompression conversation.
///
/// Created `Uninitialized` by [`Codec::decompressor`]; see the module
/// docs for the lifecycle contract. Decompression takes no flush mode.
pub struct Decompressor {
    codec: Codec,
    engine: Option<Box<dyn DecompressEngine>>,
    window: Option<ByteBuffer>,
    complete: bool,
}

impl Decompressor {
    pub(crate) fn new(codec: Codec) -> Self {
        Self {
            codec,
            engine: None,
            window: None,
            complete: false,
        }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Whether the engine has signalled logical end of stream.
    ///
    /// Best-effort: some byte sequences never yield a definitive
    /// end-of-stream status even though all output was produced, so the
    /// helper loops treat source exhaustion as sufficient termination
    /// and use this only as confirmation.
    pub fn is_stream_complete(&self) -> bool {
        self.complete
    }

    /// Attach a reusable window buffer for [`Self::decompress_windowed`].
    pub fn set_window(&mut self, window: ByteBuffer) {
        self.window = Some(window);
    }

    /// Attach a freshly allocated window of `capacity` bytes.
    pub fn attach_window(&mut self, capacity: usize) {
        self.window = Some(ByteBuffer::with_capacity(capacity));
    }

    pub fn take_window(&mut self) -> Option<ByteBuffer> {
        self.window.take()
    }

    /// Allocate the engine: `Uninitialized -> Active`.
    pub fn start_stream(&mut self) -> Result<(), CodecError> {
        if self.engine.is_some() {
            return Err(CodecError::UninitializedStream);
        }
        self.engine = Some(open_decompress_engine(&self.codec)?);
        self.complete = false;
        Ok(())
    }

    /// One raw decompression step; cursor handling as on the compress
    /// side: both cursors advance by actual progress even on failure.
    ///
    /// May fail with `InputBufferOverflow` when the engine consumed
    /// everything available without reaching the logical end of the
    /// compressed stream. That only means "supply more compressed
    /// input"; the one-shot helpers swallow it, the raw step never does.
    pub fn stream_decompress(
        &mut self,
        src: &mut ByteBuffer,
        dst: &mut ByteBuffer,
    ) -> Result<(), CodecError> {
        let engine = self.engine.as_mut().ok_or(CodecError::UninitializedStream)?;
        let outcome = engine.step(src.unread(), dst.unwritten_mut());
        src.advance_read(outcome.consumed);
        dst.advance_write(outcome.produced);
        if classify(outcome.status)? == Progress::StreamEnd {
            self.complete = true;
        }
        Ok(())
    }

    /// Window strategy: decompress through the attached window, handing
    /// each full window to `drain` and reusing it, then draining any
    /// residue at the end.
    pub fn decompress_windowed<E, F>(&mut self, src: &mut ByteBuffer, mut drain: F) -> Result<(), E>
    where
        E: From<CodecError>,
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let mut window = self
            .window
            .take()
            .ok_or_else(|| no_window(self.codec.name()))?;
        let result = self.decompress_windowed_inner(src, &mut window, &mut drain);
        self.window = Some(window);
        result
    }

    fn decompress_windowed_inner<E, F>(
        &mut self,
        src: &mut ByteBuffer,
        window: &mut ByteBuffer,
        drain: &mut F,
    ) -> Result<(), E>
    where
        E: From<CodecError>,
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        // Keep probing past source exhaustion until the engine reports
        // it is drained (InputBufferOverflow) or signals end of stream;
        // a step that fills the window exactly can leave output pending.
        while !self.complete {
            match self.stream_decompress(src, window) {
                Ok(()) => {}
                Err(CodecError::BufferOverflow) => {
                    if window.readable_bytes() == 0 {
                        return Err(CodecError::BufferOverflow.into());
                    }
                    drain(window.unread())?;
                    window.reset_cursors();
                }
                Err(CodecError::InputBufferOverflow) => break,
                Err(e) => return Err(e.into()),
            }
        }
        if window.readable_bytes() > 0 {
            drain(window.unread())?;
            window.reset_cursors();
        }
        Ok(())
    }

    /// Auto-growing one-shot helper for when the final size cannot be
    /// predicted.
    ///
    /// Starts at 3/2 of the compressed input size and doubles on every
    /// overflow, never allocating beyond `max_size`; needing more than
    /// `max_size` fails with `BufferOverflow` instead of looping
    /// unboundedly. Filled buffers accumulate and are concatenated once
    /// at the end; a single-buffer run skips the copy.
    pub fn decompress_growing(
        &mut self,
        src: &mut ByteBuffer,
        max_size: usize,
    ) -> Result<ByteBuffer, CodecError> {
        if self.engine.is_none() {
            return Err(CodecError::UninitializedStream);
        }

        let initial = src.readable_bytes() * GROW_INITIAL_NUM / GROW_INITIAL_DEN;
        let mut size = initial.max(GROW_MIN_ALLOC).min(max_size.max(1));
        let mut filled: Vec<ByteBuffer> = Vec::new();

        loop {
            let mut dst = ByteBuffer::with_capacity(size);
            // As in the windowed loop, probe past source exhaustion so
            // pending engine output is never stranded.
            let overflowed = loop {
                if self.complete {
                    break false;
                }
                match self.stream_decompress(src, &mut dst) {
                    Ok(()) => {}
                    Err(CodecError::InputBufferOverflow) => break false,
                    Err(CodecError::BufferOverflow) => break true,
                    Err(e) => return Err(e),
                }
            };

            if dst.readable_bytes() > 0 {
                filled.push(dst);
            }
            if !overflowed {
                break;
            }
            if size >= max_size {
                return Err(CodecError::BufferOverflow);
            }
            size = (size * 2).min(max_size);
        }

        Ok(concat(filled))
    }

    /// Release the engine: `Active -> Uninitialized`.
    ///
    /// Unlike the compress side this never reports `Unfinished`: the
    /// inflate-family release call has no flush-before-release check,
    /// and abandoning a partially decoded stream is an ordinary caller
    /// decision.
    pub fn finish_stream(&mut self) -> Result<(), CodecError> {
        self.engine.take().ok_or(CodecError::UninitializedStream)?;
        if let Some(window) = &mut self.window {
            window.reset_cursors();
        }
        self.complete = false;
        Ok(())
    }

    /// `Active -> Active`, cheap native reset where the codec has one.
    pub fn reset_stream(&mut self) -> Result<(), CodecError> {
        let engine = self.engine.as_mut().ok_or(CodecError::UninitializedStream)?;
        engine.reset();
        self.complete = false;
        if let Some(window) = &mut self.window {
            window.reset_cursors();
        }
        Ok(())
    }
}

fn concat(mut filled: Vec<ByteBuffer>) -> ByteBuffer {
    if filled.len() == 1 {
        return filled.swap_remove(0);
    }
    let total: usize = filled.iter().map(ByteBuffer::readable_bytes).sum();
    let mut out = ByteBuffer::with_capacity(total);
    for mut part in filled {
        out.append_from(&mut part);
    }
    out
}

fn no_window(codec: &'static str) -> CodecError {
    CodecError::Internal {
        codec,
        msg: "window strategy requires an attached window buffer".to_string(),
    }
}
