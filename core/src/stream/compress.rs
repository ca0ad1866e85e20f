//! stream/compress.rs
//! Compression session: raw step, window strategy, allocating strategy.

use crate::buffer::ByteBuffer;
use crate::config::Codec;
use crate::engine::{CompressEngine, FlushMode};
use crate::error::{classify, CodecError, Progress};
use crate::stream::open_compress_engine;

/// One directional compression conversation.
///
/// Created `Uninitialized` by [`Codec::compressor`]; see the module docs
/// for the lifecycle contract.
pub struct Compressor {
    codec: Codec,
    engine: Option<Box<dyn CompressEngine>>,
    window: Option<ByteBuffer>,
    complete: bool,
}

impl Compressor {
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

    /// Whether a `Finish` flush has completed on the current stream.
    pub fn is_stream_complete(&self) -> bool {
        self.complete
    }

    /// Attach a reusable window buffer for [`Self::compress_windowed`].
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
        self.engine = Some(open_compress_engine(&self.codec)?);
        self.complete = false;
        Ok(())
    }

    /// One raw compression step.
    ///
    /// Presents the unread region of `src` and the unwritten region of
    /// `dst` to the engine and advances both cursors by whatever the
    /// engine actually touched, even when the step then fails - partial
    /// progress is never lost, the caller is expected to retry.
    ///
    /// `Finish` must be retried until it returns `Ok`; an intermediate
    /// call that cannot complete the stream fails with `BufferOverflow`
    /// exactly like an ordinary overflow.
    pub fn stream_compress(
        &mut self,
        src: &mut ByteBuffer,
        dst: &mut ByteBuffer,
        flush: FlushMode,
    ) -> Result<(), CodecError> {
        let engine = self.engine.as_mut().ok_or(CodecError::UninitializedStream)?;
        let outcome = engine.step(src.unread(), dst.unwritten_mut(), flush);
        src.advance_read(outcome.consumed);
        dst.advance_write(outcome.produced);
        if classify(outcome.status)? == Progress::StreamEnd {
            self.complete = true;
        }
        Ok(())
    }

    /// Upper bound on the destination size one step needs for
    /// `input_len` source bytes under `flush`.
    pub fn output_bound(&self, input_len: usize, flush: FlushMode) -> Result<usize, CodecError> {
        let engine = self.engine.as_ref().ok_or(CodecError::UninitializedStream)?;
        Ok(engine.bound(input_len, flush))
    }

    /// Allocating strategy: size a fresh destination from the engine's
    /// bound and perform one step into it.
    ///
    /// Chaining this across multiple calls is only safe when every
    /// non-final call used `Sync` flush: a sync flush leaves no residual
    /// buffered output, so the next bound stays accurate. Chaining after
    /// `None` can under-allocate and then fails with `BufferOverflow`
    /// for the caller to handle - a documented caller obligation, not a
    /// driver bug.
    pub fn compress_allocating(
        &mut self,
        src: &mut ByteBuffer,
        flush: FlushMode,
    ) -> Result<ByteBuffer, CodecError> {
        let bound = self.output_bound(src.readable_bytes(), flush)?;
        let mut dst = ByteBuffer::with_capacity(bound);
        self.stream_compress(src, &mut dst, flush)?;
        Ok(dst)
    }

    /// Window strategy: compress through the attached window, handing
    /// each full window to `drain` and reusing it.
    ///
    /// Memory stays bounded by the one window regardless of input size,
    /// which makes this the only strategy fit for unbounded streams. For
    /// the block codec the window must be large enough for one whole
    /// compressed block of the presented source.
    pub fn compress_windowed<E, F>(
        &mut self,
        src: &mut ByteBuffer,
        flush: FlushMode,
        mut drain: F,
    ) -> Result<(), E>
    where
        E: From<CodecError>,
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let mut window = self
            .window
            .take()
            .ok_or_else(|| no_window(self.codec.name()))?;
        let result = self.compress_windowed_inner(src, &mut window, flush, &mut drain);
        self.window = Some(window);
        result
    }

    fn compress_windowed_inner<E, F>(
        &mut self,
        src: &mut ByteBuffer,
        window: &mut ByteBuffer,
        flush: FlushMode,
        drain: &mut F,
    ) -> Result<(), E>
    where
        E: From<CodecError>,
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        while src.readable_bytes() > 0 {
            match self.stream_compress(src, window, FlushMode::None) {
                Ok(()) => {}
                Err(CodecError::BufferOverflow) => drain_window(window, drain)?,
                Err(e) => return Err(e.into()),
            }
        }

        if flush != FlushMode::None {
            let mut flush_src = ByteBuffer::with_capacity(0);
            loop {
                match self.stream_compress(&mut flush_src, window, flush) {
                    Ok(()) => break,
                    Err(CodecError::BufferOverflow) => drain_window(window, drain)?,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        if flush == FlushMode::Finish && window.readable_bytes() > 0 {
            drain(window.unread())?;
            window.reset_cursors();
        }
        Ok(())
    }

    /// Release the engine: `Active -> Uninitialized`.
    ///
    /// The engine is released unconditionally. If it still held state no
    /// completed `Finish` flush had drained, the call reports
    /// `Unfinished` after releasing, mirroring zlib's `deflateEnd`
    /// data-error on premature free.
    pub fn finish_stream(&mut self) -> Result<(), CodecError> {
        let engine = self.engine.take().ok_or(CodecError::UninitializedStream)?;
        let unfinished = engine.pending() && !self.complete;
        drop(engine);
        if let Some(window) = &mut self.window {
            window.reset_cursors();
        }
        self.complete = false;
        if unfinished {
            Err(CodecError::Unfinished)
        } else {
            Ok(())
        }
    }

    /// `Active -> Active`: logically finish-then-start, using the
    /// engine's cheap native reset when the codec has one.
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

fn drain_window<E, F>(window: &mut ByteBuffer, drain: &mut F) -> Result<(), E>
where
    E: From<CodecError>,
    F: FnMut(&[u8]) -> Result<(), E>,
{
    if window.readable_bytes() == 0 {
        // Draining an empty window frees nothing; the step can never
        // succeed at this window size.
        return Err(CodecError::BufferOverflow.into());
    }
    drain(window.unread())?;
    window.reset_cursors();
    Ok(())
}

fn no_window(codec: &'static str) -> CodecError {
    CodecError::Internal {
        codec,
        msg: "window strategy requires an attached window buffer".to_string(),
    }
}
