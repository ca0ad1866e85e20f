//! oneshot.rs
//! Convenience operations for callers holding a single complete buffer.
//!
//! Everything here is built purely from the session operations in
//! `stream`: open a session, run the steps, release the engine, even on
//! the error path.

use crate::buffer::ByteBuffer;
use crate::config::Codec;
use crate::engine::FlushMode;
use crate::error::CodecError;

impl Codec {
    /// Compress `src` into the caller-supplied `dst` in one pass.
    ///
    /// Fails with `BufferOverflow` if `dst` cannot hold the whole
    /// stream; use a destination sized by the engine bound (or
    /// [`Codec::compress_to_buffer`]) to rule that out.
    pub fn compress(&self, src: &mut ByteBuffer, dst: &mut ByteBuffer) -> Result<(), CodecError> {
        let mut session = self.compressor();
        session.start_stream()?;
        let result = session.stream_compress(src, dst, FlushMode::Finish);
        finish_after(session.finish_stream(), result)
    }

    /// Compress `src` into a freshly allocated buffer sized by the
    /// engine's output bound.
    pub fn compress_to_buffer(&self, src: &mut ByteBuffer) -> Result<ByteBuffer, CodecError> {
        let mut session = self.compressor();
        session.start_stream()?;
        let result = session.compress_allocating(src, FlushMode::Finish);
        finish_after(session.finish_stream(), result)
    }

    /// Decompress `src` into the caller-supplied `dst` in one pass.
    ///
    /// The loop ends when the source is exhausted or the engine signals
    /// end of stream; `InputBufferOverflow` from a truncated trailing
    /// step is swallowed here because it only means "supply more
    /// compressed input", which a one-shot caller does not have.
    pub fn decompress(&self, src: &mut ByteBuffer, dst: &mut ByteBuffer) -> Result<(), CodecError> {
        let mut session = self.decompressor();
        session.start_stream()?;
        // Loop past source exhaustion: a step that fills the destination
        // exactly can leave output pending inside the engine, and only a
        // further probe (which then reports InputBufferOverflow) proves
        // the engine is drained.
        let mut result = Ok(());
        while !session.is_stream_complete() {
            match session.stream_decompress(src, dst) {
                Ok(()) => {}
                Err(CodecError::InputBufferOverflow) => break,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        finish_after(session.finish_stream(), result)
    }

    /// Decompress `src` into a buffer grown on demand, never allocating
    /// beyond `max_size`.
    pub fn decompress_growing(
        &self,
        src: &mut ByteBuffer,
        max_size: usize,
    ) -> Result<ByteBuffer, CodecError> {
        let mut session = self.decompressor();
        session.start_stream()?;
        let result = session.decompress_growing(src, max_size);
        finish_after(session.finish_stream(), result)
    }
}

/// Keep the step error when both the steps and the release failed; the
/// release still ran either way.
fn finish_after<T>(
    finished: Result<(), CodecError>,
    result: Result<T, CodecError>,
) -> Result<T, CodecError> {
    match (result, finished) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), _) => Err(e),
    }
}
