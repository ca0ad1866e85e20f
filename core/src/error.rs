//! error.rs
//! Error taxonomy and the status classifier.
//!
//! Design notes:
//! - Every engine status funnels through `classify` so the driver has one
//!   place that decides recoverable vs permanent.
//! - `BufferOverflow` and `InputBufferOverflow` are retry signals, not
//!   failures of the stream itself; everything else ends the session.
//! - Nothing is logged here. Errors return to the immediate caller and
//!   presentation is entirely the caller's responsibility.

use thiserror::Error;

use crate::engine::StepStatus;

/// Unified error for the streaming driver and both codec adapters.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Destination too small for this step and flush mode. Recoverable:
    /// supply more destination space and call again with the same unread
    /// remainder of the source.
    #[error("destination buffer too small for this step")]
    BufferOverflow,

    /// Decompression consumed all available input without reaching a
    /// stream boundary. Recoverable: supply more compressed input. The
    /// one-shot facade loops swallow this; the raw step never does.
    #[error("all input consumed before reaching a stream boundary")]
    InputBufferOverflow,

    /// The compressed stream is invalid for the configured algorithm.
    /// Permanent for this session.
    #[error("corrupt {codec} stream: {msg}")]
    CorruptData { codec: &'static str, msg: String },

    /// Native allocation failure during open or step. Permanent.
    #[error("codec engine out of memory")]
    NoMoreMemory,

    /// The stream was released while the engine still held unconsumed
    /// internal state. Signals a caller sequencing bug.
    #[error("stream released while it still held unflushed state")]
    Unfinished,

    /// An operation was attempted outside the `Active` session state.
    /// Signals a caller sequencing bug.
    #[error("operation requires an active stream")]
    UninitializedStream,

    /// Any native status not otherwise classified, reported verbatim.
    #[error("codec {codec} internal error: {msg}")]
    Internal { codec: &'static str, msg: String },
}

/// Forward progress reported by a successfully classified step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Progress {
    /// The engine made progress; the stream is still open.
    Working,
    /// The engine signalled logical end of stream.
    StreamEnd,
}

/// Map an adapter status onto the taxonomy.
///
/// The driver advances cursors from the step outcome *before* calling
/// this, so partial progress is never lost on the error path.
pub(crate) fn classify(status: StepStatus) -> Result<Progress, CodecError> {
    match status {
        StepStatus::Working => Ok(Progress::Working),
        StepStatus::StreamEnd => Ok(Progress::StreamEnd),
        StepStatus::BufferOverflow => Err(CodecError::BufferOverflow),
        StepStatus::InputBufferOverflow => Err(CodecError::InputBufferOverflow),
        StepStatus::Fatal(e) => Err(e),
    }
}
