//! compressio
//!
//! Buffer-safe streaming driver for third-party compression codecs.
//! Two codec families behind one step/flush contract:
//! - window codec: DEFLATE family (raw / zlib / gzip framing) via flate2
//! - block codec: LZ4 blocks with a trailing 64 KiB dictionary via lz4_flex
//!
//! The driver feeds an opaque engine successive input slices, records
//! partial consumed/produced counts, classifies engine statuses into a
//! small error taxonomy, and layers three output-management strategies on
//! one raw step primitive: retry with a fresh destination, a reusable
//! window with a drain callback, and bound-sized allocation.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod error;

// Collaborators
pub mod buffer;
pub mod config;

// Codec engine adapters
pub mod engine;

// Streaming driver and one-shot facade
pub mod oneshot;
pub mod stream;

pub use buffer::ByteBuffer;
pub use config::{Codec, DeflateConfig, DeflateFormat, DeflateStrategy};
pub use engine::FlushMode;
pub use error::CodecError;
pub use stream::{Compressor, Decompressor};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::ByteBuffer;
    pub use crate::config::{Codec, DeflateConfig, DeflateFormat, DeflateStrategy};
    pub use crate::engine::FlushMode;
    pub use crate::error::CodecError;
    pub use crate::stream::{Compressor, Decompressor};
}
