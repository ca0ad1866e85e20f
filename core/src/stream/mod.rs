//! stream/mod.rs
//! The streaming driver: session state machines and the output
//! management strategies layered on the raw step primitive.
//!
//! Session lifecycle: `Uninitialized -> start_stream -> Active ->
//! finish_stream -> Uninitialized` (a finished session is immediately
//! reusable). `reset_stream` is `Active -> Active`. Every operation
//! besides `start_stream` fails with `UninitializedStream` outside
//! `Active`.
//!
//! Concurrency: one session serves one logical stream, synchronously;
//! `&mut self` prevents concurrent calls into a session, and independent
//! sessions share no state. Dropping a session releases the engine as a
//! safety net, but the documented protocol is exactly one
//! `finish_stream` per successful `start_stream` - the compress side
//! reports `Unfinished` there when unflushed state would be discarded.

pub mod compress;
pub mod decompress;

pub use compress::Compressor;
pub use decompress::Decompressor;

use crate::config::Codec;
use crate::engine::deflate::{DeflateCompressEngine, DeflateDecompressEngine};
use crate::engine::lz4::{Lz4CompressEngine, Lz4DecompressEngine};
use crate::engine::{CompressEngine, DecompressEngine};
use crate::error::CodecError;

pub(crate) fn open_compress_engine(codec: &Codec) -> Result<Box<dyn CompressEngine>, CodecError> {
    match codec {
        Codec::Deflate(config) => Ok(Box::new(DeflateCompressEngine::open(config)?)),
        Codec::Lz4 => Ok(Box::new(Lz4CompressEngine::open())),
    }
}

pub(crate) fn open_decompress_engine(
    codec: &Codec,
) -> Result<Box<dyn DecompressEngine>, CodecError> {
    match codec {
        Codec::Deflate(config) => Ok(Box::new(DeflateDecompressEngine::open(config)?)),
        Codec::Lz4 => Ok(Box::new(Lz4DecompressEngine::open())),
    }
}
