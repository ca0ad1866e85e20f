//! engine/mod.rs
//! Codec engine adapters behind one step/flush contract.
//!
//! Two concrete adapters exist:
//! - `deflate`: window-based byte codec (raw/zlib/gzip framing) with
//!   partial flush, a precise output bound, and a cheap native reset.
//! - `lz4`: block codec where every step is one self-contained block,
//!   chained through a trailing 64 KiB dictionary.

pub mod deflate;
pub mod lz4;
pub mod types;

pub use types::{CompressEngine, DecompressEngine, FlushMode, StepOutcome, StepStatus};
