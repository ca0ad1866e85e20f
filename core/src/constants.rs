//! constants.rs
//! Shared sizing defaults for the streaming driver.

/// Trailing dictionary retained by the block codec, matching the LZ4
/// match-window of 64 KiB.
pub const BLOCK_DICT_SIZE: usize = 64 * 1024;

/// Default windowBits exponent for the DEFLATE family (largest window).
pub const DEFAULT_WINDOW_LOG2: u8 = 15;

/// Default zlib memLevel.
pub const DEFAULT_MEMORY_LEVEL: u8 = 8;

/// Growth numerator/denominator for the first allocation of the
/// auto-growing decompressor: 3/2 of the compressed input size.
pub const GROW_INITIAL_NUM: usize = 3;
pub const GROW_INITIAL_DEN: usize = 2;

/// Floor for auto-growing allocations so tiny inputs still make progress.
pub const GROW_MIN_ALLOC: usize = 64;
