//! config.rs
//! Codec selection and the window-codec configuration value type.
//!
//! Design notes:
//! - Configuration is a plain immutable value passed explicitly; there
//!   are no hidden global defaults.
//! - Validation mirrors zlib's `deflateInit2` parameter checks; a bad
//!   parameter maps to the `Internal` kind the way `Z_STREAM_ERROR`
//!   would.

use crate::constants::{DEFAULT_MEMORY_LEVEL, DEFAULT_WINDOW_LOG2};
use crate::error::CodecError;
use crate::stream::{Compressor, Decompressor};

/// Framing wrapped around the DEFLATE bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeflateFormat {
    /// Raw DEFLATE blocks, no header or trailer.
    Raw,
    /// zlib header plus Adler-32 trailer.
    #[default]
    Zlib,
    /// gzip header plus CRC-32/length trailer.
    Gzip,
}

/// zlib deflate strategy knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeflateStrategy {
    #[default]
    Default,
    HuffmanOnly,
    RunLength,
    Filtered,
    Fixed,
}

/// Window-codec configuration, immutable once a session opens with it.
///
/// `memory_level` and `strategy` are validated and carried for protocol
/// completeness, but the flate2 binding does not expose zlib's memLevel
/// or strategy parameters and applies its own defaults for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeflateConfig {
    pub format: DeflateFormat,
    /// Window size exponent, 9..=15. Framing adds or negates the
    /// exponent in zlib's own encoding; that derivation happens once at
    /// session open via the constructor choice.
    pub window_log2: u8,
    /// Compression level -1..=9 where -1 selects zlib's default.
    pub level: i32,
    /// zlib memLevel, 1..=9.
    pub memory_level: u8,
    pub strategy: DeflateStrategy,
}

impl Default for DeflateConfig {
    fn default() -> Self {
        Self {
            format: DeflateFormat::default(),
            window_log2: DEFAULT_WINDOW_LOG2,
            level: -1,
            memory_level: DEFAULT_MEMORY_LEVEL,
            strategy: DeflateStrategy::default(),
        }
    }
}

impl DeflateConfig {
    pub fn validate(&self) -> Result<(), CodecError> {
        if !(9..=15).contains(&self.window_log2) {
            return Err(invalid("window_log2 outside 9..=15"));
        }
        if !(-1..=9).contains(&self.level) {
            return Err(invalid("compression level outside -1..=9"));
        }
        if !(1..=9).contains(&self.memory_level) {
            return Err(invalid("memory_level outside 1..=9"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> CodecError {
    CodecError::Internal {
        codec: "deflate",
        msg: msg.to_string(),
    }
}

/// Codec family selector and session factory.
///
/// One codec instance serves one logical stream sequentially; two
/// independent sessions share no state and may run on separate threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    /// Window codec: DEFLATE family.
    Deflate(DeflateConfig),
    /// Block codec: LZ4 blocks with trailing-dictionary chaining. A
    /// stream must be decompressed at the same block boundaries it was
    /// compressed with; other segmentations are allowed to fail with
    /// `CorruptData`.
    Lz4,
}

impl Codec {
    /// Raw DEFLATE blocks with default parameters.
    pub fn raw_deflate() -> Self {
        Codec::Deflate(DeflateConfig {
            format: DeflateFormat::Raw,
            ..DeflateConfig::default()
        })
    }

    /// zlib-framed DEFLATE with default parameters.
    pub fn zlib() -> Self {
        Codec::Deflate(DeflateConfig::default())
    }

    /// gzip-framed DEFLATE with default parameters.
    pub fn gzip() -> Self {
        Codec::Deflate(DeflateConfig {
            format: DeflateFormat::Gzip,
            ..DeflateConfig::default()
        })
    }

    /// LZ4 block codec.
    pub fn lz4() -> Self {
        Codec::Lz4
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::Deflate(config) => match config.format {
                DeflateFormat::Raw => "deflate",
                DeflateFormat::Zlib => "zlib",
                DeflateFormat::Gzip => "gzip",
            },
            Codec::Lz4 => "lz4",
        }
    }

    /// New compression session in the `Uninitialized` state.
    pub fn compressor(&self) -> Compressor {
        Compressor::new(self.clone())
    }

    /// New decompression session in the `Uninitialized` state.
    pub fn decompressor(&self) -> Decompressor {
        Decompressor::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DeflateConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let bad_window = DeflateConfig {
            window_log2: 16,
            ..DeflateConfig::default()
        };
        assert!(bad_window.validate().is_err());

        let bad_level = DeflateConfig {
            level: 10,
            ..DeflateConfig::default()
        };
        assert!(bad_level.validate().is_err());

        let bad_mem = DeflateConfig {
            memory_level: 0,
            ..DeflateConfig::default()
        };
        assert!(bad_mem.validate().is_err());
    }
}
