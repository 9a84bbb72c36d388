//! Subcommand handlers.

pub mod config;
pub mod info;
pub mod play;

use ttyplay::ttyrec::Decoder;

/// Decoder with every decompressor this build supports.
pub fn decoder() -> Decoder {
    #[cfg(feature = "gzip")]
    {
        Decoder::with_gzip()
    }

    #[cfg(not(feature = "gzip"))]
    {
        Decoder::new()
    }
}
