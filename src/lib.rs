//! TSCrunch: an optimal binary cruncher for the Commodore 64.
//!
//! The encoder parses the input into a minimal-cost stream of literal, RLE,
//! LZ, LZ2 and zero-run tokens by running a shortest path over a DAG of
//! byte positions, then wraps the stream as a raw block, a self-extracting
//! PRG, or an in-place decrunchable PRG. The stream is decodable by a tiny
//! 6502 routine; [`decrunch`] is the bit-exact inverse used for
//! verification.

pub mod cli;
pub mod crunch;
pub mod decrunch;
pub mod io;
pub mod prg;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level re-exports for the common entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot crunch to a RAW stream.
pub use crunch::crunch_raw;
/// One-shot crunch of a PRG to a self-extracting PRG.
pub use crunch::crunch_sfx;
/// One-shot crunch of a PRG to the in-place layout.
pub use crunch::crunch_inplace;
/// The optimal parse itself, for callers that want the token list.
pub use crunch::parse_optimal;
/// Encoder-side error type.
pub use crunch::CrunchError;
/// Phase-progress callback type.
pub use crunch::Progress;
/// Outcome of an optimal parse.
pub use crunch::TokenStream;
/// One unit of the crunched stream.
pub use crunch::token::Token;

/// Decode a RAW stream (verification decoder).
pub use decrunch::decrunch_raw;
/// Decode an INPLACE stream (verification decoder).
pub use decrunch::decrunch_inplace;
/// Decoder-side error type.
pub use decrunch::DecrunchError;

/// PRG framing helper.
pub use prg::Prg;

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
