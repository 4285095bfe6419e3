//! Stream-format constants shared by the encoder, the emitters, and the
//! verification decoder.
//!
//! The values are fixed by the 6502 decruncher routine: header bytes carry
//! the token kind in bits 7/1/0 and pack lengths into what is left, so every
//! cap below is a consequence of the bit layout.

/// Longest literal run a single header byte can describe.
pub const LONGEST_LITERAL: usize = 31;

/// Longest run-length token, in source bytes.
pub const LONGEST_RLE: usize = 64;

/// Length cap of the two-byte (short) LZ form.
pub const LONGEST_LZ: usize = 32;

/// Length cap of the three-byte (long) LZ form.
pub const LONGEST_LONG_LZ: usize = 64;

/// Shortest back-reference worth a token of its own.
pub const MIN_LZ: usize = 3;

/// Shortest run worth a token of its own.
pub const MIN_RLE: usize = 2;

/// LZ back-window, in bytes.
pub const LZ_OFFSET: usize = 32767;

/// LZ2 back-window, in bytes.
pub const LZ2_OFFSET: usize = 94;

/// End-of-stream marker: a literal header with length one past the cap.
pub const TERMINATOR: u8 = LONGEST_LITERAL as u8 + 1;

/// Largest input the 6502 address space can accommodate in SFX mode.
pub const MAX_INPUT_SIZE: usize = 65535;

/// Header tag of RLE and zero-run tokens (bits 7 and 0 set).
pub const RLE_MASK: u8 = 0x81;

/// Header tag of LZ tokens (bit 7 set, bit 0 clear).
pub const LZ_MASK: u8 = 0x80;

/// LZ2 offsets are stored as `LZ2_BASE - offset`, which keeps the header
/// byte below 0x80 and above the literal length cap.
pub const LZ2_BASE: u8 = 127;

/// Scale factor turning the rational cost model into exact integers, so
/// that encodes are byte-identical across runs and platforms.
pub const COST_SCALE: u64 = 100_000;
