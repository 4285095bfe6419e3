//! The 6502 self-extracting loader prepended to SFX output.
//!
//! The image is a complete PRG: load address $0801, a BASIC `SYS` stub, a
//! relocation loop that copies the decruncher to the zero page, a transfer
//! loop that moves the crunched stream to top of memory, and the backwards
//! decruncher itself. The encoder treats it as opaque bytes; only the five
//! patch sites below are meaningful here.

/// Offset of the 16-bit transfer source address (end of the loaded file).
pub const PATCH_TRANSFER_FROM: usize = 0x1E;

/// Offset of the 16-bit address the relocated stream is read from.
pub const PATCH_START_ADDRESS: usize = 0x3C;

/// Offset of the 16-bit decrunch destination (the PRG's load address).
pub const PATCH_DECRUNCH_TO: usize = 0x40;

/// Offset of the 16-bit jump target entered once decrunching is done.
pub const PATCH_JMP_TO: usize = 0x77;

/// Offset of the zero-run length byte (stores `optimal_run - 1`).
pub const PATCH_OPTIMAL_RUN: usize = 0xC9;

/// Boot image length, PRG header included.
pub const BOOT_LEN: usize = 202;

/// The boot image, loading at $0801 as a one-line BASIC program.
pub static BOOT: [u8; BOOT_LEN] = [
    0x01, 0x08, 0x0B, 0x08, 0x0A, 0x00, 0x9E, 0x32, 0x30, 0x36, 0x31, 0x00,
    0x00, 0x00, 0x78, 0xA2, 0xB3, 0xBD, 0x1A, 0x08, 0x95, 0x00, 0xCA, 0xD0,
    0xF8, 0x4C, 0x02, 0x00, 0x34, 0xBD, 0x00, 0x10, 0x9D, 0x00, 0xFF, 0xE8,
    0xD0, 0xF7, 0xC6, 0x1F, 0xC6, 0x22, 0xA5, 0x1F, 0xC9, 0x07, 0xB0, 0xED,
    0xA0, 0x00, 0xB3, 0x23, 0x30, 0x23, 0xF0, 0x3A, 0xC9, 0x20, 0xA8, 0xB9,
    0xFF, 0xFF, 0x88, 0x99, 0xFF, 0xFF, 0xD0, 0xFB, 0x8A, 0xE8, 0x65, 0x27,
    0x85, 0x27, 0xB0, 0x71, 0x8A, 0x65, 0x23, 0x85, 0x23, 0x90, 0xDD, 0xE6,
    0x24, 0xB0, 0xD9, 0xA2, 0x02, 0x4B, 0x7F, 0xB0, 0x35, 0x85, 0x54, 0xC8,
    0xB1, 0x23, 0xA4, 0x54, 0x88, 0x91, 0x27, 0x88, 0x91, 0x27, 0xD0, 0xFB,
    0xA9, 0x00, 0x90, 0xD6, 0xEA, 0xA9, 0x37, 0x85, 0x01, 0x58, 0x4C, 0x00,
    0x00, 0x49, 0xBF, 0x65, 0x27, 0x85, 0x97, 0xA5, 0x28, 0xE9, 0x00, 0x85,
    0x98, 0xB1, 0x97, 0x91, 0x27, 0xC8, 0xB1, 0x97, 0x91, 0x27, 0x98, 0xAA,
    0x88, 0xF0, 0xB4, 0x4A, 0x85, 0x9C, 0xC8, 0xA5, 0x27, 0x90, 0x28, 0xF1,
    0x23, 0x85, 0x97, 0xA5, 0x28, 0xE9, 0x00, 0x85, 0x98, 0x88, 0xB1, 0x97,
    0x91, 0x27, 0xC8, 0xB1, 0x97, 0x91, 0x27, 0xC8, 0xB9, 0x97, 0x00, 0x91,
    0x27, 0xC0, 0x00, 0xD0, 0xF6, 0x98, 0xA0, 0x00, 0xF0, 0x89, 0xE6, 0x28,
    0x18, 0x90, 0x8A, 0x38, 0xF1, 0x23, 0x85, 0x97, 0xA2, 0x3F,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_has_the_documented_shape() {
        assert_eq!(BOOT.len(), BOOT_LEN);
        // PRG header: loads at $0801.
        assert_eq!(&BOOT[..2], &[0x01, 0x08]);
        // Every patch site fits inside the image.
        for offset in [PATCH_TRANSFER_FROM, PATCH_START_ADDRESS, PATCH_DECRUNCH_TO, PATCH_JMP_TO] {
            assert!(offset + 1 < BOOT_LEN);
        }
        assert!(PATCH_OPTIMAL_RUN < BOOT_LEN);
    }
}
