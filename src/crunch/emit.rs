//! Stream framing: the RAW, SFX, and INPLACE emitters.
//!
//! RAW is the bare stream. SFX wraps it in the boot block with five patched
//! fields. INPLACE truncates the token stream at the suffix safety margin
//! and stores the remainder of the source raw, so the stream can be
//! decrunched over itself.

use crate::crunch::boot::{
    BOOT, BOOT_LEN, PATCH_DECRUNCH_TO, PATCH_JMP_TO, PATCH_OPTIMAL_RUN, PATCH_START_ADDRESS,
    PATCH_TRANSFER_FROM,
};
use crate::crunch::constants::{MAX_INPUT_SIZE, TERMINATOR};
use crate::crunch::token::Token;
use crate::crunch::{CrunchError, TokenStream};

/// Emit the RAW framing: run-length prefix, payloads, terminator.
pub fn raw(src: &[u8], stream: &TokenStream) -> Vec<u8> {
    let payload_total: usize = stream.tokens.iter().map(Token::payload_len).sum();
    let mut out = Vec::with_capacity(payload_total + 2);
    out.push((stream.optimal_run - 1) as u8);
    for token in &stream.tokens {
        token.write_payload(src, &mut out);
    }
    out.push(TERMINATOR);
    out
}

fn patch16(image: &mut [u8], offset: usize, value: u16) {
    image[offset] = (value & 0xFF) as u8;
    image[offset + 1] = (value >> 8) as u8;
}

/// Emit a self-extracting PRG: the patched boot block followed by the RAW
/// stream.
///
/// `decrunch_to` is the original load address, `jmp_to` the entry point
/// taken after decrunching.
pub fn sfx(
    src: &[u8],
    stream: &TokenStream,
    decrunch_to: u16,
    jmp_to: u16,
) -> Result<Vec<u8>, CrunchError> {
    if src.len() > MAX_INPUT_SIZE {
        return Err(CrunchError::InputTooLarge);
    }
    let crunched = raw(src, stream);

    let start_address = 0x1_0000_usize
        .checked_sub(crunched.len())
        .ok_or(CrunchError::InputTooLarge)?;
    let transfer_from = BOOT_LEN + crunched.len() + 0x06FF;
    if transfer_from > 0xFFFF {
        return Err(CrunchError::InputTooLarge);
    }

    let mut out = Vec::with_capacity(BOOT_LEN + crunched.len());
    out.extend_from_slice(&BOOT);
    patch16(&mut out, PATCH_TRANSFER_FROM, transfer_from as u16);
    patch16(&mut out, PATCH_START_ADDRESS, start_address as u16);
    patch16(&mut out, PATCH_DECRUNCH_TO, decrunch_to);
    patch16(&mut out, PATCH_JMP_TO, jmp_to);
    out[PATCH_OPTIMAL_RUN] = (stream.optimal_run - 1) as u8;
    out.extend_from_slice(&crunched);
    Ok(out)
}

/// Suffix safety margin for in-place decrunching.
///
/// Walking the token list backwards, any suffix segment whose decoded size
/// does not strictly exceed its encoded size is unsafe to decrunch over
/// itself. Returns the index of the first token stored raw and the total
/// raw byte count; every retained suffix then strictly compresses, which is
/// exactly the read-cursor-leads-write-cursor invariant.
pub fn suffix_safety(tokens: &[Token]) -> (usize, usize) {
    let mut safety = tokens.len();
    let mut segment_uncrunched = 0usize;
    let mut segment_crunched = 0usize;
    let mut total_uncrunched = 0usize;
    for (index, token) in tokens.iter().enumerate().rev() {
        segment_crunched += token.payload_len();
        segment_uncrunched += token.size();
        if segment_uncrunched <= segment_crunched {
            safety = index;
            total_uncrunched += segment_uncrunched;
            segment_uncrunched = 0;
            segment_crunched = 0;
        }
    }
    (safety, total_uncrunched)
}

/// Emit the INPLACE framing.
///
/// `first` is the original first byte of the PRG payload; `body` is the
/// rest, the buffer `stream` was parsed from. Layout: load address,
/// run-length prefix, the first byte, the payloads of the safe token
/// prefix, the terminator, then the raw tail.
pub fn inplace(first: u8, body: &[u8], stream: &TokenStream, load_addr: u16) -> Vec<u8> {
    let (safety, total_uncrunched) = suffix_safety(&stream.tokens);
    let mut out = Vec::new();
    out.extend_from_slice(&load_addr.to_le_bytes());
    out.push((stream.optimal_run - 1) as u8);
    out.push(first);
    for token in &stream.tokens[..safety] {
        token.write_payload(body, &mut out);
    }
    out.push(TERMINATOR);
    if total_uncrunched > 0 {
        out.extend_from_slice(&body[body.len() - total_uncrunched..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crunch::parse_optimal;

    #[test]
    fn raw_frames_prefix_and_terminator() {
        let src = [0u8; 5];
        let stream = parse_optimal(&src, None);
        assert_eq!(raw(&src, &stream), vec![0x04, 0x81, 0x20]);
    }

    #[test]
    fn sfx_patches_all_five_sites() {
        let src = [b'A'; 8];
        let stream = parse_optimal(&src, None);
        let out = sfx(&src, &stream, 0x0801, 0x080D).unwrap();
        // RAW stream: prefix, RLE pair, terminator.
        let crunched_len = 4;
        assert_eq!(out.len(), BOOT_LEN + crunched_len);
        assert_eq!(&out[out.len() - crunched_len..], &[0x3F, 0x8F, 0x41, 0x20]);

        let read16 =
            |off: usize| u16::from_le_bytes([out[off], out[off + 1]]) as usize;
        assert_eq!(read16(PATCH_TRANSFER_FROM), BOOT_LEN + crunched_len + 0x06FF);
        assert_eq!(read16(PATCH_START_ADDRESS), 0x1_0000 - crunched_len);
        assert_eq!(read16(PATCH_DECRUNCH_TO), 0x0801);
        assert_eq!(read16(PATCH_JMP_TO), 0x080D);
        assert_eq!(out[PATCH_OPTIMAL_RUN], 0x3F);
    }

    #[test]
    fn sfx_rejects_oversized_input() {
        let src = vec![0u8; MAX_INPUT_SIZE + 1];
        let stream = parse_optimal(&src, None);
        assert_eq!(sfx(&src, &stream, 0x0801, 0x0801), Err(CrunchError::InputTooLarge));
    }

    #[test]
    fn safety_keeps_a_compressing_stream_whole() {
        // One RLE token: 8 bytes from 2. Every suffix compresses.
        let tokens = [Token::rle(b'A', 8)];
        assert_eq!(suffix_safety(&tokens), (1, 0));
    }

    #[test]
    fn safety_truncates_an_expanding_tail() {
        // A literal expands (payload = size + 1), so it is stored raw.
        let tokens = [Token::rle(b'A', 8), Token::literal(8, 3)];
        assert_eq!(suffix_safety(&tokens), (1, 3));
    }

    #[test]
    fn safety_absorbs_everything_when_nothing_compresses() {
        let tokens = [Token::literal(0, 5), Token::literal(5, 2)];
        assert_eq!(suffix_safety(&tokens), (0, 7));
    }

    #[test]
    fn safety_goes_raw_from_the_first_unsafe_suffix() {
        // The trailing literal is unsafe on its own; the LZ2 before it
        // stays in the stream.
        let tokens = [Token::lz2(2), Token::literal(2, 2)];
        assert_eq!(suffix_safety(&tokens), (1, 2));
    }
}
