//! E2E Suite 01: bit-exact stream format.
//!
//! Pins the encoded bytes of small, hand-checkable inputs and the boundary
//! values of every token field. Each case is also decoded back to prove the
//! verification decoder agrees with the bit layout.

use tscrunch::crunch::constants::{
    LONGEST_LITERAL, LONGEST_LONG_LZ, LONGEST_RLE, TERMINATOR,
};
use tscrunch::{crunch_raw, decrunch_raw, parse_optimal, Token};

fn crunch_and_check(src: &[u8]) -> Vec<u8> {
    let out = crunch_raw(src, None);
    assert_eq!(
        decrunch_raw(&out).expect("stream must decode"),
        src,
        "decode(encode(src)) failed"
    );
    out
}

fn tokens_of(src: &[u8]) -> Vec<Token> {
    parse_optimal(src, None).tokens
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-checked scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn five_zeros_are_one_zero_run_byte() {
    let src = [0u8; 5];
    assert_eq!(tokens_of(&src), vec![Token::zero_run(5)]);
    assert_eq!(crunch_and_check(&src), vec![0x04, 0x81, TERMINATOR]);
}

#[test]
fn a_run_of_eight_is_one_rle_pair() {
    let src = [0x41u8; 8];
    assert_eq!(tokens_of(&src), vec![Token::rle(0x41, 8)]);
    assert_eq!(crunch_and_check(&src), vec![0x3F, 0x8F, 0x41, TERMINATOR]);
}

#[test]
fn abcabc_takes_the_cheapest_equal_byte_path() {
    // Six output bytes either way; the fractional tie-breakers favour the
    // four-byte literal plus a one-byte LZ2 over literal "ABC" plus LZ.
    let src = b"ABCABC";
    assert_eq!(
        tokens_of(src),
        vec![Token::literal(0, 4), Token::lz2(3)]
    );
    assert_eq!(
        crunch_and_check(src),
        vec![0x3F, 0x04, 0x41, 0x42, 0x43, 0x41, 0x7C, TERMINATOR]
    );
}

#[test]
fn ababab_extends_one_match_over_lz2_pairs() {
    let src = b"ABABAB";
    assert_eq!(
        tokens_of(src),
        vec![Token::literal(0, 2), Token::lz(2, 4)]
    );
    assert_eq!(
        crunch_and_check(src),
        vec![0x3F, 0x02, 0x41, 0x42, 0x8E, 0x02, TERMINATOR]
    );
}

#[test]
fn a_single_byte_is_one_literal() {
    let src = b"A";
    assert_eq!(tokens_of(src), vec![Token::literal(0, 1)]);
    assert_eq!(crunch_and_check(src), vec![0x3F, 0x01, 0x41, TERMINATOR]);
}

#[test]
fn run_mix_splits_into_zero_run_and_rle() {
    let src = [0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    assert_eq!(
        tokens_of(&src),
        vec![Token::zero_run(3), Token::rle(0xFF, 5)]
    );
    assert_eq!(
        crunch_and_check(&src),
        vec![0x02, 0x81, 0x89, 0xFF, TERMINATOR]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Framing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_prefix_and_terminator() {
    assert_eq!(crunch_and_check(&[]), vec![0x3F, TERMINATOR]);
}

#[test]
fn terminator_is_a_literal_header_past_the_cap() {
    assert_eq!(TERMINATOR, LONGEST_LITERAL as u8 + 1);
    let out = crunch_and_check(b"x");
    assert_eq!(*out.last().unwrap(), TERMINATOR);
}

// ─────────────────────────────────────────────────────────────────────────────
// Boundary values
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_cap_fills_one_header() {
    let src: Vec<u8> = (1..=LONGEST_LITERAL as u8).collect();
    assert_eq!(tokens_of(&src), vec![Token::literal(0, LONGEST_LITERAL)]);
    let out = crunch_and_check(&src);
    assert_eq!(out[1], LONGEST_LITERAL as u8);
    assert_eq!(out.len(), LONGEST_LITERAL + 3);
}

#[test]
fn literal_past_the_cap_needs_a_second_token() {
    let src: Vec<u8> = (1..=LONGEST_LITERAL as u8 + 1).collect();
    assert_eq!(
        tokens_of(&src),
        vec![
            Token::literal(0, LONGEST_LITERAL),
            Token::literal(LONGEST_LITERAL, 1)
        ]
    );
    crunch_and_check(&src);
}

#[test]
fn rle_cap_is_sixty_four() {
    let src = vec![0xABu8; LONGEST_RLE];
    assert_eq!(tokens_of(&src), vec![Token::rle(0xAB, LONGEST_RLE)]);
    assert_eq!(crunch_and_check(&src), vec![0x3F, 0xFF, 0xAB, TERMINATOR]);
}

#[test]
fn lz_cap_is_sixty_four() {
    // Two copies of a 64-byte block: the second is one long-form match.
    let block: Vec<u8> = (1..=LONGEST_LONG_LZ as u8).collect();
    let mut src = block.clone();
    src.extend_from_slice(&block);
    let tokens = tokens_of(&src);
    assert!(
        tokens.contains(&Token::lz(64, LONGEST_LONG_LZ)),
        "expected a full-length match in {tokens:?}"
    );
    crunch_and_check(&src);
}

#[test]
fn short_offsets_and_lengths_use_the_two_byte_form() {
    // Match of 32 at offset 32: short form caps exactly here.
    let block: Vec<u8> = (0x80..0xA0).collect();
    let mut src = block.clone();
    src.extend_from_slice(&block);
    let tokens = tokens_of(&src);
    assert!(tokens.contains(&Token::lz(32, 32)), "tokens: {tokens:?}");
    let out = crunch_and_check(&src);
    // Header 0x80 | ((32-1) << 2) & 0x7F | 0x02, then the offset byte.
    let header_pos = out.iter().position(|&b| b == 0xFE).unwrap();
    assert_eq!(out[header_pos + 1], 32);
}

#[test]
fn long_distances_use_the_three_byte_form() {
    // The same four bytes 1000 apart: a long-form match saves a full byte
    // over stretching any literal across them.
    let mut src: Vec<u8> = Vec::new();
    src.extend_from_slice(b"QRST");
    let mut state = 0x2Fu8;
    while src.len() < 1000 {
        state = state.wrapping_mul(167).wrapping_add(41);
        // Keep filler clear of 'Q'..'T' so the only match is ours.
        src.push(0x60 | (state & 0x1F));
    }
    src.extend_from_slice(b"QRST");
    let tokens = tokens_of(&src);
    assert!(
        tokens.contains(&Token::lz(1000, 4)),
        "expected the distant match in the parse"
    );
    crunch_and_check(&src);
}

#[test]
fn lz2_reaches_its_full_window() {
    let mut src = vec![];
    src.extend_from_slice(b"PQ");
    for k in 0..92u8 {
        src.push(0xA0 + k);
    }
    src.extend_from_slice(b"PQ");
    let tokens = tokens_of(&src);
    assert!(tokens.contains(&Token::lz2(94)), "tokens: {tokens:?}");
    crunch_and_check(&src);
}

#[test]
fn optimal_run_length_zero_runs_cost_one_byte() {
    // Both zero runs are exactly the optimal length, so each costs a
    // single 0x81 byte despite RLE spanning the same bytes.
    let mut src = vec![0u8; 5];
    src.push(1);
    src.extend_from_slice(&[0u8; 5]);
    let out = crunch_and_check(&src);
    assert_eq!(
        tokens_of(&src),
        vec![
            Token::zero_run(5),
            Token::literal(5, 1),
            Token::zero_run(5)
        ]
    );
    assert_eq!(out, vec![0x04, 0x81, 0x01, 0x01, 0x81, TERMINATOR]);
}
