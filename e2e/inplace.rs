//! E2E Suite 03: in-place layout and cursor safety.
//!
//! The in-place stream is decrunched over itself: the read cursor must stay
//! strictly ahead of the write cursor for every retained token, which is
//! equivalent to every suffix of the retained stream decoding to more bytes
//! than it consumes. The raw tail and the terminator are checked the same
//! way, byte for byte.

use proptest::collection::vec;
use proptest::prelude::*;

use tscrunch::crunch::emit::suffix_safety;
use tscrunch::crunch::token::Token;
use tscrunch::{crunch_inplace, decrunch_inplace, parse_optimal, Prg};

/// Assert the cursor invariant for one payload.
fn assert_cursor_safe(data: &[u8]) {
    let (first, body) = data.split_first().expect("payload must be non-empty");
    let stream = parse_optimal(body, None);
    let (safety, total_uncrunched) = suffix_safety(&stream.tokens);
    let kept = &stream.tokens[..safety];

    // Every suffix of the kept stream must strictly compress.
    let mut decoded = 0usize;
    let mut consumed = 0usize;
    for token in kept.iter().rev() {
        decoded += token.size();
        consumed += token.payload_len();
        assert!(
            decoded > consumed,
            "suffix decodes {decoded} from {consumed} bytes; read cursor would stall"
        );
    }

    // The cut tokens are exactly the raw tail.
    let cut: usize = stream.tokens[safety..].iter().map(Token::size).sum();
    assert_eq!(cut, total_uncrunched);

    // And the emitted file is the documented layout.
    let prg = Prg { load_addr: 0x0801, data: data.to_vec() };
    let out = crunch_inplace(&prg, None).unwrap();
    let mut expected = vec![0x01, 0x08, (stream.optimal_run - 1) as u8, *first];
    for token in kept {
        token.write_payload(body, &mut expected);
    }
    expected.push(0x20);
    expected.extend_from_slice(&body[body.len() - total_uncrunched..]);
    assert_eq!(out, expected);
}

#[test]
fn compressible_payloads_keep_the_whole_stream() {
    let data = b"Hello hello hello hello hello!".repeat(4);
    assert_cursor_safe(&data);
}

#[test]
fn incompressible_payloads_go_raw() {
    // A pseudo-random spray with few repeats: the safety scan should push
    // most of it into the verbatim tail.
    let mut state = 0x193Au16;
    let data: Vec<u8> = (0..200)
        .map(|_| {
            state = state.wrapping_mul(25173).wrapping_add(13849);
            (state >> 8) as u8
        })
        .collect();
    assert_cursor_safe(&data);

    let prg = Prg { load_addr: 0x2000, data: data.clone() };
    let out = crunch_inplace(&prg, None).unwrap();
    let (addr, decoded) = decrunch_inplace(&out).unwrap();
    assert_eq!(addr, 0x2000);
    assert_eq!(decoded, data);
}

#[test]
fn zero_heavy_payloads_stay_safe() {
    let mut data = vec![0u8; 100];
    data.extend_from_slice(b"code goes here");
    data.extend_from_slice(&[0u8; 50]);
    data.push(0xFF);
    assert_cursor_safe(&data);
}

#[test]
fn single_byte_payload_is_header_only() {
    let prg = Prg { load_addr: 0x0801, data: vec![0x60] };
    let out = crunch_inplace(&prg, None).unwrap();
    assert_eq!(out, vec![0x01, 0x08, 0x3F, 0x60, 0x20]);
    assert_eq!(decrunch_inplace(&out).unwrap(), (0x0801, vec![0x60]));
}

#[test]
fn terminator_always_precedes_the_tail() {
    let data = b"ABABABABAB-unique-tail-bytes".to_vec();
    let (_, body) = data.split_first().unwrap();
    let stream = parse_optimal(body, None);
    let (safety, total_uncrunched) = suffix_safety(&stream.tokens);
    let kept_payload: usize = stream.tokens[..safety]
        .iter()
        .map(Token::payload_len)
        .sum();

    let prg = Prg { load_addr: 0x0801, data: data.clone() };
    let out = crunch_inplace(&prg, None).unwrap();
    let terminator_pos = 4 + kept_payload;
    assert_eq!(out[terminator_pos], 0x20);
    assert_eq!(out.len(), terminator_pos + 1 + total_uncrunched);
}

proptest! {
    #[test]
    fn cursor_invariant_holds_for_arbitrary_payloads(
        data in vec(any::<u8>(), 1..300)
    ) {
        assert_cursor_safe(&data);
    }

    #[test]
    fn cursor_invariant_holds_for_compressible_payloads(
        pattern in vec(any::<u8>(), 1..12),
        repeats in 1usize..24,
    ) {
        assert_cursor_safe(&pattern.repeat(repeats));
    }
}
