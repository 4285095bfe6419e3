//! E2E Suite 02: encoder invariants.
//!
//! Property tests over arbitrary and deliberately compressible inputs:
//! round-trip, determinism, optimality against a brute-force path search,
//! and the all-zero compaction law.

use std::collections::HashMap;

use proptest::collection::vec;
use proptest::prelude::*;

use tscrunch::crunch::graph::{self, Graph};
use tscrunch::crunch::search;
use tscrunch::crunch::token::Token;
use tscrunch::{crunch_inplace, crunch_raw, decrunch_inplace, decrunch_raw, parse_optimal, Prg};

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Arbitrary bytes, zero-heavy bytes, and repeated patterns: the three
/// shapes that exercise every token kind.
fn crunchable_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        vec(any::<u8>(), 0..400),
        vec(prop_oneof![3 => Just(0u8), 1 => any::<u8>()], 0..400),
        (vec(any::<u8>(), 1..16), 1usize..32).prop_map(|(pattern, n)| pattern.repeat(n)),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip and determinism
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn raw_roundtrip(src in crunchable_bytes()) {
        let crunched = crunch_raw(&src, None);
        prop_assert_eq!(decrunch_raw(&crunched).unwrap(), src);
    }

    #[test]
    fn inplace_roundtrip(data in vec(any::<u8>(), 1..300), addr in any::<u16>()) {
        let prg = Prg { load_addr: addr, data: data.clone() };
        let crunched = crunch_inplace(&prg, None).unwrap();
        let (decoded_addr, decoded) = decrunch_inplace(&crunched).unwrap();
        prop_assert_eq!(decoded_addr, addr);
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn encoding_is_deterministic(src in crunchable_bytes()) {
        prop_assert_eq!(crunch_raw(&src, None), crunch_raw(&src, None));
    }

    #[test]
    fn tokens_tile_the_input(src in crunchable_bytes()) {
        let stream = parse_optimal(&src, None);
        let mut pos = 0usize;
        for token in &stream.tokens {
            if let Token::Literal { start, .. } = *token {
                prop_assert_eq!(start, pos);
            }
            pos += token.size();
        }
        prop_assert_eq!(pos, src.len());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Optimality against brute force
// ─────────────────────────────────────────────────────────────────────────────

/// Cheapest sink cost over every path of the DAG, by memoized exhaustive
/// search (feasible for the tiny inputs this is used with).
fn brute_force_min(dag: &Graph) -> u64 {
    let mut outgoing: HashMap<usize, Vec<(usize, Token)>> = HashMap::new();
    for (&(i, j), &token) in &dag.edges {
        outgoing.entry(i).or_default().push((j, token));
    }

    fn cheapest(
        node: usize,
        sink: usize,
        outgoing: &HashMap<usize, Vec<(usize, Token)>>,
        memo: &mut HashMap<usize, u64>,
    ) -> u64 {
        if node == sink {
            return 0;
        }
        if let Some(&known) = memo.get(&node) {
            return known;
        }
        let mut best = u64::MAX;
        for &(next, token) in outgoing.get(&node).into_iter().flatten() {
            let rest = cheapest(next, sink, outgoing, memo);
            if rest != u64::MAX {
                best = best.min(token.cost() + rest);
            }
        }
        memo.insert(node, best);
        best
    }

    let mut memo = HashMap::new();
    cheapest(0, dag.nodes - 1, &outgoing, &mut memo)
}

proptest! {
    #[test]
    fn emitted_path_is_optimal(src in vec(any::<u8>(), 0..20)) {
        let stream = parse_optimal(&src, None);
        let token_sum: u64 = stream.tokens.iter().map(Token::cost).sum();
        prop_assert_eq!(stream.cost, token_sum);

        let dag = graph::build(&src, search::optimal_zero_run(&src), None);
        prop_assert_eq!(stream.cost, brute_force_min(&dag));
    }

    #[test]
    fn emitted_path_is_optimal_on_patterns(
        pattern in vec(any::<u8>(), 1..4),
        repeats in 1usize..7,
    ) {
        let src = pattern.repeat(repeats);
        let stream = parse_optimal(&src, None);
        let dag = graph::build(&src, search::optimal_zero_run(&src), None);
        prop_assert_eq!(stream.cost, brute_force_min(&dag));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// All-zero inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn all_zero_inputs_compact_to_one_byte_per_run() {
    // Sizes where the census makes optimal_run divide the input evenly.
    for n in [2usize, 5, 64, 255, 510, 765] {
        let src = vec![0u8; n];
        let stream = parse_optimal(&src, None);
        let runs = n / stream.optimal_run;
        assert_eq!(n % stream.optimal_run, 0, "census must divide n = {n}");
        assert_eq!(stream.tokens.len(), runs, "n = {n}");
        let crunched = crunch_raw(&src, None);
        assert_eq!(crunched.len(), runs + 2, "n = {n}");
        assert!(crunched[1..=runs].iter().all(|&b| b == 0x81));
        assert_eq!(decrunch_raw(&crunched).unwrap(), src);
    }
}
