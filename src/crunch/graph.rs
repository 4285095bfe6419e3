//! Span DAG construction.
//!
//! Nodes are byte positions `0..=len`; an edge `(i, j)` carries the one
//! token chosen to cover `src[i..j]`. Token edges come first (LZ, then RLE,
//! then LZ2, with zero runs preempting their span), literal edges are added
//! last and only where the path would otherwise be disconnected.

use std::collections::{BTreeSet, HashMap};

use crate::crunch::constants::{
    LONGEST_LITERAL, LONGEST_LONG_LZ, MIN_LZ, MIN_RLE,
};
use crate::crunch::search;
use crate::crunch::token::Token;
use crate::crunch::{report, Progress};

/// The span DAG: at most one candidate token per `(i, j)` edge.
pub struct Graph {
    pub edges: HashMap<(usize, usize), Token>,
    /// Node count, `src.len() + 1`; the last node is the sink.
    pub nodes: usize,
}

/// Build the DAG for `src`, with `optimal_run` as the zero-run span.
pub fn build(src: &[u8], optimal_run: usize, progress: Progress<'_>) -> Graph {
    let n = src.len();
    let mut edges: HashMap<(usize, usize), Token> = HashMap::new();
    let mut starts: BTreeSet<usize> = BTreeSet::new();
    let mut ends: BTreeSet<usize> = BTreeSet::new();

    report(progress, "populating LZ layer");
    for i in 0..n {
        let rle = search::rle_size(src, i);
        // A match is only useful if it strictly outruns the RLE, so the
        // probe starts above it; a near-cap run leaves no room at all.
        let lz = if rle + 1 <= LONGEST_LONG_LZ - 1 {
            search::longest_match(src, i, (rle + 1).max(MIN_LZ))
        } else {
            None
        };

        if lz.is_some() || rle >= MIN_RLE {
            starts.insert(i);
        }

        if let Some(m) = lz {
            // Every shorter length is a valid match at the same offset.
            let mut len = m.len;
            while len >= MIN_LZ && len > rle {
                edges
                    .entry((i, i + len))
                    .or_insert_with(|| Token::lz(m.offset, len));
                ends.insert(i + len);
                len -= 1;
            }
        }

        let mut len = rle;
        while len >= MIN_RLE {
            edges
                .entry((i, i + len))
                .or_insert_with(|| Token::rle(src[i], len));
            ends.insert(i + len);
            len -= 1;
        }

        if let Some(offset) = search::lz2_offset(src, i) {
            edges.entry((i, i + 2)).or_insert_with(|| Token::lz2(offset));
            starts.insert(i);
            ends.insert(i + 2);
        }

        if i + optimal_run <= n && src[i..i + optimal_run].iter().all(|&b| b == 0) {
            // Zero runs preempt whatever else spans these bytes: one byte
            // of payload can never lose to the evicted token.
            edges.insert((i, i + optimal_run), Token::zero_run(optimal_run));
            starts.insert(i);
            ends.insert(i + optimal_run);
        }
    }

    report(progress, "closing gaps");
    starts.insert(n);
    let starts: Vec<usize> = starts.into_iter().collect();
    let mut end_list: Vec<usize> = Vec::with_capacity(ends.len() + 1);
    end_list.push(0);
    end_list.extend(ends.into_iter());

    let (mut e, mut s) = (0, 0);
    while e < end_list.len() && s < starts.len() {
        let mut end = end_list[e];
        if end < starts[s] {
            while starts[s] - end >= LONGEST_LITERAL {
                edges
                    .entry((end, end + LONGEST_LITERAL))
                    .or_insert_with(|| Token::literal(end, LONGEST_LITERAL));
                end += LONGEST_LITERAL;
            }
            let mut s0 = s;
            while s0 < starts.len() && starts[s0] - end < LONGEST_LITERAL {
                if starts[s0] > end {
                    edges
                        .entry((end, starts[s0]))
                        .or_insert_with(|| Token::literal(end, starts[s0] - end));
                }
                s0 += 1;
            }
            e += 1;
        } else {
            s += 1;
        }
    }

    Graph { edges, nodes: n + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crunch::constants::LONGEST_RLE;

    fn build_quiet(src: &[u8]) -> Graph {
        build(src, search::optimal_zero_run(src), None)
    }

    #[test]
    fn zero_run_preempts_the_rle_span() {
        let src = [0u8; 5];
        let g = build_quiet(&src);
        assert_eq!(g.edges.get(&(0, 5)), Some(&Token::zero_run(5)));
        // Other run lengths still go through RLE.
        assert_eq!(g.edges.get(&(0, 4)), Some(&Token::rle(0, 4)));
    }

    #[test]
    fn shorter_lz_edges_share_the_offset() {
        //            0123456789.
        let src = b"abcdeXabcde";
        let g = build_quiet(src);
        assert_eq!(g.edges.get(&(6, 11)), Some(&Token::lz(6, 5)));
        assert_eq!(g.edges.get(&(6, 10)), Some(&Token::lz(6, 4)));
        assert_eq!(g.edges.get(&(6, 9)), Some(&Token::lz(6, 3)));
        // The two-byte span belongs to LZ2, not to a truncated LZ.
        assert_eq!(g.edges.get(&(6, 8)), Some(&Token::lz2(6)));
    }

    #[test]
    fn rle_covers_every_length_down_to_min() {
        let src = b"zzzzQ";
        let g = build_quiet(src);
        assert_eq!(g.edges.get(&(0, 4)), Some(&Token::rle(b'z', 4)));
        assert_eq!(g.edges.get(&(0, 3)), Some(&Token::rle(b'z', 3)));
        assert_eq!(g.edges.get(&(0, 2)), Some(&Token::rle(b'z', 2)));
        assert_eq!(g.edges.get(&(0, 1)), None);
    }

    #[test]
    fn literals_bridge_from_zero_to_the_first_start() {
        //            012345
        let src = b"abcabc";
        let g = build_quiet(src);
        // Starts: 3 (LZ "abc"), 4 (LZ2 "bc"... via pair at 1), sink 6.
        assert_eq!(g.edges.get(&(0, 3)), Some(&Token::literal(0, 3)));
        assert_eq!(g.edges.get(&(0, 4)), Some(&Token::literal(0, 4)));
        assert_eq!(g.edges.get(&(0, 6)), Some(&Token::literal(0, 6)));
    }

    #[test]
    fn long_gaps_chain_max_length_literals() {
        // 40 distinct bytes: no matches anywhere.
        let src: Vec<u8> = (0..40).collect();
        let g = build_quiet(&src);
        assert_eq!(
            g.edges.get(&(0, LONGEST_LITERAL)),
            Some(&Token::literal(0, LONGEST_LITERAL))
        );
        assert_eq!(
            g.edges.get(&(LONGEST_LITERAL, 40)),
            Some(&Token::literal(LONGEST_LITERAL, 40 - LONGEST_LITERAL))
        );
    }

    #[test]
    fn empty_input_builds_an_empty_graph() {
        let g = build_quiet(&[]);
        assert_eq!(g.nodes, 1);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn near_cap_runs_skip_the_lz_probe() {
        // A full-length run has no room for a strictly longer match; the
        // builder must not probe past the cap.
        let src = vec![5u8; LONGEST_RLE * 3];
        let g = build_quiet(&src);
        assert_eq!(
            g.edges.get(&(0, LONGEST_RLE)),
            Some(&Token::rle(5, LONGEST_RLE))
        );
    }
}
