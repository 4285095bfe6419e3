//! Shortest path over the span DAG.
//!
//! Every edge points forward, so relaxing nodes in ascending position order
//! is Dijkstra without the heap: linear in the edge count and fully
//! deterministic once each adjacency list is sorted.

use crate::crunch::graph::Graph;
use crate::crunch::token::Token;
use crate::crunch::{report, Progress};

/// The winning path: tokens in stream order plus the total scaled cost.
pub struct ParseOutcome {
    pub tokens: Vec<Token>,
    pub cost: u64,
}

/// Find the minimal-cost token sequence covering the whole buffer.
pub fn shortest_path(graph: &Graph, progress: Progress<'_>) -> ParseOutcome {
    report(progress, "populating graph");
    let n = graph.nodes;
    let mut adjacency: Vec<Vec<(usize, Token)>> = vec![Vec::new(); n];
    for (&(i, j), &token) in &graph.edges {
        adjacency[i].push((j, token));
    }
    for out in &mut adjacency {
        out.sort_unstable_by_key(|&(j, _)| j);
    }

    report(progress, "computing shortest path");
    const UNREACHED: u64 = u64::MAX;
    let mut dist = vec![UNREACHED; n];
    let mut pred = vec![0usize; n];
    let mut via: Vec<Option<Token>> = vec![None; n];
    dist[0] = 0;
    for i in 0..n {
        if dist[i] == UNREACHED {
            continue;
        }
        for &(j, token) in &adjacency[i] {
            let candidate = dist[i] + token.cost();
            if candidate < dist[j] {
                dist[j] = candidate;
                pred[j] = i;
                via[j] = Some(token);
            }
        }
    }

    let sink = n - 1;
    debug_assert!(dist[sink] != UNREACHED, "gap closing left the sink unreachable");

    let mut tokens = Vec::new();
    let mut node = sink;
    while node != 0 {
        let token = via[node].expect("every node on the path has an incoming token");
        tokens.push(token);
        node = pred[node];
    }
    tokens.reverse();

    ParseOutcome { tokens, cost: dist[sink] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crunch::{graph, search};

    fn parse(src: &[u8]) -> ParseOutcome {
        let g = graph::build(src, search::optimal_zero_run(src), None);
        shortest_path(&g, None)
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let outcome = parse(&[]);
        assert!(outcome.tokens.is_empty());
        assert_eq!(outcome.cost, 0);
    }

    #[test]
    fn single_byte_is_one_literal() {
        let outcome = parse(b"A");
        assert_eq!(outcome.tokens, vec![Token::literal(0, 1)]);
    }

    #[test]
    fn tokens_tile_the_input_exactly() {
        let src = b"abcabcaaaaXYXYXY";
        let outcome = parse(src);
        let mut pos = 0;
        for t in &outcome.tokens {
            pos += t.size();
        }
        assert_eq!(pos, src.len());
        assert_eq!(outcome.cost, outcome.tokens.iter().map(Token::cost).sum());
    }

    #[test]
    fn a_run_parses_to_a_single_rle() {
        let outcome = parse(&[b'A'; 8]);
        assert_eq!(outcome.tokens, vec![Token::rle(b'A', 8)]);
    }
}
