//! The optimal parser: turns a byte buffer into a minimal-cost token list.
//!
//! Pipeline: [`search`] probes matches per position, [`graph`] turns them
//! into a span DAG, [`parse`] runs a shortest path over it, and [`emit`]
//! wraps the winning token list in one of the three output framings.

pub mod boot;
pub mod constants;
pub mod emit;
pub mod graph;
pub mod parse;
pub mod search;
pub mod token;

use core::fmt;

use crate::prg::Prg;
use self::token::Token;

/// Phase callback, invoked between encoder phases on the calling thread.
/// It must not mutate encoder state.
pub type Progress<'a> = Option<&'a dyn Fn(&str)>;

pub(crate) fn report(progress: Progress<'_>, phase: &str) {
    if let Some(callback) = progress {
        callback(phase);
    }
}

/// Encoder-side failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrunchError {
    /// The crunched stream cannot fit the 6502 address space.
    InputTooLarge,
    /// In-place mode needs at least one payload byte to seed its header.
    EmptyInput,
}

impl fmt::Display for CrunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrunchError::InputTooLarge => {
                write!(f, "input too large to fit the 6502 address space")
            }
            CrunchError::EmptyInput => write!(f, "cannot crunch an empty file in place"),
        }
    }
}

impl std::error::Error for CrunchError {}

/// Outcome of the optimal parse over one buffer.
pub struct TokenStream {
    /// Tokens in stream order, tiling the buffer exactly.
    pub tokens: Vec<Token>,
    /// The zero-run span every `ZeroRun` token expands to.
    pub optimal_run: usize,
    /// Total scaled cost of the winning path.
    pub cost: u64,
}

/// Run the optimal parse over `src`.
pub fn parse_optimal(src: &[u8], progress: Progress<'_>) -> TokenStream {
    let optimal_run = search::optimal_zero_run(src);
    let dag = graph::build(src, optimal_run, progress);
    let outcome = parse::shortest_path(&dag, progress);
    TokenStream {
        tokens: outcome.tokens,
        optimal_run,
        cost: outcome.cost,
    }
}

/// Crunch `src` into a RAW stream.
pub fn crunch_raw(src: &[u8], progress: Progress<'_>) -> Vec<u8> {
    let stream = parse_optimal(src, progress);
    emit::raw(src, &stream)
}

/// Crunch a PRG into a self-extracting PRG that jumps to `jmp_to`.
pub fn crunch_sfx(prg: &Prg, jmp_to: u16, progress: Progress<'_>) -> Result<Vec<u8>, CrunchError> {
    let stream = parse_optimal(&prg.data, progress);
    emit::sfx(&prg.data, &stream, prg.load_addr, jmp_to)
}

/// Crunch a PRG into the in-place layout.
///
/// The first payload byte travels uncompressed in the header; the parse
/// covers the rest of the buffer.
pub fn crunch_inplace(prg: &Prg, progress: Progress<'_>) -> Result<Vec<u8>, CrunchError> {
    let (first, body) = match prg.data.split_first() {
        Some((first, body)) => (*first, body),
        None => return Err(CrunchError::EmptyInput),
    };
    let stream = parse_optimal(body, progress);
    Ok(emit::inplace(first, body, &stream, prg.load_addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_reports_all_four_phases() {
        use std::cell::RefCell;
        let phases: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let callback = |phase: &str| phases.borrow_mut().push(phase.to_owned());
        let _ = parse_optimal(b"hello hello", Some(&callback));
        assert_eq!(
            *phases.borrow(),
            [
                "populating LZ layer",
                "closing gaps",
                "populating graph",
                "computing shortest path"
            ]
        );
    }

    #[test]
    fn inplace_rejects_an_empty_payload() {
        let prg = Prg { load_addr: 0x0801, data: Vec::new() };
        assert!(matches!(
            crunch_inplace(&prg, None),
            Err(CrunchError::EmptyInput)
        ));
    }

    #[test]
    fn inplace_handles_a_single_byte_payload() {
        let prg = Prg { load_addr: 0x0801, data: vec![0xEA] };
        let out = crunch_inplace(&prg, None).unwrap();
        assert_eq!(out, vec![0x01, 0x08, 0x3F, 0xEA, 0x20]);
    }
}
