//! Argument parsing for the `tscrunch` binary.
//!
//! [`parse_args_from`] takes an explicit slice so it is callable from tests
//! without touching `std::env`. Bad or conflicting options return an `Err`
//! whose message begins with `"bad usage: "`; a help request or too few
//! file arguments return `Ok(None)`, telling the caller to print usage.

use anyhow::{anyhow, bail, Result};

/// How the input is read and the output framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw input, RAW stream out.
    Raw,
    /// PRG input, RAW stream out.
    Prg,
    /// PRG input, self-extracting PRG out, jumping to `jmp` when done.
    Sfx { jmp: u16 },
    /// PRG input, in-place layout out.
    InPlace,
}

/// Everything the dispatch phase needs.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedArgs {
    pub mode: Mode,
    pub quiet: bool,
    pub input: String,
    pub output: String,
}

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> Result<Option<ParsedArgs>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Parse an explicit argument list.
pub fn parse_args_from(argv: &[String]) -> Result<Option<ParsedArgs>> {
    let mut prg = false;
    let mut inplace = false;
    let mut quiet = false;
    let mut jmp: Option<u16> = None;
    let mut files: Vec<String> = Vec::new();

    let mut arguments = argv.iter();
    while let Some(argument) = arguments.next() {
        match argument.as_str() {
            "-h" => return Ok(None),
            "-p" => prg = true,
            "-i" => inplace = true,
            "-q" => quiet = true,
            "-x" => {
                let operand = arguments
                    .next()
                    .ok_or_else(|| anyhow!("bad usage: -x needs a jump address"))?;
                jmp = Some(parse_hex_addr(operand)?);
            }
            other if other.starts_with('-') && other.len() > 1 => {
                bail!("bad usage: unknown option {other}");
            }
            file => files.push(file.to_owned()),
        }
    }

    if jmp.is_some() && inplace {
        bail!("bad usage: -x and -i are mutually exclusive");
    }
    if files.len() > 2 {
        bail!("bad usage: too many file arguments");
    }
    let (output, input) = (files.pop(), files.pop());
    let (Some(input), Some(output)) = (input, output) else {
        return Ok(None);
    };

    let mode = match (jmp, inplace, prg) {
        (Some(jmp), _, _) => Mode::Sfx { jmp },
        (None, true, _) => Mode::InPlace,
        (None, false, true) => Mode::Prg,
        (None, false, false) => Mode::Raw,
    };

    Ok(Some(ParsedArgs { mode, quiet, input, output }))
}

/// Parse a `-x` jump address: hex digits with an optional leading `$`.
pub fn parse_hex_addr(operand: &str) -> Result<u16> {
    let digits = operand.trim_start_matches('$');
    u16::from_str_radix(digits, 16)
        .map_err(|_| anyhow!("invalid jump address {operand}: expected hex like $c000"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn plain_invocation_is_raw_mode() {
        let parsed = parse_args_from(&argv(&["in.bin", "out.tsc"])).unwrap().unwrap();
        assert_eq!(parsed.mode, Mode::Raw);
        assert!(!parsed.quiet);
        assert_eq!(parsed.input, "in.bin");
        assert_eq!(parsed.output, "out.tsc");
    }

    #[test]
    fn flags_select_the_mode() {
        let parsed = parse_args_from(&argv(&["-p", "in.prg", "out.tsc"])).unwrap().unwrap();
        assert_eq!(parsed.mode, Mode::Prg);

        let parsed = parse_args_from(&argv(&["-i", "in.prg", "out.prg"])).unwrap().unwrap();
        assert_eq!(parsed.mode, Mode::InPlace);

        let parsed =
            parse_args_from(&argv(&["-x", "$c000", "in.prg", "out.prg"])).unwrap().unwrap();
        assert_eq!(parsed.mode, Mode::Sfx { jmp: 0xC000 });
    }

    #[test]
    fn sfx_address_accepts_bare_hex() {
        let parsed = parse_args_from(&argv(&["-x", "80d", "a", "b"])).unwrap().unwrap();
        assert_eq!(parsed.mode, Mode::Sfx { jmp: 0x080D });
    }

    #[test]
    fn bad_hex_is_an_error() {
        assert!(parse_args_from(&argv(&["-x", "$zz", "a", "b"])).is_err());
        assert!(parse_args_from(&argv(&["-x"])).is_err());
    }

    #[test]
    fn sfx_and_inplace_conflict() {
        let err = parse_args_from(&argv(&["-x", "$c000", "-i", "a", "b"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage"));
    }

    #[test]
    fn missing_files_ask_for_usage() {
        assert!(parse_args_from(&argv(&[])).unwrap().is_none());
        assert!(parse_args_from(&argv(&["only-one"])).unwrap().is_none());
        assert!(parse_args_from(&argv(&["-h", "a", "b"])).unwrap().is_none());
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(parse_args_from(&argv(&["-z", "a", "b"])).is_err());
        assert!(parse_args_from(&argv(&["a", "b", "c"])).is_err());
    }

    #[test]
    fn quiet_flag_is_recorded() {
        let parsed = parse_args_from(&argv(&["-q", "a", "b"])).unwrap().unwrap();
        assert!(parsed.quiet);
    }
}
