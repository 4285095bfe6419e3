//! Usage text.

use crate::cli::constants::{AUTHOR, PROGRAM_NAME};

/// Print brief usage to stderr.
pub fn print_usage() {
    eprintln!("{PROGRAM_NAME} binary cruncher, by {AUTHOR}");
    eprintln!("usage: {PROGRAM_NAME} [-p] [-i] [-q] [-x $addr] infile outfile");
    eprintln!(" -p       : input file is a prg, first 2 bytes are the load address");
    eprintln!(" -x $addr : create a self extracting file, jumping to $addr after decrunch (implies -p)");
    eprintln!(" -i       : in-place crunching (implies -p)");
    eprintln!(" -q       : quiet mode");
}
