//! Binary entry point for the `tscrunch` command-line tool.

use tscrunch::cli::args::parse_args;
use tscrunch::cli::constants::set_display_level;
use tscrunch::cli::help::print_usage;
use tscrunch::displaylevel;
use tscrunch::io::crunch_filename;

fn main() {
    std::process::exit(run());
}

/// Returns the process exit code (0 = success).
fn run() -> i32 {
    let parsed = match parse_args() {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return 1;
        }
        Err(err) => {
            eprintln!("tscrunch: {err}");
            print_usage();
            return 1;
        }
    };

    if parsed.quiet {
        set_display_level(1);
    }

    match crunch_filename(&parsed.input, &parsed.output, parsed.mode) {
        Ok(()) => 0,
        Err(err) => {
            displaylevel!(1, "tscrunch: {:#}\n", err);
            1
        }
    }
}
