//! File-level operations behind the CLI: read the input, run the encoder,
//! write the output, report sizes.

use std::fs;

use anyhow::{Context, Result};

use crate::cli::args::Mode;
use crate::crunch;
use crate::displaylevel;
use crate::prg::Prg;

/// Crunch `input` into `output` according to `mode`.
pub fn crunch_filename(input: &str, output: &str, mode: Mode) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("cannot read input file {input}"))?;
    let source_len = raw.len();

    let progress = |phase: &str| displaylevel!(2, "{}\n", phase);
    let progress: crunch::Progress<'_> = Some(&progress);

    let crunched = match mode {
        Mode::Raw => crunch::crunch_raw(&raw, progress),
        Mode::Prg => {
            let prg = Prg::from_bytes(&raw)?;
            crunch::crunch_raw(&prg.data, progress)
        }
        Mode::Sfx { jmp } => {
            let prg = Prg::from_bytes(&raw)?;
            crunch::crunch_sfx(&prg, jmp, progress)?
        }
        Mode::InPlace => {
            let prg = Prg::from_bytes(&raw)?;
            crunch::crunch_inplace(&prg, progress)?
        }
    };

    fs::write(output, &crunched)
        .with_context(|| format!("cannot write output file {output}"))?;

    displaylevel!(2, "input file : {}, {} bytes\n", input, source_len);
    displaylevel!(2, "output file: {}, {} bytes\n", output, crunched.len());
    if source_len > 0 {
        let ratio = crunched.len() as f64 * 100.0 / source_len as f64;
        displaylevel!(2, "crunched to {:.2}% of original size\n", ratio);
    }
    Ok(())
}
