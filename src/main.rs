use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result, bail};

use mython::run_program;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next();
    if args.next().is_some() {
        bail!("Only one input file is supported");
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();
    match input_path {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Opening {path}"))?;
            run_program(BufReader::new(file), &mut output)
                .with_context(|| format!("Running {path}"))?;
        }
        None => {
            run_program(io::stdin().lock(), &mut output).context("Running stdin")?;
        }
    }
    output.flush().context("Flushing stdout")?;
    Ok(())
}
