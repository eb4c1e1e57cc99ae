use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use inkdown::cli::Cli;
use inkdown::{Renderer, config};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let options = cli.into_options(config::load());
    let mut renderer = Renderer::new(options);
    let mut stdout = io::stdout().lock();

    for line in input.lines() {
        for rendered in renderer.render_line(line) {
            writeln!(stdout, "{rendered}")?;
        }
    }
    for rendered in renderer.finish() {
        writeln!(stdout, "{rendered}")?;
    }

    Ok(())
}
