//! aie-bcf: translate AIE device descriptions to BCF linker scripts

use std::env;
use std::fs::File;
use std::io::{self, Write};

use aie_bcf::bcf::{translate_bcf, Translation};
use aie_bcf::device::{Description, TileId};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut path = None;
    let mut tile_arg = None;
    let mut out_path = None;

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tile" | "-t" => tile_arg = iter.next().map(|s| s.as_str()),
            "-o" | "--output" => out_path = iter.next().map(|s| s.as_str()),
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if !arg.starts_with('-') => path = Some(arg.as_str()),
            _ => anyhow::bail!("unknown option: {arg} (try --help)"),
        }
    }

    let (path, tile_arg) = match (path, tile_arg) {
        (Some(p), Some(t)) => (p, t),
        _ => {
            print_usage();
            anyhow::bail!("expected a description file and --tile COL,ROW");
        }
    };

    let target = parse_tile(tile_arg)?;
    let description = Description::from_file(path)?;

    let outcome = match out_path {
        Some(out_path) => {
            let mut out = File::create(out_path)?;
            translate_bcf(&description, target, &mut out)?
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let outcome = translate_bcf(&description, target, &mut out)?;
            out.flush()?;
            outcome
        }
    };

    match outcome {
        Translation::Emitted { lines } => {
            log::info!("emitted {lines} directives for {target}");
        }
        Translation::NoMatch => {
            log::warn!("no tile matches {target}; nothing emitted");
        }
    }

    Ok(())
}

/// Parse "COL,ROW" into a tile identity.
fn parse_tile(text: &str) -> anyhow::Result<TileId> {
    let (col, row) = text
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected COL,ROW, got: {text}"))?;
    Ok(TileId::new(col.trim().parse()?, row.trim().parse()?))
}

fn print_usage() {
    println!("Usage: aie-bcf <description.toml> --tile COL,ROW [-o FILE]");
    println!();
    println!("Translate an AIE device description into a BCF linker script");
    println!("for the core at the given tile coordinates.");
    println!();
    println!("Options:");
    println!("  -t, --tile COL,ROW   target tile coordinates (required)");
    println!("  -o, --output FILE    write BCF to FILE instead of stdout");
    println!("  -h, --help           show this help");
}
