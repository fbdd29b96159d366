//! Command-line front end for the parser and evaluator: parses a source
//! file, optionally dumps its tree, and optionally runs the constant folder
//! over every function call it finds (§10.D).

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser as ClapParser;

/// Parses (and optionally folds) a VHDL-like source file.
#[derive(ClapParser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Source file to parse
    #[clap(value_parser)]
    file: PathBuf,

    /// Print the parsed tree
    #[clap(long)]
    dump_tree: bool,

    /// Run the constant folder over every function call in the tree
    #[clap(long)]
    fold: bool,

    /// Raise the log level to trace
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).init();

    let (mut arena, units) = commands::parse::run(&args.file)?;

    if args.dump_tree {
        commands::parse::dump_tree(&arena, &units);
    }

    if args.fold {
        commands::fold::run(&mut arena, &units)?;
        if args.dump_tree {
            println!("--- after folding ---");
            commands::parse::dump_tree(&arena, &units);
        }
    }

    Ok(())
}
