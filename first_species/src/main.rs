// First-species counterpoint generator: CLI entry point.
//
// Loads a cantus firmus catalog, composes a counterpoint for the selected
// entry, and writes both voices to MIDI.
// The pipeline: catalog → clef placement → search → cadence inflection → MIDI.
//
// Usage:
//   cargo run -p first_species -- [CATALOG] [--list] [--index N]
//     [--voice above|below] [--output FILE] [--config FILE]
//     [--max-nodes N | --exhaustive]
//
// The search stops after DEFAULT_NODE_BUDGET prefixes unless --max-nodes or
// the config file sets a budget, or --exhaustive lifts it. Set RUST_LOG=debug
// to watch the search improve its best line.

use clap::Parser;
use first_species::catalog::load_catalog;
use first_species::compose::{compose, default_output_name};
use first_species::config::GeneratorConfig;
use first_species::voice::VoicePosition;
use first_species::{Error, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Compose first-species counterpoint against a cantus firmus")]
struct Args {
    /// Cantus firmus catalog (author;species;tonic;mode;notes per line).
    #[arg(default_value = "data/cantus_firmi.txt")]
    catalog: PathBuf,

    /// Print the numbered catalog and exit.
    #[arg(long)]
    list: bool,

    /// 1-based catalog entry to use.
    #[arg(long, default_value_t = 1)]
    index: usize,

    /// Where the counterpoint sings relative to the cantus firmus.
    #[arg(long, default_value = "above")]
    voice: VoicePosition,

    /// Output MIDI path. Defaults to a name derived from the exercise.
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON config file (see config.rs).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cap on evaluated search nodes; overrides the config. Without either,
    /// the search stops after 20,000,000 nodes.
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Search the whole tree with no node cap. Can take hours on long cantus firmi.
    #[arg(long, conflicts_with = "max_nodes")]
    exhaustive: bool,
}

fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;

    if args.list {
        for (i, cantus) in catalog.iter().enumerate() {
            println!("{}) {}", i + 1, cantus);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.search = config.search.bounded(args.max_nodes, args.exhaustive);

    let cantus = args
        .index
        .checked_sub(1)
        .and_then(|i| catalog.get(i))
        .ok_or(Error::NoSuchEntry {
            index: args.index,
            len: catalog.len(),
        })?;

    println!("=== First-Species Counterpoint ===");
    println!("Cantus: {}", cantus);
    println!("Counterpoint voice: {}", args.voice);
    println!();

    let composition = compose(cantus, args.voice, &config)?;
    if composition.budget_exhausted {
        println!("Node budget reached after {} nodes; result may not be optimal.", composition.nodes);
    }

    let line: Vec<String> = composition.counterpoint_notes().iter().map(|p| p.to_string()).collect();
    println!("Counterpoint: {}  Score: {}", line.join(" "), composition.counterpoint.score);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_output_name(cantus, args.voice)));
    composition.write_midi(&config, &output)?;
    println!("Wrote {}", output.display());
    Ok(())
}
