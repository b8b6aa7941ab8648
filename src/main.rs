use clap::Parser;
use jbo_english::{Lexicon, RawNode, Translator, annotate};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::Level;

/// Render a camxes parse tree (JSON) of Lojban text as English
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the parse tree; read from stdin when absent
    #[arg(help = "Path to the JSON parse tree")]
    input: Option<PathBuf>,

    /// Extra lexicon entries, overlaid on the built-in lexicon
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Print the numbered typed tree as JSON instead of translating
    #[arg(long)]
    dump_tree: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let raw: RawNode = serde_json::from_str(&source)?;

    if cli.dump_tree {
        let tree = annotate(&raw)?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let mut lexicon = Lexicon::builtin();
    if let Some(path) = &cli.lexicon {
        lexicon.extend(Lexicon::from_file(path)?);
        tracing::debug!(gismu = lexicon.gismu_count(), "loaded lexicon overlay");
    }

    let translator = Translator::new(lexicon);
    println!("{}", translator.translate(&raw)?);

    Ok(())
}
