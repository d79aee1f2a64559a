//! Builds a word index of a text file and reports where the requested words occur.

use anyhow::{Context, Result};
use avl_index::index::{IndexOptions, WordIndex};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "word-index")]
#[command(about = "Index the words of a text file by line and position")]
#[command(version)]
struct Cli {
    /// Text file to index
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Word to look up (can be specified multiple times)
    #[arg(short, long = "lookup", value_name = "WORD",
          default_values = ["computer", "bob", "wikipedia", "turing"])]
    lookups: Vec<String>,

    /// Lower-case tokens before stripping non-letters
    #[arg(long, env = "WORD_INDEX_FOLD_CASE")]
    fold_case: bool,

    /// Print every indexed word with its positions before the lookups
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = IndexOptions { fold_case: cli.fold_case };

    let index = WordIndex::open(&cli.file, options)
        .with_context(|| format!("failed to index {}", cli.file.display()))?;

    if cli.dump { print!("{}", index); }

    println!("There are {} unique items in the index.", index.unique_words());

    for word in &cli.lookups {
        println!("Looking up '{}'", word);
        match index.lookup(word) {
            Some(positions) => println!("\t{}", positions),
            None => println!("\tnot found"),
        }
    }

    Ok(())
}
