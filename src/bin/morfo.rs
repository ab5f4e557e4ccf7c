//! Morfo CLI binary.
//!
//! Analyzes Turkish words against the built-in graph and lexicon. Words
//! come from the command line or, when none are given, from stdin.

use std::io::{self, BufRead};
use std::process;

use clap::Parser;

use morfo::analysis::{AnalyzerConfig, MorphAnalyzer, TraceEvent};
use morfo::error::Result;
use morfo::turkish;

#[derive(Parser)]
#[command(name = "morfo", version, about = "Rule-based Turkish morphological analysis")]
struct Args {
    /// Words to analyze; reads whitespace-separated words from stdin when
    /// empty.
    words: Vec<String>,

    /// Match stems and suffixes through ASCII diacritic folding.
    #[arg(long)]
    ascii: bool,

    /// Print every explored search path with its fate.
    #[arg(long)]
    trace: bool,

    /// Emit analyses as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = AnalyzerConfig::new().with_ascii_tolerance(args.ascii);
    let analyzer =
        MorphAnalyzer::with_config(turkish::morphotactics()?, &turkish::lexicon()?, config)?;

    if args.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            for word in line.split_whitespace() {
                report(&analyzer, word, args)?;
            }
        }
    } else {
        for word in &args.words {
            report(&analyzer, word, args)?;
        }
    }
    Ok(())
}

fn report(analyzer: &MorphAnalyzer, word: &str, args: &Args) -> Result<()> {
    let analyses = if args.trace {
        let (analyses, trace) = analyzer.analyze_with_trace(word);
        eprintln!("# seeds for '{word}':");
        for seed in &trace.seeds {
            eprintln!("#   {seed}");
        }
        for event in &trace.events {
            match event {
                TraceEvent::Rejected {
                    path,
                    transition,
                    reason,
                } => eprintln!("#   reject {path} via {transition}: {reason:?}"),
                TraceEvent::Advanced { path } => eprintln!("#   live   {path}"),
                TraceEvent::Accepted { path } => eprintln!("#   accept {path}"),
                TraceEvent::Pruned { path } => eprintln!("#   prune  {path}"),
            }
        }
        analyses
    } else {
        analyzer.analyze(word)
    };

    if args.json {
        let summaries: Vec<_> = analyses.iter().map(|a| a.summary()).collect();
        println!("{}", serde_json::to_string(&summaries)?);
        return Ok(());
    }

    if analyses.is_empty() {
        println!("{word}: no analysis");
    } else {
        println!("{word}:");
        for analysis in &analyses {
            println!("  {analysis}");
        }
    }
    Ok(())
}
