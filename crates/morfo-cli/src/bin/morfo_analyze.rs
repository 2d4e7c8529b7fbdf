// morfo-analyze: morphological analysis of Turkish words.
//
// Analyzes the WORD arguments, or words from stdin (one per line) when
// none are given. Each analysis is printed on its own line.
//
// Usage:
//   morfo-analyze [--dict PATH] [--json] [--debug] [-v] [WORD...]

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use morfo_cli::WordJson;
use morfo_graph::DebugRecorder;
use morfo_tr::TurkishMorphology;

#[derive(Parser, Debug)]
#[command(name = "morfo-analyze", about = "Morphological analysis of Turkish words")]
struct Args {
    /// Lexicon file (text or binary). Defaults to MORFO_DICT_PATH, ~/.morfo/lexicon.txt, ./lexicon.txt, then the bundled lexicon.
    #[arg(short = 'd', long)]
    dict: Option<PathBuf>,

    /// Print one JSON object per word.
    #[arg(long)]
    json: bool,

    /// Print every accepted and rejected search path.
    #[arg(long)]
    debug: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Words to analyze. Reads stdin when empty.
    words: Vec<String>,
}

fn analyze_word(word: &str, m: &TurkishMorphology, args: &Args, out: &mut impl Write) -> io::Result<()> {
    let mut recorder = DebugRecorder::new();
    let analyses = if args.debug {
        m.analyze_observed(word, &mut recorder)
    } else {
        m.analyze(word)
    };

    if args.json {
        let line = serde_json::to_string(&WordJson::new(word, &analyses)).map_err(io::Error::other)?;
        writeln!(out, "{line}")?;
    } else if analyses.is_empty() {
        writeln!(out, "{word}: (no analysis)")?;
    } else {
        writeln!(out, "{word}:")?;
        for a in &analyses {
            writeln!(out, "  {a}")?;
        }
    }
    if args.debug {
        write!(out, "{recorder}")?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    morfo_cli::init_logging(args.verbose).unwrap_or_else(|e| morfo_cli::fatal(&e.to_string()));

    let m = morfo_cli::load_morphology(args.dict.as_deref()).unwrap_or_else(|e| morfo_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = if args.words.is_empty() {
        io::stdin().lock().lines().try_for_each(|line| {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                return Ok(());
            }
            analyze_word(word, &m, &args, &mut out)
        })
    } else {
        args.words.iter().try_for_each(|w| analyze_word(w, &m, &args, &mut out))
    };
    if let Err(e) = result.and_then(|()| out.flush()) {
        morfo_cli::fatal(&format!("output failed: {e}"));
    }
}
