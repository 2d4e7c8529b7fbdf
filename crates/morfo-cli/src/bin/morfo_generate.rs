// morfo-generate: word form generation.
//
// ITEM is a dictionary item id (`elma_Noun`), a stem surface (`kitab`) or
// a lemma (`yapmak`). MORPHEME names follow the analysis output (`A3pl`).
//
// Usage:
//   morfo-generate [--dict PATH] [--json] [-v] ITEM MORPHEME...

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use morfo_cli::GeneratedJson;
use morfo_tr::morphology::parse_morphemes;
use morfo_tr::{Generated, MorphologyError, TurkishMorphology};

#[derive(Parser, Debug)]
#[command(name = "morfo-generate", about = "Generate Turkish word forms from a stem and morphemes")]
struct Args {
    /// Lexicon file (text or binary). Same lookup order as morfo-analyze.
    #[arg(short = 'd', long)]
    dict: Option<PathBuf>,

    /// Print one JSON object per generated form.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Item id, stem surface or lemma.
    item: String,

    /// Morpheme names, in order.
    morphemes: Vec<String>,
}

fn generate(m: &TurkishMorphology, args: &Args) -> Result<Vec<Generated>, MorphologyError> {
    let names: Vec<&str> = args.morphemes.iter().map(String::as_str).collect();
    if m.lexicon().contains_id(&args.item) {
        return m.generate_by_ids(&args.item, &names);
    }
    let morphemes = parse_morphemes(&names)?;
    Ok(m.generate_from_stem(&args.item, &morphemes)?)
}

fn print(results: &[Generated], json: bool, out: &mut impl Write) -> io::Result<()> {
    for r in results {
        if json {
            let line = serde_json::to_string(&GeneratedJson::from(r)).map_err(io::Error::other)?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{}\t{}", r.surface, r.analysis)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    morfo_cli::init_logging(args.verbose).unwrap_or_else(|e| morfo_cli::fatal(&e.to_string()));

    let m = morfo_cli::load_morphology(args.dict.as_deref()).unwrap_or_else(|e| morfo_cli::fatal(&e));
    let results = generate(&m, &args).unwrap_or_else(|e| morfo_cli::fatal(&e.to_string()));
    if results.is_empty() {
        eprintln!("{}: no form for {}", args.item, args.morphemes.join("+"));
        std::process::exit(2);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = print(&results, args.json, &mut out).and_then(|()| out.flush()) {
        morfo_cli::fatal(&format!("output failed: {e}"));
    }
}
