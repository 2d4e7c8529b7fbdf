// morfo-cli: shared utilities for the CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use morfo_tr::{Analysis, Generated, MorphologyError, TurkishMorphology};
use serde::Serialize;

/// Lexicon file name looked up in the default locations.
const LEXICON_FILE: &str = "lexicon.txt";

/// Environment variable naming a lexicon file.
pub const DICT_ENV: &str = "MORFO_DICT_PATH";

/// Search for a lexicon and build the morphology.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `MORFO_DICT_PATH` environment variable
/// 3. `~/.morfo/lexicon.txt`
/// 4. `lexicon.txt` in the current directory
/// 5. The lexicon bundled with morfo-tr
///
/// An explicitly given path that does not exist is an error.
pub fn load_morphology(dict_path: Option<&Path>) -> Result<TurkishMorphology, String> {
    if let Some(path) = dict_path {
        if !path.is_file() {
            return Err(format!("dictionary {} not found", path.display()));
        }
        return load_file(path);
    }
    for path in search_paths() {
        if path.is_file() {
            return load_file(&path);
        }
    }
    log::info!("no lexicon file found, using the bundled lexicon");
    TurkishMorphology::bundled().map_err(|e| format!("failed to load bundled lexicon: {e}"))
}

fn load_file(path: &Path) -> Result<TurkishMorphology, String> {
    log::info!("loading lexicon from {}", path.display());
    let data = std::fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    TurkishMorphology::from_bytes(&data)
        .map_err(|e: MorphologyError| format!("failed to load {}: {e}", path.display()))
}

/// Default lexicon locations, most specific first.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = std::env::var(DICT_ENV) {
        paths.push(PathBuf::from(env_path));
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(".morfo").join(LEXICON_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LEXICON_FILE));
    }
    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Map the number of `-v` flags to a level filter.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. Fails if a logger is already installed.
pub fn init_logging(verbose: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(verbosity_level(verbose));
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MorphemeJson {
    pub morpheme: &'static str,
    pub surface: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisJson {
    pub item: String,
    pub lemma: String,
    pub pos: String,
    pub stem: String,
    pub ending: String,
    pub morphemes: Vec<MorphemeJson>,
    pub formatted: String,
}

impl From<&Analysis> for AnalysisJson {
    fn from(a: &Analysis) -> Self {
        Self {
            item: a.item().id().to_string(),
            lemma: a.item().lemma.clone(),
            pos: a.pos().short_form().to_string(),
            stem: a.stem().to_string(),
            ending: a.ending(),
            morphemes: a
                .morpheme_data()
                .iter()
                .map(|d| MorphemeJson {
                    morpheme: morfo_graph::Morpheme::id(d.morpheme),
                    surface: d.surface.clone(),
                })
                .collect(),
            formatted: a.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordJson {
    pub input: String,
    pub analyses: Vec<AnalysisJson>,
}

impl WordJson {
    pub fn new(input: &str, analyses: &[Analysis]) -> Self {
        Self {
            input: input.to_string(),
            analyses: analyses.iter().map(AnalysisJson::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedJson {
    pub surface: String,
    pub analysis: AnalysisJson,
}

impl From<&Generated> for GeneratedJson {
    fn from(g: &Generated) -> Self {
        Self {
            surface: g.surface.clone(),
            analysis: AnalysisJson::from(&g.analysis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morfo_tr::TurkishMorpheme as T;

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_level(0), LevelFilter::Warn);
        assert_eq!(verbosity_level(1), LevelFilter::Info);
        assert_eq!(verbosity_level(2), LevelFilter::Debug);
        assert_eq!(verbosity_level(7), LevelFilter::Trace);
    }

    #[test]
    fn logger_installs_once() {
        init_logging(2).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(init_logging(0).is_err());
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }

    #[test]
    fn missing_explicit_dictionary_is_an_error() {
        let err = load_morphology(Some(Path::new("/nonexistent/morfo/lexicon.txt"))).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn analysis_json_shape() {
        let m = TurkishMorphology::from_text("elma").unwrap();
        let analyses = m.analyze("elmalı");
        let word = WordJson::new("elmalı", &analyses);
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["input"], "elmalı");
        let first = &value["analyses"][0];
        assert_eq!(first["item"], "elma_Noun");
        assert_eq!(first["lemma"], "elma");
        assert_eq!(first["pos"], "Adj");
        assert_eq!(first["stem"], "elma");
        assert_eq!(first["ending"], "lı");
        assert_eq!(first["morphemes"][0]["morpheme"], "Noun");
        assert_eq!(first["morphemes"][0]["surface"], "elma");
    }

    #[test]
    fn generated_json_shape() {
        let m = TurkishMorphology::from_text("elma").unwrap();
        let item = m.lexicon().by_id("elma_Noun").unwrap();
        let out = m.generate(item, &[T::A3pl, T::P1pl]).unwrap();
        let value = serde_json::to_value(GeneratedJson::from(&out[0])).unwrap();
        assert_eq!(value["surface"], "elmalarımız");
        assert_eq!(value["analysis"]["item"], "elma_Noun");
    }
}
