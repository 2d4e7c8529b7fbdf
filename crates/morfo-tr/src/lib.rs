//! Turkish morphology on top of the `morfo-graph` engine.
//!
//! # Architecture
//!
//! - [`morphotactics`] -- Morpheme catalog and the Turkish suffix graph
//! - [`stems`] -- Stem transitions for dictionary items (voicing, vowel drop, compounds)
//! - [`dictionary`] -- Text and binary lexicon loaders
//! - [`morphology`] -- The `TurkishMorphology` facade
//!
//! # Feature flags
//!
//! - `bundled-lexicon` (default) -- embeds `data/lexicon.txt`
//! - `binary` (default) -- binary lexicon reader/writer

pub mod dictionary;
pub mod morphology;
pub mod morphotactics;
pub mod stems;

use morfo_core::TagParseError;
use morfo_graph::{GenerationError, GraphError};

pub use morphology::{MorphologyOptions, TurkishMorphology, WordAnalysis};
pub use morphotactics::{TurkishMorpheme, TurkishMorphotactics};

/// Type alias for an analysis over the Turkish morpheme catalog.
pub type Analysis = morfo_graph::SingleAnalysis<TurkishMorpheme>;

/// Type alias for a generated word over the Turkish morpheme catalog.
pub type Generated = morfo_graph::GenerationResult<TurkishMorpheme>;

/// Errors raised while loading a lexicon. Loading is all or nothing.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: {source}")]
    UnknownTag {
        line: usize,
        #[source]
        source: TagParseError,
    },

    #[error("line {line}: verb lemma {lemma:?} does not end with -mak/-mek")]
    InvalidVerb { line: usize, lemma: String },

    #[error("line {line}: voicing does not apply to {lemma:?}")]
    ImproperVoicing { line: usize, lemma: String },

    #[error("line {line}: reference {id:?} does not name an item")]
    UnresolvedReference { line: usize, id: String },

    #[error("line {line}: compound root {root:?} of {lemma:?} is not in the dictionary")]
    UnresolvedRoots { line: usize, lemma: String, root: String },

    #[error("binary lexicon: bad magic number")]
    BadMagic,

    #[error("binary lexicon: unsupported version {0}")]
    UnsupportedVersion(u16),

    #[error("binary lexicon: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("binary lexicon: record {record}: {message}")]
    BadRecord { record: usize, message: String },

    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors of the `TurkishMorphology` facade.
#[derive(Debug, thiserror::Error)]
pub enum MorphologyError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("failed to build morphotactics: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("unknown dictionary item id: {0}")]
    UnknownItem(String),
}
