//! Morpheme-state graph and the search engine built on it.
//!
//! This crate is language independent. A grammar supplies a closed
//! [`Morpheme`] catalog (usually an enum), builds a [`MorphemeGraph`] with a
//! [`GraphBuilder`], and registers stems in a [`StemIndex`]. Analysis and
//! generation then run the same frontier search over read-only data.
//!
//! # Architecture
//!
//! - [`template`] -- Suffix surface templates and allomorph rendering
//! - [`condition`] -- Transition conditions over a search path
//! - [`graph`] -- Morpheme states, suffix transitions, graph builder
//! - [`stem`] -- Stem transitions and the prefix/item stem index
//! - [`path`] -- The persistent search path
//! - [`observer`] -- Debug hooks for rejected paths
//! - [`search`] -- Word analyzer and word generator
//! - [`analysis`] -- Analysis and generation results

pub mod analysis;
pub mod condition;
pub mod graph;
pub mod observer;
pub mod path;
pub mod search;
pub mod stem;
pub mod template;

use std::fmt;
use std::hash::Hash;

use morfo_core::PrimaryPos;

pub use analysis::{GenerationResult, MorphemeData, SingleAnalysis};
pub use condition::Condition;
pub use graph::{GraphBuilder, MorphemeGraph, MorphemeState, StateId, SuffixTransition};
pub use observer::{DebugRecorder, NoopObserver, RejectReason, Rejection, SearchObserver};
pub use path::SearchPath;
pub use search::{SearchOptions, WordAnalyzer, WordGenerator};
pub use stem::{StemIndex, StemTransition, StemVariant};
pub use template::{SuffixTemplate, TemplateToken};

/// Default bound on how often a path may revisit one state before pruning.
pub const MAX_REPEATING_STATE_COUNT: usize = 3;

/// Default frontier size above which cyclic paths are pruned.
pub const PRUNE_THRESHOLD: usize = 30;

/// A morpheme tag of a closed catalog.
pub trait Morpheme: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every morpheme of the catalog.
    fn all() -> &'static [Self];

    /// Short unique name, e.g. `A3pl`.
    fn id(self) -> &'static str;

    /// Whether the morpheme starts a new inflectional group.
    fn is_derivational(self) -> bool;

    /// The part of speech this morpheme denotes, for POS root morphemes.
    fn pos(self) -> Option<PrimaryPos> {
        None
    }

    /// Look up a morpheme by its id.
    fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.id() == id)
    }
}

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("invalid suffix template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
    #[error("duplicate state name: {0}")]
    DuplicateState(String),
    #[error("unknown state id: {0}")]
    UnknownState(u32),
    #[error("epsilon cycle through state {0}")]
    EpsilonCycle(String),
}

/// Errors raised by generation. Never used for "no result".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("unknown morpheme: {0}")]
    UnknownMorpheme(String),
    #[error("generated path consumed morphemes {actual:?}, requested {expected:?}")]
    MorphemeMismatch {
        expected: Vec<&'static str>,
        actual: Vec<&'static str>,
    },
}
