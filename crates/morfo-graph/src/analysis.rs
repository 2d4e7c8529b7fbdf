// Analysis and generation results

use std::fmt;
use std::sync::Arc;

use morfo_core::{DictionaryItem, PrimaryPos};

use crate::Morpheme;

/// A morpheme with the surface it was realized as (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphemeData<M> {
    pub morpheme: M,
    pub surface: String,
}

impl<M> MorphemeData<M> {
    pub fn new(morpheme: M, surface: impl Into<String>) -> Self {
        Self {
            morpheme,
            surface: surface.into(),
        }
    }
}

impl<M: Morpheme> fmt::Display for MorphemeData<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.surface.is_empty() {
            f.write_str(self.morpheme.id())
        } else {
            write!(f, "{}:{}", self.surface, self.morpheme.id())
        }
    }
}

/// One decomposition of a word: an item and the morphemes after it.
///
/// The first morpheme is the stem's root morpheme and carries the stem
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleAnalysis<M> {
    item: Arc<DictionaryItem>,
    morphemes: Vec<MorphemeData<M>>,
}

impl<M: Morpheme> SingleAnalysis<M> {
    pub fn new(item: Arc<DictionaryItem>, morphemes: Vec<MorphemeData<M>>) -> Self {
        Self { item, morphemes }
    }

    pub fn item(&self) -> &Arc<DictionaryItem> {
        &self.item
    }

    pub fn morpheme_data(&self) -> &[MorphemeData<M>] {
        &self.morphemes
    }

    pub fn morphemes(&self) -> Vec<M> {
        self.morphemes.iter().map(|d| d.morpheme).collect()
    }

    pub fn contains_morpheme(&self, m: M) -> bool {
        self.morphemes.iter().any(|d| d.morpheme == m)
    }

    /// Surface of the stem.
    pub fn stem(&self) -> &str {
        self.morphemes.first().map(|d| d.surface.as_str()).unwrap_or_default()
    }

    /// Concatenated surfaces of every suffix.
    pub fn ending(&self) -> String {
        self.morphemes.iter().skip(1).map(|d| d.surface.as_str()).collect()
    }

    /// The whole analyzed surface form.
    pub fn surface_form(&self) -> String {
        self.morphemes.iter().map(|d| d.surface.as_str()).collect()
    }

    /// Inflectional groups; each derivational morpheme starts a new one.
    pub fn groups(&self) -> Vec<&[MorphemeData<M>]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for (i, d) in self.morphemes.iter().enumerate() {
            if i > 0 && d.morpheme.is_derivational() {
                groups.push(&self.morphemes[start..i]);
                start = i;
            }
        }
        if start < self.morphemes.len() {
            groups.push(&self.morphemes[start..]);
        }
        groups
    }

    /// Part of speech of the last inflectional group.
    pub fn pos(&self) -> PrimaryPos {
        self.groups()
            .last()
            .and_then(|g| g.iter().find_map(|d| d.morpheme.pos()))
            .unwrap_or(self.item.primary_pos)
    }
}

impl<M: Morpheme> fmt::Display for SingleAnalysis<M> {
    /// `[lemma:Pos] stem:Pos+suffix:Morpheme|derivation:Morpheme→Pos+...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}", self.item.lemma, self.item.primary_pos)?;
        if self.item.secondary_pos != morfo_core::SecondaryPos::None {
            write!(f, ",{}", self.item.secondary_pos)?;
        }
        f.write_str("] ")?;
        for (gi, group) in self.groups().into_iter().enumerate() {
            if gi > 0 {
                f.write_str("|")?;
            }
            let mut parts = group.iter().peekable();
            let mut first = true;
            while let Some(d) = parts.next() {
                if !first {
                    f.write_str("+")?;
                }
                first = false;
                write!(f, "{d}")?;
                // A derivation followed by an empty POS morpheme prints as `→Pos`.
                if gi > 0 && d.morpheme.is_derivational() {
                    if let Some(next) = parts.peek() {
                        if next.surface.is_empty() && next.morpheme.pos().is_some() {
                            write!(f, "→{}", next.morpheme.id())?;
                            parts.next();
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// A generated word with the analysis describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult<M> {
    pub surface: String,
    pub analysis: SingleAnalysis<M>,
}

impl<M: Morpheme> fmt::Display for GenerationResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.surface, self.analysis)
    }
}
