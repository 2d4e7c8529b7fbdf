// Stem transitions and the stem index
//
// A stem transition connects a literal stem surface to the root state of
// its item. One item may yield several stems (kitap / kitab, ağız / ağz).

use std::sync::Arc;

use hashbrown::HashMap;
use morfo_core::{AttributeSet, DictionaryItem, RootAttribute, RootLexicon};

use crate::graph::StateId;

/// How a stem surface relates to the item's root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StemVariant {
    /// The root as written in the dictionary.
    Original,
    /// Final voiceless stop voiced (kitap -> kitab).
    Voiced,
    /// Final consonant doubled (hak -> hakk).
    Doubled,
    /// Last vowel dropped (ağız -> ağz).
    LastVowelDropped,
    /// Final vowel dropped before the progressive suffix (ara -> ar).
    ProgressiveVowelDropped,
    /// Possessive ending of a compound removed (zeytinyağı -> zeytinyağ).
    CompoundRoot,
    /// Any other irregular form supplied by a grammar.
    Special,
}

impl StemVariant {
    pub fn is_voiced(self) -> bool {
        self == StemVariant::Voiced
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemTransition {
    pub surface: String,
    pub item: Arc<DictionaryItem>,
    pub attributes: AttributeSet,
    pub state: StateId,
    pub variant: StemVariant,
}

impl StemTransition {
    pub fn new(
        surface: impl Into<String>,
        item: Arc<DictionaryItem>,
        attributes: AttributeSet,
        state: StateId,
        variant: StemVariant,
    ) -> Self {
        Self {
            surface: surface.into(),
            item,
            attributes,
            state,
            variant,
        }
    }

    /// A `NoVoicing` item never yields a voiced stem.
    pub fn is_compatible(&self) -> bool {
        !(self.variant.is_voiced() && self.item.has_attribute(RootAttribute::NoVoicing))
    }
}

/// Stem transitions indexed by surface and by item id.
///
/// Insertion order is preserved for both indexes.
#[derive(Debug, Default)]
pub struct StemIndex {
    stems: Vec<StemTransition>,
    by_surface: HashMap<String, Vec<usize>>,
    by_item: HashMap<String, Vec<usize>>,
}

impl StemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from every item of `lexicon`, using `factory` to
    /// produce each item's stems.
    pub fn build<F>(lexicon: &RootLexicon, mut factory: F) -> Self
    where
        F: FnMut(&Arc<DictionaryItem>) -> Vec<StemTransition>,
    {
        let mut index = Self::new();
        for item in lexicon.all_items() {
            for stem in factory(item) {
                index.add(stem);
            }
        }
        log::debug!(
            "stem index built: {} stems for {} items",
            index.len(),
            lexicon.len()
        );
        index
    }

    /// Register a stem. Incompatible variants are dropped; returns whether
    /// the stem was added.
    pub fn add(&mut self, stem: StemTransition) -> bool {
        if !stem.is_compatible() {
            log::debug!("dropping {:?} stem {} of {}", stem.variant, stem.surface, stem.item.id());
            return false;
        }
        let i = self.stems.len();
        self.by_surface.entry(stem.surface.clone()).or_default().push(i);
        self.by_item.entry(stem.item.id().to_string()).or_default().push(i);
        self.stems.push(stem);
        true
    }

    /// Every stem whose surface is a prefix of `input`, shorter stems first.
    pub fn prefix_matches(&self, input: &str) -> Vec<&StemTransition> {
        let mut out = Vec::new();
        for (end, c) in input.char_indices() {
            let end = end + c.len_utf8();
            if let Some(list) = self.by_surface.get(&input[..end]) {
                out.extend(list.iter().map(|&i| &self.stems[i]).filter(|s| s.is_compatible()));
            }
        }
        out
    }

    /// Stems whose surface is exactly `surface`.
    pub fn exact(&self, surface: &str) -> Vec<&StemTransition> {
        self.lookup(&self.by_surface, surface)
    }

    /// Stems registered for the item with id `item_id`.
    pub fn for_item(&self, item_id: &str) -> Vec<&StemTransition> {
        self.lookup(&self.by_item, item_id)
    }

    fn lookup<'a>(&'a self, map: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&'a StemTransition> {
        map.get(key)
            .map(|list| list.iter().map(|&i| &self.stems[i]).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StemTransition> {
        self.stems.iter()
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}
