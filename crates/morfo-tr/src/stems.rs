// Stem transitions for Turkish dictionary items
//
// Most items have one stem: the root at the item's root state. Root
// attributes add a modified stem next to it (kitap/kitab, burun/burn,
// ara/ar, zeytinyağı/zeytinyağ). The original then expects a consonant
// and the modified one a vowel, so exactly one of them fits any suffix.

use std::sync::Arc;

use morfo_core::character::{contains_vowel, is_vowel, last_letter, voice};
use morfo_core::phonetics::{attributes_after, stem_attributes};
use morfo_core::{
    AttributeSet, DictionaryItem, PhoneticAttribute as P, PrimaryPos, RootAttribute, RootLexicon,
};
use morfo_graph::{StateId, StemIndex, StemTransition, StemVariant};

use crate::morphotactics::TurkishMorphotactics;

/// Root attributes that produce a second stem surface.
const MODIFIERS: [RootAttribute; 5] = [
    RootAttribute::Voicing,
    RootAttribute::Doubling,
    RootAttribute::LastVowelDrop,
    RootAttribute::InverseHarmony,
    RootAttribute::ProgressiveVowelDrop,
];

pub struct StemFactory<'a> {
    tactics: &'a TurkishMorphotactics,
    lexicon: &'a RootLexicon,
}

impl<'a> StemFactory<'a> {
    /// `lexicon` resolves the compound roots referenced by items.
    pub fn new(tactics: &'a TurkishMorphotactics, lexicon: &'a RootLexicon) -> Self {
        Self { tactics, lexicon }
    }

    /// Build the stem index of every item in the lexicon.
    pub fn build_index(&self) -> StemIndex {
        StemIndex::build(self.lexicon, |item| self.stems(item))
    }

    /// Every stem of `item`, the unmodified one first.
    pub fn stems(&self, item: &Arc<DictionaryItem>) -> Vec<StemTransition> {
        // Compound roots only exist to be referenced by their compound.
        if item.has_attribute(RootAttribute::CompoundP3sgRoot) {
            return Vec::new();
        }
        let Some(state) = self.tactics.root_state(item) else {
            log::warn!("no root state for {item}, item is not analyzable");
            return Vec::new();
        };
        if item.has_attribute(RootAttribute::CompoundP3sg) {
            return self.compound_stems(item, state);
        }
        if MODIFIERS.iter().any(|&a| item.has_attribute(a)) {
            return self.modified_stems(item, state);
        }
        vec![StemTransition::new(
            item.root.clone(),
            Arc::clone(item),
            stem_attributes(&item.pronunciation),
            state,
            StemVariant::Original,
        )]
    }

    fn modified_stems(&self, item: &Arc<DictionaryItem>, state: StateId) -> Vec<StemTransition> {
        let mut original_attrs = stem_attributes(&item.pronunciation);
        let mut modified_attrs = original_attrs;
        let mut modified: Vec<char> = item.root.chars().collect();
        let mut modified_state = state;
        let mut variant = StemVariant::Original;

        for attr in item.attributes.iter() {
            match attr {
                RootAttribute::Voicing => {
                    if item.has_attribute(RootAttribute::NoVoicing) {
                        continue;
                    }
                    let Some(&last) = modified.last() else { continue };
                    let voiced = if item.lemma.ends_with("nk") { 'g' } else { voice(last) };
                    if voiced == last {
                        log::warn!("voicing has no effect on {item}");
                        continue;
                    }
                    if let Some(l) = modified.last_mut() {
                        *l = voiced;
                    }
                    modified_attrs.remove(P::LastLetterVoicelessStop);
                    original_attrs.insert(P::ExpectsConsonant);
                    modified_attrs.insert(P::ExpectsVowel);
                    modified_attrs.insert(P::CannotTerminate);
                    variant = StemVariant::Voiced;
                }
                RootAttribute::Doubling => {
                    let Some(&last) = modified.last() else { continue };
                    modified.push(last);
                    original_attrs.insert(P::ExpectsConsonant);
                    modified_attrs.insert(P::ExpectsVowel);
                    modified_attrs.insert(P::CannotTerminate);
                    if variant == StemVariant::Original {
                        variant = StemVariant::Doubled;
                    }
                }
                RootAttribute::LastVowelDrop => {
                    if modified.last().is_some_and(|&c| is_vowel(c)) {
                        modified.pop();
                        modified_attrs.insert(P::ExpectsConsonant);
                    } else if modified.len() >= 2 {
                        modified.remove(modified.len() - 2);
                        if item.primary_pos != PrimaryPos::Verb {
                            original_attrs.insert(P::ExpectsConsonant);
                        }
                        modified_attrs.insert(P::ExpectsVowel);
                    }
                    modified_attrs.insert(P::CannotTerminate);
                    if variant == StemVariant::Original {
                        variant = StemVariant::LastVowelDropped;
                    }
                }
                RootAttribute::InverseHarmony => {
                    for attrs in [&mut original_attrs, &mut modified_attrs] {
                        attrs.insert(P::LastVowelFrontal);
                        attrs.remove(P::LastVowelBack);
                    }
                }
                RootAttribute::ProgressiveVowelDrop => {
                    if modified.len() > 1 {
                        modified.pop();
                        let surface: String = modified.iter().collect();
                        modified_attrs = progressive_drop_attributes(&surface, original_attrs);
                        modified_state = self.tactics.roots().verb_vowel_drop;
                        variant = StemVariant::ProgressiveVowelDropped;
                    }
                }
                _ => {}
            }
        }

        let modified: String = modified.into_iter().collect();
        let original = StemTransition::new(
            item.root.clone(),
            Arc::clone(item),
            original_attrs,
            state,
            StemVariant::Original,
        );
        // Inverse harmony alone changes attributes, not the surface.
        if modified == item.root {
            return vec![original];
        }
        let modified = StemTransition::new(modified, Arc::clone(item), modified_attrs, modified_state, variant);
        vec![original, modified]
    }

    /// `zeytinyağı` stays at the compound state; its root `zeytinyağ`
    /// takes the plural before the possessive.
    fn compound_stems(&self, item: &Arc<DictionaryItem>, state: StateId) -> Vec<StemTransition> {
        let original = StemTransition::new(
            item.root.clone(),
            Arc::clone(item),
            stem_attributes(&item.pronunciation),
            state,
            StemVariant::Original,
        );
        let root = match self.lexicon.resolve_reference(item) {
            Some(root) => root.root.clone(),
            None => strip_possessive(&item.root),
        };
        if root.is_empty() || root == item.root {
            return vec![original];
        }
        let attrs = stem_attributes(&root);
        let modified = StemTransition::new(
            root,
            Arc::clone(item),
            attrs,
            self.tactics.roots().noun_compound_root,
            StemVariant::CompoundRoot,
        );
        vec![original, modified]
    }
}

/// `ara -> ar`: the harmony of the dropped stem is computed from what is
/// left; a stem left without vowels (`de -> d`) keeps the original harmony.
fn progressive_drop_attributes(dropped: &str, original: AttributeSet) -> AttributeSet {
    let base = if contains_vowel(dropped) {
        AttributeSet::empty()
    } else {
        original
    };
    attributes_after(dropped, base).with(P::LastLetterDropped)
}

/// Remove a trailing third person possessive: `-sI` after a vowel, `-I`
/// after a consonant.
fn strip_possessive(root: &str) -> String {
    let mut chars: Vec<char> = root.chars().collect();
    if !last_letter(root).is_some_and(is_vowel) {
        return root.to_string();
    }
    chars.pop();
    if chars.len() >= 2 && chars[chars.len() - 1] == 's' && is_vowel(chars[chars.len() - 2]) {
        chars.pop();
    }
    chars.into_iter().collect()
}
