// Root lexicon: dictionary items indexed by lemma and by id

use std::sync::Arc;

use hashbrown::HashMap;

use crate::enums::PrimaryPos;
use crate::item::DictionaryItem;

/// Collection of dictionary items.
///
/// Items are kept in insertion order. The lemma index is one-to-many and
/// preserves insertion order per lemma; the id index is one-to-one.
#[derive(Debug, Clone, Default)]
pub struct RootLexicon {
    items: Vec<Arc<DictionaryItem>>,
    by_lemma: HashMap<String, Vec<Arc<DictionaryItem>>>,
    by_id: HashMap<String, Arc<DictionaryItem>>,
}

impl RootLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from items; duplicates are skipped with a warning.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<DictionaryItem>>,
    {
        let mut lexicon = Self::new();
        for item in items {
            lexicon.add(item);
        }
        lexicon
    }

    /// Add an item. Returns `false` (and logs a warning) when an equal item
    /// or an item with the same id is already present.
    pub fn add(&mut self, item: impl Into<Arc<DictionaryItem>>) -> bool {
        let item = item.into();
        if let Some(existing) = self.by_id.get(item.id()) {
            if **existing == *item {
                log::warn!("duplicate dictionary item ignored: {item}");
            } else {
                log::warn!(
                    "dictionary item id {} already used by {existing}, ignoring {item}",
                    item.id()
                );
            }
            return false;
        }
        self.by_id.insert(item.id().to_string(), Arc::clone(&item));
        self.by_lemma
            .entry(item.lemma.clone())
            .or_default()
            .push(Arc::clone(&item));
        self.items.push(item);
        true
    }

    /// All items in insertion order.
    pub fn all_items(&self) -> impl Iterator<Item = &Arc<DictionaryItem>> {
        self.items.iter()
    }

    /// Items whose lemma is exactly `lemma`, in insertion order.
    pub fn matching(&self, lemma: &str) -> &[Arc<DictionaryItem>] {
        self.by_lemma.get(lemma).map(Vec::as_slice).unwrap_or_default()
    }

    /// Items with the given lemma and primary POS.
    pub fn matching_pos(&self, lemma: &str, pos: PrimaryPos) -> Vec<Arc<DictionaryItem>> {
        self.matching(lemma)
            .iter()
            .filter(|item| item.primary_pos == pos)
            .cloned()
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Arc<DictionaryItem>> {
        self.by_id.get(id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Item referenced by `item`, if the reference resolves.
    pub fn resolve_reference(&self, item: &DictionaryItem) -> Option<&Arc<DictionaryItem>> {
        item.reference().and_then(|id| self.by_id(id))
    }

    /// Remove one item. Returns whether it was present.
    pub fn remove(&mut self, item: &DictionaryItem) -> bool {
        match self.by_id.get(item.id()) {
            Some(existing) if **existing == *item => {}
            _ => return false,
        }
        self.by_id.remove(item.id());
        if let Some(list) = self.by_lemma.get_mut(&item.lemma) {
            list.retain(|i| i.id() != item.id());
            if list.is_empty() {
                self.by_lemma.remove(&item.lemma);
            }
        }
        self.items.retain(|i| i.id() != item.id());
        true
    }

    /// Remove every item with the given lemma. Returns how many were removed.
    pub fn remove_all_lemmas(&mut self, lemma: &str) -> usize {
        let Some(removed) = self.by_lemma.remove(lemma) else {
            return 0;
        };
        for item in &removed {
            self.by_id.remove(item.id());
        }
        self.items.retain(|i| i.lemma != lemma);
        removed.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::SecondaryPos;
    use crate::item::RootAttributes;

    fn item(lemma: &str, pos: PrimaryPos) -> DictionaryItem {
        DictionaryItem::new(lemma, lemma, pos, SecondaryPos::None, RootAttributes::empty())
    }

    #[test]
    fn add_and_lookup() {
        let mut lex = RootLexicon::new();
        assert!(lex.add(item("elma", PrimaryPos::Noun)));
        assert!(lex.add(item("mavi", PrimaryPos::Adjective)));
        assert!(lex.add(item("mavi", PrimaryPos::Noun)));
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.matching("mavi").len(), 2);
        assert_eq!(lex.matching("mavi")[0].primary_pos, PrimaryPos::Adjective);
        assert_eq!(lex.matching_pos("mavi", PrimaryPos::Noun).len(), 1);
        assert!(lex.matching("armut").is_empty());
        assert_eq!(lex.by_id("elma_Noun").map(|i| i.lemma.as_str()), Some("elma"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut lex = RootLexicon::new();
        assert!(lex.add(item("elma", PrimaryPos::Noun)));
        assert!(!lex.add(item("elma", PrimaryPos::Noun)));
        assert!(lex.add(item("elma", PrimaryPos::Noun).with_index(1)));
        assert_eq!(lex.len(), 2);
    }

    #[test]
    fn insertion_order() {
        let lex = RootLexicon::from_items([
            item("c", PrimaryPos::Noun),
            item("a", PrimaryPos::Noun),
            item("b", PrimaryPos::Noun),
        ]);
        let lemmas: Vec<_> = lex.all_items().map(|i| i.lemma.as_str()).collect();
        assert_eq!(lemmas, ["c", "a", "b"]);
    }

    #[test]
    fn removal() {
        let mut lex = RootLexicon::from_items([
            item("yüz", PrimaryPos::Noun),
            item("yüz", PrimaryPos::Numeral),
            item("göz", PrimaryPos::Noun),
        ]);
        assert!(lex.remove(&item("göz", PrimaryPos::Noun)));
        assert!(!lex.remove(&item("göz", PrimaryPos::Noun)));
        assert_eq!(lex.remove_all_lemmas("yüz"), 2);
        assert!(lex.is_empty());
        assert!(lex.by_id("yüz_Num").is_none());
    }

    #[test]
    fn reference_resolution() {
        let lex = RootLexicon::from_items([
            item("zeytinyağ", PrimaryPos::Noun),
            item("zeytinyağı", PrimaryPos::Noun).with_reference("zeytinyağ_Noun"),
        ]);
        let compound = &lex.matching("zeytinyağı")[0];
        let root = lex.resolve_reference(compound).map(|i| i.lemma.clone());
        assert_eq!(root.as_deref(), Some("zeytinyağ"));
    }
}
