// Dictionary items: lexical entries with their inflection flags

use std::fmt;

use crate::enums::{PrimaryPos, RootAttribute, SecondaryPos};

// ---------------------------------------------------------------------------
// RootAttributes
// ---------------------------------------------------------------------------

/// Bit set of [`RootAttribute`]s attached to a dictionary item.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RootAttributes(u32);

impl RootAttributes {
    pub const fn empty() -> Self {
        RootAttributes(0)
    }

    pub fn of(attrs: &[RootAttribute]) -> Self {
        let mut set = Self::empty();
        for &a in attrs {
            set.insert(a);
        }
        set
    }

    /// Raw bits, as stored in the binary lexicon.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from raw bits; unknown bits are dropped.
    pub fn from_bits(bits: u32) -> Self {
        RootAttribute::ALL
            .into_iter()
            .filter(|a| bits & a.bit() != 0)
            .fold(Self::empty(), |mut set, a| {
                set.insert(a);
                set
            })
    }

    pub fn contains(self, attr: RootAttribute) -> bool {
        self.0 & attr.bit() != 0
    }

    pub fn insert(&mut self, attr: RootAttribute) {
        self.0 |= attr.bit();
    }

    pub fn remove(&mut self, attr: RootAttribute) {
        self.0 &= !attr.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = RootAttribute> {
        RootAttribute::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

impl fmt::Debug for RootAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RootAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(a.name())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DictionaryItem
// ---------------------------------------------------------------------------

/// A lexical entry.
///
/// `root` is the normalized form the stem index is built from: lowercase,
/// circumflex-free and, for verbs, without the infinitive suffix.
/// `pronunciation` drives the phonetic attributes; it differs from `root`
/// only for abbreviations and foreign words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryItem {
    pub lemma: String,
    pub root: String,
    pub pronunciation: String,
    pub primary_pos: PrimaryPos,
    pub secondary_pos: SecondaryPos,
    pub attributes: RootAttributes,
    index: u32,
    id: String,
    reference: Option<String>,
}

impl DictionaryItem {
    pub fn new(
        lemma: impl Into<String>,
        root: impl Into<String>,
        primary_pos: PrimaryPos,
        secondary_pos: SecondaryPos,
        attributes: RootAttributes,
    ) -> Self {
        let lemma = lemma.into();
        let root = root.into();
        let id = make_id(&lemma, primary_pos, secondary_pos, 0);
        Self {
            pronunciation: root.clone(),
            lemma,
            root,
            primary_pos,
            secondary_pos,
            attributes,
            index: 0,
            id,
            reference: None,
        }
    }

    #[must_use]
    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    /// Disambiguation index; a non-zero index becomes part of the id.
    #[must_use]
    pub fn with_index(mut self, index: u32) -> Self {
        self.set_index(index);
        self
    }

    #[must_use]
    pub fn with_reference(mut self, id: impl Into<String>) -> Self {
        self.reference = Some(id.into());
        self
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = index;
        self.id = make_id(&self.lemma, self.primary_pos, self.secondary_pos, index);
    }

    /// Backfill the reference link once the referenced item is known.
    pub fn set_reference(&mut self, id: impl Into<String>) {
        self.reference = Some(id.into());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Id of the referenced item, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn has_attribute(&self, attr: RootAttribute) -> bool {
        self.attributes.contains(attr)
    }
}

impl fmt::Display for DictionaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [P:{}", self.lemma, self.primary_pos)?;
        if self.secondary_pos != SecondaryPos::None {
            write!(f, ",{}", self.secondary_pos)?;
        }
        if !self.attributes.is_empty() {
            write!(f, "; A:{}", self.attributes)?;
        }
        if self.pronunciation != self.root {
            write!(f, "; Pr:{}", self.pronunciation)?;
        }
        if self.index > 0 {
            write!(f, "; Index:{}", self.index)?;
        }
        if let Some(r) = &self.reference {
            write!(f, "; Ref:{r}")?;
        }
        f.write_str("]")
    }
}

/// Stable id: `lemma_Pos[_Secondary][_index]`.
fn make_id(lemma: &str, primary: PrimaryPos, secondary: SecondaryPos, index: u32) -> String {
    let mut id = format!("{lemma}_{}", primary.short_form());
    if secondary != SecondaryPos::None {
        id.push('_');
        id.push_str(secondary.short_form());
    }
    if index > 0 {
        id.push('_');
        id.push_str(&index.to_string());
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun(lemma: &str) -> DictionaryItem {
        DictionaryItem::new(lemma, lemma, PrimaryPos::Noun, SecondaryPos::None, RootAttributes::empty())
    }

    #[test]
    fn ids() {
        assert_eq!(noun("elma").id(), "elma_Noun");
        let prop = DictionaryItem::new(
            "Ankara",
            "ankara",
            PrimaryPos::Noun,
            SecondaryPos::ProperNoun,
            RootAttributes::empty(),
        );
        assert_eq!(prop.id(), "Ankara_Noun_Prop");
        assert_eq!(noun("yüz").with_index(2).id(), "yüz_Noun_2");
    }

    #[test]
    fn reference_backfill() {
        let mut item = noun("zeytinyağı");
        assert_eq!(item.reference(), None);
        item.set_reference("zeytinyağ_Noun");
        assert_eq!(item.reference(), Some("zeytinyağ_Noun"));
    }

    #[test]
    fn root_attribute_bits() {
        let attrs = RootAttributes::of(&[RootAttribute::Voicing, RootAttribute::AoristA]);
        assert!(attrs.contains(RootAttribute::Voicing));
        assert!(!attrs.contains(RootAttribute::NoVoicing));
        assert_eq!(RootAttributes::from_bits(attrs.bits()), attrs);
        assert_eq!(attrs.to_string(), "Aorist_A,Voicing");
    }

    #[test]
    fn display() {
        let item = DictionaryItem::new(
            "kitap",
            "kitap",
            PrimaryPos::Noun,
            SecondaryPos::None,
            RootAttributes::of(&[RootAttribute::Voicing]),
        );
        assert_eq!(item.to_string(), "kitap [P:Noun; A:Voicing]");
    }
}
