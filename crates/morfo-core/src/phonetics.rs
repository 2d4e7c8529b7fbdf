// Phonetic attributes of a word-so-far and their propagation rules
//
// Every function here is pure: the result depends only on the arguments.
// The search engine relies on this to keep analyses reproducible.

use std::fmt;

use crate::character::{
    contains_vowel, first_letter, is_frontal, is_rounded, is_stop_consonant, is_vowel,
    is_voiceless, last_letter, last_vowel,
};

/// A derived boolean property of the surface form built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PhoneticAttribute {
    LastLetterVowel,
    LastLetterConsonant,
    LastVowelFrontal,
    LastVowelBack,
    LastVowelRounded,
    LastVowelUnrounded,
    LastLetterVoiceless,
    LastLetterVoiced,
    LastLetterVoicelessStop,
    FirstLetterVowel,
    FirstLetterConsonant,
    HasNoVowel,
    /// The next suffix must start with a vowel.
    ExpectsVowel,
    /// The next suffix must start with a consonant.
    ExpectsConsonant,
    /// The stem lost a letter (ara -> ar-ıyor).
    LastLetterDropped,
    /// A path cannot be accepted before another suffix is attached.
    CannotTerminate,
}

impl PhoneticAttribute {
    pub const ALL: [PhoneticAttribute; 16] = [
        PhoneticAttribute::LastLetterVowel,
        PhoneticAttribute::LastLetterConsonant,
        PhoneticAttribute::LastVowelFrontal,
        PhoneticAttribute::LastVowelBack,
        PhoneticAttribute::LastVowelRounded,
        PhoneticAttribute::LastVowelUnrounded,
        PhoneticAttribute::LastLetterVoiceless,
        PhoneticAttribute::LastLetterVoiced,
        PhoneticAttribute::LastLetterVoicelessStop,
        PhoneticAttribute::FirstLetterVowel,
        PhoneticAttribute::FirstLetterConsonant,
        PhoneticAttribute::HasNoVowel,
        PhoneticAttribute::ExpectsVowel,
        PhoneticAttribute::ExpectsConsonant,
        PhoneticAttribute::LastLetterDropped,
        PhoneticAttribute::CannotTerminate,
    ];

    /// Abbreviated name used in debug output.
    pub fn short_name(self) -> &'static str {
        match self {
            PhoneticAttribute::LastLetterVowel => "+V",
            PhoneticAttribute::LastLetterConsonant => "+C",
            PhoneticAttribute::LastVowelFrontal => "V:Fr",
            PhoneticAttribute::LastVowelBack => "V:Bk",
            PhoneticAttribute::LastVowelRounded => "V:Rd",
            PhoneticAttribute::LastVowelUnrounded => "V:Urd",
            PhoneticAttribute::LastLetterVoiceless => "C:Vl",
            PhoneticAttribute::LastLetterVoiced => "C:Vo",
            PhoneticAttribute::LastLetterVoicelessStop => "C:VlSt",
            PhoneticAttribute::FirstLetterVowel => "F:V",
            PhoneticAttribute::FirstLetterConsonant => "F:C",
            PhoneticAttribute::HasNoVowel => "NoVow",
            PhoneticAttribute::ExpectsVowel => "Exp:V",
            PhoneticAttribute::ExpectsConsonant => "Exp:C",
            PhoneticAttribute::LastLetterDropped => "Dropped",
            PhoneticAttribute::CannotTerminate => "NoTerm",
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

impl fmt::Display for PhoneticAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

// ---------------------------------------------------------------------------
// AttributeSet
// ---------------------------------------------------------------------------

/// A compact, copyable set of [`PhoneticAttribute`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet(u32);

/// Attributes describing vowel harmony, carried over vowel-less fragments.
const HARMONY: AttributeSet = AttributeSet(
    (1 << PhoneticAttribute::LastVowelFrontal as u8)
        | (1 << PhoneticAttribute::LastVowelBack as u8)
        | (1 << PhoneticAttribute::LastVowelRounded as u8)
        | (1 << PhoneticAttribute::LastVowelUnrounded as u8),
);

impl AttributeSet {
    pub const fn empty() -> Self {
        AttributeSet(0)
    }

    pub fn of(attrs: &[PhoneticAttribute]) -> Self {
        attrs.iter().fold(Self::empty(), |set, &a| set.with(a))
    }

    pub fn contains(self, attr: PhoneticAttribute) -> bool {
        self.0 & attr.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn insert(&mut self, attr: PhoneticAttribute) {
        self.0 |= attr.bit();
    }

    pub fn remove(&mut self, attr: PhoneticAttribute) {
        self.0 &= !attr.bit();
    }

    /// Copy of the set with `attr` added.
    #[must_use]
    pub fn with(self, attr: PhoneticAttribute) -> Self {
        AttributeSet(self.0 | attr.bit())
    }

    /// Copy of the set with `attr` removed.
    #[must_use]
    pub fn without(self, attr: PhoneticAttribute) -> Self {
        AttributeSet(self.0 & !attr.bit())
    }

    #[must_use]
    pub fn union(self, other: AttributeSet) -> Self {
        AttributeSet(self.0 | other.0)
    }

    #[must_use]
    pub fn intersection(self, other: AttributeSet) -> Self {
        AttributeSet(self.0 & other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = PhoneticAttribute> {
        PhoneticAttribute::ALL.into_iter().filter(move |&a| self.contains(a))
    }
}

impl FromIterator<PhoneticAttribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = PhoneticAttribute>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |set, a| set.with(a))
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, a) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(a.short_name())?;
        }
        f.write_str("]")
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// Attributes of a word after appending `fragment` to a form with `current`.
///
/// An empty fragment changes nothing. A fragment containing a vowel decides
/// vowel harmony by itself. A vowel-less fragment keeps the harmony
/// attributes of `current` and only updates letter class and voicing.
/// Forward-looking markers (`Expects*`, `CannotTerminate`) are never carried.
pub fn attributes_after(fragment: &str, current: AttributeSet) -> AttributeSet {
    let (Some(first), Some(last)) = (first_letter(fragment), last_letter(fragment)) else {
        return current;
    };

    let mut attrs = AttributeSet::empty();
    match last_vowel(fragment) {
        Some(v) => {
            attrs.insert(if is_frontal(v) {
                PhoneticAttribute::LastVowelFrontal
            } else {
                PhoneticAttribute::LastVowelBack
            });
            attrs.insert(if is_rounded(v) {
                PhoneticAttribute::LastVowelRounded
            } else {
                PhoneticAttribute::LastVowelUnrounded
            });
        }
        None => attrs = current.intersection(HARMONY),
    }

    attrs.insert(if is_vowel(first) {
        PhoneticAttribute::FirstLetterVowel
    } else {
        PhoneticAttribute::FirstLetterConsonant
    });

    if is_vowel(last) {
        attrs.insert(PhoneticAttribute::LastLetterVowel);
    } else {
        attrs.insert(PhoneticAttribute::LastLetterConsonant);
    }

    if is_voiceless(last) {
        attrs.insert(PhoneticAttribute::LastLetterVoiceless);
        if is_stop_consonant(last) {
            attrs.insert(PhoneticAttribute::LastLetterVoicelessStop);
        }
    } else {
        attrs.insert(PhoneticAttribute::LastLetterVoiced);
    }
    attrs
}

/// Attributes of a bare stem, computed from its pronunciation.
pub fn stem_attributes(pronunciation: &str) -> AttributeSet {
    let mut attrs = attributes_after(pronunciation, AttributeSet::empty());
    if !pronunciation.is_empty() && !contains_vowel(pronunciation) {
        attrs.insert(PhoneticAttribute::HasNoVowel);
    }
    attrs
}
