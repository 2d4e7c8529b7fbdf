// Shared tag enums: part of speech, root attributes, token types

use std::fmt;
use std::str::FromStr;

/// Error raised when a textual tag does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagParseError {
    #[error("unknown primary POS: {0}")]
    UnknownPrimaryPos(String),
    #[error("unknown secondary POS: {0}")]
    UnknownSecondaryPos(String),
    #[error("unknown root attribute: {0}")]
    UnknownRootAttribute(String),
}

// ---------------------------------------------------------------------------
// PrimaryPos
// ---------------------------------------------------------------------------

/// Primary part of speech of a dictionary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimaryPos {
    Noun,
    Adjective,
    Adverb,
    Conjunction,
    Interjection,
    Verb,
    Pronoun,
    Numeral,
    Determiner,
    PostPositive,
    Question,
    Duplicator,
    Punctuation,
    Unknown,
}

impl PrimaryPos {
    pub const ALL: [PrimaryPos; 14] = [
        PrimaryPos::Noun,
        PrimaryPos::Adjective,
        PrimaryPos::Adverb,
        PrimaryPos::Conjunction,
        PrimaryPos::Interjection,
        PrimaryPos::Verb,
        PrimaryPos::Pronoun,
        PrimaryPos::Numeral,
        PrimaryPos::Determiner,
        PrimaryPos::PostPositive,
        PrimaryPos::Question,
        PrimaryPos::Duplicator,
        PrimaryPos::Punctuation,
        PrimaryPos::Unknown,
    ];

    /// Short form used in item ids, dictionary lines and analysis output.
    pub fn short_form(self) -> &'static str {
        match self {
            PrimaryPos::Noun => "Noun",
            PrimaryPos::Adjective => "Adj",
            PrimaryPos::Adverb => "Adv",
            PrimaryPos::Conjunction => "Conj",
            PrimaryPos::Interjection => "Interj",
            PrimaryPos::Verb => "Verb",
            PrimaryPos::Pronoun => "Pron",
            PrimaryPos::Numeral => "Num",
            PrimaryPos::Determiner => "Det",
            PrimaryPos::PostPositive => "Postp",
            PrimaryPos::Question => "Ques",
            PrimaryPos::Duplicator => "Dup",
            PrimaryPos::Punctuation => "Punc",
            PrimaryPos::Unknown => "Unk",
        }
    }
}

impl fmt::Display for PrimaryPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_form())
    }
}

impl FromStr for PrimaryPos {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PrimaryPos::ALL
            .into_iter()
            .find(|p| p.short_form().eq_ignore_ascii_case(s) || format!("{p:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| TagParseError::UnknownPrimaryPos(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SecondaryPos
// ---------------------------------------------------------------------------

/// Secondary part of speech refining the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SecondaryPos {
    #[default]
    None,
    ProperNoun,
    Abbreviation,
    Demonstrative,
    Personal,
    Reflexive,
    QuestionPronoun,
    Quantifier,
    Cardinal,
    Ordinal,
    Time,
    Unknown,
}

impl SecondaryPos {
    pub const ALL: [SecondaryPos; 12] = [
        SecondaryPos::None,
        SecondaryPos::ProperNoun,
        SecondaryPos::Abbreviation,
        SecondaryPos::Demonstrative,
        SecondaryPos::Personal,
        SecondaryPos::Reflexive,
        SecondaryPos::QuestionPronoun,
        SecondaryPos::Quantifier,
        SecondaryPos::Cardinal,
        SecondaryPos::Ordinal,
        SecondaryPos::Time,
        SecondaryPos::Unknown,
    ];

    pub fn short_form(self) -> &'static str {
        match self {
            SecondaryPos::None => "None",
            SecondaryPos::ProperNoun => "Prop",
            SecondaryPos::Abbreviation => "Abbrv",
            SecondaryPos::Demonstrative => "Demons",
            SecondaryPos::Personal => "Pers",
            SecondaryPos::Reflexive => "Reflex",
            SecondaryPos::QuestionPronoun => "Ques",
            SecondaryPos::Quantifier => "Quant",
            SecondaryPos::Cardinal => "Card",
            SecondaryPos::Ordinal => "Ord",
            SecondaryPos::Time => "Time",
            SecondaryPos::Unknown => "Unk",
        }
    }
}

impl fmt::Display for SecondaryPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_form())
    }
}

impl FromStr for SecondaryPos {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SecondaryPos::ALL
            .into_iter()
            .find(|p| p.short_form().eq_ignore_ascii_case(s) || format!("{p:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| TagParseError::UnknownSecondaryPos(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RootAttribute
// ---------------------------------------------------------------------------

/// Lexical flags that change how a root is inflected.
///
/// The discriminant is the bit position inside [`crate::RootAttributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RootAttribute {
    /// Aorist is formed with `-Ir` (gel-ir).
    AoristI,
    /// Aorist is formed with `-Ar` (yap-ar).
    AoristA,
    /// Final vowel drops before the progressive `-Iyor` (ara-yor -> arıyor).
    ProgressiveVowelDrop,
    /// Passive is formed with `-In` instead of `-Il`.
    PassiveIn,
    /// Causative is formed with `-t` instead of `-DIr`.
    CausativeT,
    /// Final voiceless stop is voiced before a vowel (kitap -> kitabı).
    Voicing,
    /// Explicitly blocks voicing, including the inferred one.
    NoVoicing,
    /// Suffix vowels follow front harmony despite a back last vowel (saat -> saati).
    InverseHarmony,
    /// Final consonant is doubled before a vowel (hak -> hakkı).
    Doubling,
    /// Last vowel drops before a vowel-initial suffix (burun -> burnu).
    LastVowelDrop,
    /// Compound whose lemma already carries a third person possessive.
    CompoundP3sg,
    /// Root of a `CompoundP3sg` item, referenced from it.
    CompoundP3sgRoot,
    /// Root takes no suffixes at all.
    NoSuffix,
    Reflexive,
    Reciprocal,
    NonReciprocal,
    ImplicitPlural,
    ImplicitP1sg,
    ImplicitP2sg,
    /// Pronunciation was guessed, not given in the dictionary.
    PronunciationGuessed,
    /// Root is cased with English rules (I -> i).
    LocaleEn,
    Dummy,
}

impl RootAttribute {
    pub const ALL: [RootAttribute; 22] = [
        RootAttribute::AoristI,
        RootAttribute::AoristA,
        RootAttribute::ProgressiveVowelDrop,
        RootAttribute::PassiveIn,
        RootAttribute::CausativeT,
        RootAttribute::Voicing,
        RootAttribute::NoVoicing,
        RootAttribute::InverseHarmony,
        RootAttribute::Doubling,
        RootAttribute::LastVowelDrop,
        RootAttribute::CompoundP3sg,
        RootAttribute::CompoundP3sgRoot,
        RootAttribute::NoSuffix,
        RootAttribute::Reflexive,
        RootAttribute::Reciprocal,
        RootAttribute::NonReciprocal,
        RootAttribute::ImplicitPlural,
        RootAttribute::ImplicitP1sg,
        RootAttribute::ImplicitP2sg,
        RootAttribute::PronunciationGuessed,
        RootAttribute::LocaleEn,
        RootAttribute::Dummy,
    ];

    /// Name used in dictionary lines (`A:Voicing,Aorist_A`).
    pub fn name(self) -> &'static str {
        match self {
            RootAttribute::AoristI => "Aorist_I",
            RootAttribute::AoristA => "Aorist_A",
            RootAttribute::ProgressiveVowelDrop => "ProgressiveVowelDrop",
            RootAttribute::PassiveIn => "Passive_In",
            RootAttribute::CausativeT => "Causative_t",
            RootAttribute::Voicing => "Voicing",
            RootAttribute::NoVoicing => "NoVoicing",
            RootAttribute::InverseHarmony => "InverseHarmony",
            RootAttribute::Doubling => "Doubling",
            RootAttribute::LastVowelDrop => "LastVowelDrop",
            RootAttribute::CompoundP3sg => "CompoundP3sg",
            RootAttribute::CompoundP3sgRoot => "CompoundP3sgRoot",
            RootAttribute::NoSuffix => "NoSuffix",
            RootAttribute::Reflexive => "Reflexive",
            RootAttribute::Reciprocal => "Reciprocal",
            RootAttribute::NonReciprocal => "NonReciprocal",
            RootAttribute::ImplicitPlural => "ImplicitPlural",
            RootAttribute::ImplicitP1sg => "ImplicitP1sg",
            RootAttribute::ImplicitP2sg => "ImplicitP2sg",
            RootAttribute::PronunciationGuessed => "PronunciationGuessed",
            RootAttribute::LocaleEn => "LocaleEn",
            RootAttribute::Dummy => "Dummy",
        }
    }

    pub(crate) fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

impl fmt::Display for RootAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RootAttribute {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RootAttribute::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TagParseError::UnknownRootAttribute(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TokenType
// ---------------------------------------------------------------------------

/// Coarse token classes produced by an external tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Word,
    Abbreviation,
    Number,
    Punctuation,
    Url,
    Email,
    Hashtag,
    Mention,
    Emoticon,
    Whitespace,
    Unknown,
}

impl TokenType {
    /// Whether the morphological graph should be consulted for this token.
    pub fn is_word_like(self) -> bool {
        matches!(self, TokenType::Word | TokenType::Abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_pos_round_trips_through_short_form() {
        for pos in PrimaryPos::ALL {
            assert_eq!(pos.short_form().parse::<PrimaryPos>(), Ok(pos));
        }
        assert_eq!("Adjective".parse::<PrimaryPos>(), Ok(PrimaryPos::Adjective));
        assert_eq!("noun".parse::<PrimaryPos>(), Ok(PrimaryPos::Noun));
    }

    #[test]
    fn unknown_tags_are_errors() {
        assert_eq!(
            "Foo".parse::<PrimaryPos>(),
            Err(TagParseError::UnknownPrimaryPos("Foo".into()))
        );
        assert!("Bar".parse::<SecondaryPos>().is_err());
        assert!("Voicingg".parse::<RootAttribute>().is_err());
    }

    #[test]
    fn secondary_pos_names() {
        assert_eq!("Prop".parse::<SecondaryPos>(), Ok(SecondaryPos::ProperNoun));
        assert_eq!("Abbrv".parse::<SecondaryPos>(), Ok(SecondaryPos::Abbreviation));
        assert_eq!(SecondaryPos::default(), SecondaryPos::None);
    }

    #[test]
    fn root_attribute_names() {
        assert_eq!("Aorist_A".parse::<RootAttribute>(), Ok(RootAttribute::AoristA));
        assert_eq!("Causative_t".parse::<RootAttribute>(), Ok(RootAttribute::CausativeT));
        assert_eq!(RootAttribute::PassiveIn.to_string(), "Passive_In");
    }

    #[test]
    fn root_attribute_bits_fit_in_u32() {
        assert!(RootAttribute::ALL.len() <= 32);
        let mut seen = 0u32;
        for a in RootAttribute::ALL {
            assert_eq!(seen & a.bit(), 0);
            seen |= a.bit();
        }
    }

    #[test]
    fn word_like_tokens() {
        assert!(TokenType::Word.is_word_like());
        assert!(TokenType::Abbreviation.is_word_like());
        assert!(!TokenType::Number.is_word_like());
        assert!(!TokenType::Punctuation.is_word_like());
    }
}
