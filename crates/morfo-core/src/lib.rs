//! Shared types for the morfo morphology engine.
//!
//! - [`character`] -- Turkish alphabet classification (vowels, voicing, stops)
//! - [`case`] -- Turkish-aware casing and input normalization
//! - [`enums`] -- Part-of-speech, root attribute and token type tags
//! - [`token`] -- Token type handed over by an external tokenizer
//! - [`phonetics`] -- Phonetic attributes and their propagation rules
//! - [`item`] -- Dictionary items (lexical entries)
//! - [`lexicon`] -- The root lexicon with lemma and id indexes

pub mod case;
pub mod character;
pub mod enums;
pub mod item;
pub mod lexicon;
pub mod phonetics;
pub mod token;

pub use enums::{PrimaryPos, RootAttribute, SecondaryPos, TagParseError, TokenType};
pub use item::{DictionaryItem, RootAttributes};
pub use lexicon::RootLexicon;
pub use phonetics::{AttributeSet, PhoneticAttribute};
pub use token::Token;
