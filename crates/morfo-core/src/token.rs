// Token handed over by an external tokenizer

use crate::enums::TokenType;

/// A token of running text.
///
/// Offsets are character offsets into the original text; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Create a token starting at `start`; `end` is derived from the text length.
    pub fn new(token_type: TokenType, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();
        Self {
            token_type,
            text,
            start,
            end,
        }
    }

    /// Shorthand for a word token.
    pub fn word(text: impl Into<String>, start: usize) -> Self {
        Self::new(TokenType::Word, text, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_in_chars() {
        let t = Token::word("çiçek", 4);
        assert_eq!(t.start, 4);
        assert_eq!(t.end, 9);
    }

    #[test]
    fn empty_token() {
        let t = Token::new(TokenType::Punctuation, "", 3);
        assert_eq!(t.start, t.end);
    }
}
