// Suffix surface templates
//
// Template alphabet:
//   a..z   literal letter
//   A      a/e by backness of the last vowel
//   I      ı/i/u/ü by backness and rounding of the last vowel
//   +x     x only after a vowel; +A and +I are vowels left out after a vowel
//   >x     x, devoiced after a voiceless letter (>d -> t after p)
//   ~x     x; the next suffix must start with a consonant
//   !x     x; the next suffix must start with a vowel, the word cannot end
//
// An A or I in the first position is left out after a vowel-final form.

use std::fmt;

use morfo_core::character::{devoice, is_vowel};
use morfo_core::phonetics::attributes_after;
use morfo_core::{AttributeSet, PhoneticAttribute};

use crate::GraphError;

use PhoneticAttribute::{
    CannotTerminate, ExpectsConsonant, ExpectsVowel, LastLetterVoiceless, LastLetterVowel,
    LastVowelBack, LastVowelFrontal, LastVowelRounded, LastVowelUnrounded,
};

/// One parsed element of a [`SuffixTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken {
    Letter(char),
    AVowel,
    IVowel,
    /// `+x`: letter written only after a vowel.
    AppendLetter(char),
    /// `+A`: harmonized a/e left out after a vowel.
    AppendA,
    /// `+I`: harmonized ı/i/u/ü left out after a vowel.
    AppendI,
    /// `>x`: letter devoiced after a voiceless letter.
    DevoiceFirst(char),
    /// `~x`: letter after which a consonant must follow.
    LastVoiced(char),
    /// `!x`: letter after which a vowel must follow.
    LastNotVoiced(char),
}

/// Sound a template starts with, used to derive an implicit condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingSound {
    Vowel,
    Consonant,
}

/// A parsed suffix template such as `lAr`, `+yA` or `>cI~k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTemplate {
    source: String,
    tokens: Vec<TemplateToken>,
}

impl SuffixTemplate {
    /// The empty template of an epsilon transition.
    pub fn empty() -> Self {
        Self {
            source: String::new(),
            tokens: Vec::new(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, GraphError> {
        let invalid = |reason: &str| GraphError::InvalidTemplate {
            template: source.to_string(),
            reason: reason.to_string(),
        };

        let mut tokens = Vec::new();
        let mut chars = source.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                'A' => TemplateToken::AVowel,
                'I' => TemplateToken::IVowel,
                '+' | '>' | '~' | '!' => {
                    let next = chars.next().ok_or_else(|| invalid("operator at end"))?;
                    match (c, next) {
                        ('+', 'A') => TemplateToken::AppendA,
                        ('+', 'I') => TemplateToken::AppendI,
                        (_, 'A' | 'I') => return Err(invalid("vowel placeholder after operator")),
                        ('+', l) => TemplateToken::AppendLetter(l),
                        ('>', l) => TemplateToken::DevoiceFirst(l),
                        ('~', l) => TemplateToken::LastVoiced(l),
                        (_, l) => TemplateToken::LastNotVoiced(l),
                    }
                }
                c if c.is_alphabetic() && c.is_lowercase() => TemplateToken::Letter(c),
                _ => return Err(invalid("unexpected character")),
            };
            tokens.push(token);
        }
        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The sound this template starts with, if it constrains the predecessor.
    pub fn leading_sound(&self) -> Option<LeadingSound> {
        let first = self.tokens.first()?;
        let vowel_token = |t: &TemplateToken| match *t {
            TemplateToken::AVowel | TemplateToken::IVowel => true,
            TemplateToken::AppendA | TemplateToken::AppendI => true,
            TemplateToken::Letter(l) => is_vowel(l),
            _ => false,
        };
        let vowel = match first {
            TemplateToken::AppendLetter(_) => self.tokens.get(1).is_some_and(vowel_token),
            t => vowel_token(t),
        };
        Some(if vowel {
            LeadingSound::Vowel
        } else {
            LeadingSound::Consonant
        })
    }

    /// Render the allomorph that follows a form with `attrs`.
    ///
    /// Returns `None` when a harmonized vowel is needed but `attrs` carry no
    /// vowel harmony information.
    pub fn render(&self, attrs: AttributeSet) -> Option<String> {
        let mut out = String::new();
        for (index, token) in self.tokens.iter().enumerate() {
            let current = if out.is_empty() {
                attrs
            } else {
                attributes_after(&out, attrs)
            };
            match *token {
                TemplateToken::Letter(c)
                | TemplateToken::LastVoiced(c)
                | TemplateToken::LastNotVoiced(c) => out.push(c),
                TemplateToken::AVowel => {
                    if index == 0 && attrs.contains(LastLetterVowel) {
                        continue;
                    }
                    out.push(a_vowel(current)?);
                }
                TemplateToken::IVowel => {
                    if index == 0 && attrs.contains(LastLetterVowel) {
                        continue;
                    }
                    out.push(i_vowel(current)?);
                }
                TemplateToken::AppendLetter(c) => {
                    if current.contains(LastLetterVowel) {
                        out.push(c);
                    }
                }
                TemplateToken::AppendA => {
                    if !current.contains(LastLetterVowel) {
                        out.push(a_vowel(current)?);
                    }
                }
                TemplateToken::AppendI => {
                    if !current.contains(LastLetterVowel) {
                        out.push(i_vowel(current)?);
                    }
                }
                TemplateToken::DevoiceFirst(c) => {
                    out.push(if current.contains(LastLetterVoiceless) {
                        devoice(c)
                    } else {
                        c
                    });
                }
            }
        }
        Some(out)
    }

    /// Attributes after this template was realized as `surface`.
    ///
    /// `CannotTerminate` is cleared; a trailing `~x` or `!x` then sets the
    /// expectation for the next suffix.
    pub fn attributes_after(&self, surface: &str, current: AttributeSet) -> AttributeSet {
        let mut attrs = attributes_after(surface, current).without(CannotTerminate);
        match self.tokens.last() {
            Some(TemplateToken::LastVoiced(_)) => attrs.insert(ExpectsConsonant),
            Some(TemplateToken::LastNotVoiced(_)) => {
                attrs.insert(ExpectsVowel);
                attrs.insert(CannotTerminate);
            }
            _ => {}
        }
        attrs
    }
}

fn a_vowel(attrs: AttributeSet) -> Option<char> {
    if attrs.contains(LastVowelBack) {
        Some('a')
    } else if attrs.contains(LastVowelFrontal) {
        Some('e')
    } else {
        None
    }
}

fn i_vowel(attrs: AttributeSet) -> Option<char> {
    let back = attrs.contains(LastVowelBack);
    let front = attrs.contains(LastVowelFrontal);
    let rounded = attrs.contains(LastVowelRounded);
    let unrounded = attrs.contains(LastVowelUnrounded);
    match (back, front, rounded, unrounded) {
        (false, true, _, true) => Some('i'),
        (true, false, _, true) => Some('\u{0131}'),
        (true, false, true, _) => Some('u'),
        (false, true, true, _) => Some('\u{00FC}'),
        _ => None,
    }
}

impl fmt::Display for SuffixTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            f.write_str("ε")
        } else {
            f.write_str(&self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morfo_core::phonetics::stem_attributes;

    fn render(template: &str, stem: &str) -> Option<String> {
        SuffixTemplate::parse(template).ok()?.render(stem_attributes(stem))
    }

    #[test]
    fn parse_tokens() {
        let t = SuffixTemplate::parse(">cI~k").unwrap();
        assert_eq!(
            t.tokens(),
            &[
                TemplateToken::DevoiceFirst('c'),
                TemplateToken::IVowel,
                TemplateToken::LastVoiced('k')
            ]
        );
        let t = SuffixTemplate::parse("+yA").unwrap();
        assert_eq!(t.tokens(), &[TemplateToken::AppendLetter('y'), TemplateToken::AVowel]);
        assert!(SuffixTemplate::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_errors() {
        assert!(SuffixTemplate::parse("lA+").is_err());
        assert!(SuffixTemplate::parse("l1").is_err());
        assert!(SuffixTemplate::parse(">A").is_err());
    }

    #[test]
    fn vowel_harmony() {
        assert_eq!(render("lAr", "elma").as_deref(), Some("lar"));
        assert_eq!(render("lAr", "ev").as_deref(), Some("ler"));
        assert_eq!(render("Im", "göz").as_deref(), Some("üm"));
        assert_eq!(render("Im", "kuş").as_deref(), Some("um"));
        assert_eq!(render("Im", "kız").as_deref(), Some("ım"));
        assert_eq!(render("Im", "ev").as_deref(), Some("im"));
    }

    #[test]
    fn leading_vowel_dropped_after_vowel() {
        assert_eq!(render("Im", "elma").as_deref(), Some("m"));
        assert_eq!(render("ImIz", "elma").as_deref(), Some("mız"));
        assert_eq!(render("ImIz", "elmalar").as_deref(), Some("ımız"));
    }

    #[test]
    fn append_letters() {
        assert_eq!(render("+yA", "elma").as_deref(), Some("ya"));
        assert_eq!(render("+yA", "ev").as_deref(), Some("e"));
        assert_eq!(render("+sI", "elma").as_deref(), Some("sı"));
        assert_eq!(render("+sI", "ev").as_deref(), Some("i"));
        assert_eq!(render("+Im", "araba").as_deref(), Some("m"));
    }

    #[test]
    fn devoicing() {
        assert_eq!(render(">dA", "kitap").as_deref(), Some("ta"));
        assert_eq!(render(">dA", "ev").as_deref(), Some("de"));
        assert_eq!(render(">cI", "süt").as_deref(), Some("çü"));
    }

    #[test]
    fn missing_harmony_is_unrenderable() {
        let attrs = stem_attributes("tbmm");
        let t = SuffixTemplate::parse("lAr").unwrap();
        assert_eq!(t.render(attrs), None);
        let t = SuffixTemplate::parse("+y").unwrap();
        assert_eq!(t.render(attrs).as_deref(), Some(""));
    }

    #[test]
    fn leading_sounds() {
        let lead = |s: &str| SuffixTemplate::parse(s).unwrap().leading_sound();
        assert_eq!(lead(""), None);
        assert_eq!(lead("lAr"), Some(LeadingSound::Consonant));
        assert_eq!(lead("Im"), Some(LeadingSound::Vowel));
        assert_eq!(lead("+yA"), Some(LeadingSound::Vowel));
        assert_eq!(lead("+ylA"), Some(LeadingSound::Consonant));
        assert_eq!(lead(">dI"), Some(LeadingSound::Consonant));
        assert_eq!(lead("+sI"), Some(LeadingSound::Vowel));
    }

    #[test]
    fn expectation_markers() {
        let current = stem_attributes("ev");
        let dim_k = SuffixTemplate::parse(">cI~k").unwrap();
        let a = dim_k.attributes_after("cik", current);
        assert!(a.contains(ExpectsConsonant));
        assert!(!a.contains(CannotTerminate));

        let dim_g = SuffixTemplate::parse(">cI!ğ").unwrap();
        let a = dim_g.attributes_after("ciğ", current);
        assert!(a.contains(ExpectsVowel));
        assert!(a.contains(CannotTerminate));

        let plain = SuffixTemplate::parse("Im").unwrap();
        let a = plain.attributes_after("i", a);
        assert!(!a.contains(CannotTerminate));
        assert!(!a.contains(ExpectsVowel));
    }
}
