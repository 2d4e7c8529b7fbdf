// TurkishMorphology: the facade owning lexicon, graph, stems and search.
//
// Everything is built once in the constructor and read-only afterwards,
// so one instance can serve any number of threads. Each call allocates
// its own search frontier; nothing is cached here.

use std::sync::Arc;

use morfo_core::case::{is_apostrophe, lower, normalize_circumflex};
use morfo_core::{DictionaryItem, RootLexicon, Token, TokenType};
use morfo_graph::{
    GenerationError, Morpheme, SearchObserver, SearchOptions, StemIndex, WordAnalyzer, WordGenerator,
    MAX_REPEATING_STATE_COUNT, NoopObserver, PRUNE_THRESHOLD,
};

use crate::morphotactics::{TurkishMorpheme, TurkishMorphotactics};
use crate::stems::StemFactory;
use crate::{Analysis, DictionaryError, Generated, MorphologyError, dictionary};

/// Input normalization and search tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyOptions {
    /// Map â, î, û to a, i, u before analysis.
    pub normalize_circumflex: bool,
    /// Drop apostrophes (`Ankara'da` -> `ankarada`) before analysis.
    pub strip_apostrophes: bool,
    pub max_repeating_states: usize,
    pub prune_threshold: usize,
}

impl Default for MorphologyOptions {
    fn default() -> Self {
        Self {
            normalize_circumflex: true,
            strip_apostrophes: true,
            max_repeating_states: MAX_REPEATING_STATE_COUNT,
            prune_threshold: PRUNE_THRESHOLD,
        }
    }
}

impl MorphologyOptions {
    fn search(&self) -> SearchOptions {
        SearchOptions {
            max_repeating_states: self.max_repeating_states,
            prune_threshold: self.prune_threshold,
        }
    }
}

/// Candidate analyses of one token, unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAnalysis {
    pub input: String,
    pub normalized: String,
    pub analyses: Vec<Analysis>,
}

impl WordAnalysis {
    pub fn is_correct(&self) -> bool {
        !self.analyses.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TurkishMorphology {
    lexicon: Arc<RootLexicon>,
    tactics: TurkishMorphotactics,
    stems: Arc<StemIndex>,
    analyzer: WordAnalyzer<TurkishMorpheme>,
    generator: WordGenerator<TurkishMorpheme>,
    options: MorphologyOptions,
}

impl TurkishMorphology {
    /// Build the morphotactics and the stem index for `lexicon`.
    pub fn new(lexicon: RootLexicon) -> Result<Self, MorphologyError> {
        let tactics = TurkishMorphotactics::new()?;
        let stems = StemFactory::new(&tactics, &lexicon).build_index();
        log::debug!(
            "morphology ready: {} items, {} stems, {} states",
            lexicon.len(),
            stems.len(),
            tactics.graph().state_count()
        );
        let stems = Arc::new(stems);
        let options = MorphologyOptions::default();
        Ok(Self {
            analyzer: WordAnalyzer::new(Arc::clone(tactics.graph()), Arc::clone(&stems))
                .with_options(options.search()),
            generator: WordGenerator::new(Arc::clone(tactics.graph()), Arc::clone(&stems))
                .with_options(options.search()),
            lexicon: Arc::new(lexicon),
            tactics,
            stems,
            options,
        })
    }

    /// Load from dictionary text.
    pub fn from_text(text: &str) -> Result<Self, MorphologyError> {
        Self::new(dictionary::load_text(text)?)
    }

    /// Load from the binary lexicon format.
    #[cfg(feature = "binary")]
    pub fn from_binary(data: &[u8]) -> Result<Self, MorphologyError> {
        Self::new(dictionary::binary::read(data)?)
    }

    /// Load from either format, detected by the leading magic bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MorphologyError> {
        #[cfg(feature = "binary")]
        {
            if dictionary::binary::is_binary(data) {
                return Self::from_binary(data);
            }
        }
        let text = std::str::from_utf8(data).map_err(|e| DictionaryError::Malformed {
            line: 0,
            message: format!("not UTF-8: {e}"),
        })?;
        Self::from_text(text)
    }

    /// The sample lexicon shipped with the crate.
    #[cfg(feature = "bundled-lexicon")]
    pub fn bundled() -> Result<Self, MorphologyError> {
        Self::from_text(include_str!("../data/lexicon.txt"))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn lexicon(&self) -> &RootLexicon {
        &self.lexicon
    }

    pub fn morphotactics(&self) -> &TurkishMorphotactics {
        &self.tactics
    }

    pub fn stems(&self) -> &StemIndex {
        &self.stems
    }

    pub fn options(&self) -> MorphologyOptions {
        self.options
    }

    pub fn set_options(&mut self, options: MorphologyOptions) {
        self.options = options;
        self.analyzer = self.analyzer.clone().with_options(options.search());
        self.generator = self.generator.clone().with_options(options.search());
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Lowercase and clean a word the way the stem index expects it.
    pub fn normalize(&self, word: &str) -> String {
        let mut s = lower(word.trim());
        if self.options.normalize_circumflex {
            s = normalize_circumflex(&s);
        }
        if self.options.strip_apostrophes {
            s.retain(|c| !is_apostrophe(c));
        }
        s
    }

    /// Every analysis of `word`, in search order. Unknown words give an
    /// empty vector.
    pub fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.analyze_observed(word, &mut NoopObserver)
    }

    pub fn analyze_observed(&self, word: &str, observer: &mut impl SearchObserver) -> Vec<Analysis> {
        let normalized = self.normalize(word);
        self.analyzer.analyze_observed(&normalized, observer)
    }

    /// Analyze a token from an external tokenizer. Whitespace, URLs and the
    /// like are not looked up.
    pub fn analyze_token(&self, token: &Token) -> Vec<Analysis> {
        match token.token_type {
            TokenType::Word | TokenType::Abbreviation | TokenType::Number | TokenType::Punctuation => {
                self.analyze(&token.text)
            }
            _ => Vec::new(),
        }
    }

    /// Candidate lists for every token of a sentence, for an external
    /// disambiguator. Whitespace tokens are skipped.
    pub fn analyze_sentence(&self, tokens: &[Token]) -> Vec<WordAnalysis> {
        tokens
            .iter()
            .filter(|t| t.token_type != TokenType::Whitespace)
            .map(|t| WordAnalysis {
                input: t.text.clone(),
                normalized: self.normalize(&t.text),
                analyses: self.analyze_token(t),
            })
            .collect()
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Every surface of `item` with `morphemes`, e.g. `elma` + `[A3pl, P1pl]`.
    pub fn generate(
        &self,
        item: &DictionaryItem,
        morphemes: &[TurkishMorpheme],
    ) -> Result<Vec<Generated>, GenerationError> {
        self.generator.generate(item, morphemes)
    }

    pub fn generate_observed(
        &self,
        item: &DictionaryItem,
        morphemes: &[TurkishMorpheme],
        observer: &mut impl SearchObserver,
    ) -> Result<Vec<Generated>, GenerationError> {
        self.generator.generate_observed(item, morphemes, observer)
    }

    /// Generate from literal stem text (`kitab`, `yap`) or, failing that,
    /// from every item whose lemma is `text`.
    pub fn generate_from_stem(
        &self,
        text: &str,
        morphemes: &[TurkishMorpheme],
    ) -> Result<Vec<Generated>, GenerationError> {
        let stems = self.stems.exact(text);
        if !stems.is_empty() {
            return self.generator.generate_with_stems(&stems, morphemes, &mut NoopObserver);
        }
        let mut out = Vec::new();
        for item in self.lexicon.matching(text) {
            out.extend(self.generate(item, morphemes)?);
        }
        Ok(out)
    }

    /// Generate by item id and morpheme names, e.g. `("elma_Noun", ["A3pl"])`.
    pub fn generate_by_ids(&self, item_id: &str, morphemes: &[&str]) -> Result<Vec<Generated>, MorphologyError> {
        let item = self
            .lexicon
            .by_id(item_id)
            .ok_or_else(|| MorphologyError::UnknownItem(item_id.to_string()))?;
        let morphemes = parse_morphemes(morphemes)?;
        Ok(self.generate(item, &morphemes)?)
    }
}

/// Resolve morpheme names like `A3pl` against the catalog.
pub fn parse_morphemes(names: &[&str]) -> Result<Vec<TurkishMorpheme>, GenerationError> {
    names
        .iter()
        .map(|n| TurkishMorpheme::from_id(n).ok_or_else(|| GenerationError::UnknownMorpheme(n.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TurkishMorpheme as T;

    const LEXICON: &str = "\
elma
kitap
yapmak
Ankara
kâr
";

    fn morphology() -> TurkishMorphology {
        TurkishMorphology::from_text(LEXICON).unwrap()
    }

    fn surfaces(results: &[Generated]) -> Vec<&str> {
        results.iter().map(|r| r.surface.as_str()).collect()
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<X: Send + Sync>() {}
        assert_send_sync::<TurkishMorphology>();
    }

    #[test]
    fn normalization() {
        let m = morphology();
        assert_eq!(m.normalize("  ELMA "), "elma");
        assert_eq!(m.normalize("IŞIK"), "ışık");
        assert_eq!(m.normalize("Ankara'da"), "ankarada");
        assert_eq!(m.normalize("kâr"), "kar");
    }

    #[test]
    fn options_toggle_normalization() {
        let mut m = morphology();
        m.set_options(MorphologyOptions {
            strip_apostrophes: false,
            normalize_circumflex: false,
            ..MorphologyOptions::default()
        });
        assert_eq!(m.normalize("Ankara'da"), "ankara'da");
        assert_eq!(m.normalize("kâr"), "kâr");
        assert!(m.analyze("Ankara'da").is_empty());
        assert!(!m.options().strip_apostrophes);
    }

    #[test]
    fn analyzes_with_normalization() {
        let m = morphology();
        assert!(!m.analyze("Elmalar").is_empty());
        assert!(m.analyze("Ankara'da").iter().any(|a| a.contains_morpheme(T::Loc)));
    }

    #[test]
    fn tokens() {
        let m = morphology();
        assert!(!m.analyze_token(&Token::word("elma", 0)).is_empty());
        assert!(m.analyze_token(&Token::new(TokenType::Url, "elma", 0)).is_empty());

        let sentence = [
            Token::word("Elmalar", 0),
            Token::new(TokenType::Whitespace, " ", 7),
            Token::word("xyz", 8),
        ];
        let result = m.analyze_sentence(&sentence);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].normalized, "elmalar");
        assert!(result[0].is_correct());
        assert!(!result[1].is_correct());
    }

    #[test]
    fn generate_from_stem_text() {
        let m = morphology();
        let out = m.generate_from_stem("kitab", &[T::A3sg, T::P1sg]).unwrap();
        assert_eq!(surfaces(&out), ["kitabım"]);
        let out = m.generate_from_stem("kitap", &[T::A3pl]).unwrap();
        assert_eq!(surfaces(&out), ["kitaplar"]);
    }

    #[test]
    fn generate_by_ids() {
        let m = morphology();
        let out = m.generate_by_ids("elma_Noun", &["A3pl", "P1pl"]).unwrap();
        assert_eq!(surfaces(&out), ["elmalarımız"]);

        assert!(matches!(
            m.generate_by_ids("armut_Noun", &["A3pl"]),
            Err(MorphologyError::UnknownItem(_))
        ));
        assert!(matches!(
            m.generate_by_ids("elma_Noun", &["Plural"]),
            Err(MorphologyError::Generation(GenerationError::UnknownMorpheme(_)))
        ));
    }
}
