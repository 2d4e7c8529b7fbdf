// Dictionary text loader
//
// One item per line:
//
//     lemma [P:pos,secondary; A:attr,attr; Pr:pronunciation; Index:n; Ref:id; Roots:a-b]
//
// Everything in brackets is optional. `##` starts a comment. Loading runs
// in two passes: every line is parsed first, then `Roots:` and `Ref:` are
// resolved against the complete set of items. Any error aborts the load.

#[cfg(feature = "binary")]
pub mod binary;

use std::path::Path;
use std::str::FromStr;

use hashbrown::HashMap;
use morfo_core::case::{is_apostrophe, lower, lower_english, normalize_circumflex};
use morfo_core::character::{
    contains_vowel, is_stop_consonant, is_turkish_letter, is_voiceless, is_vowel, last_letter,
    voice, vowel_count,
};
use morfo_core::{DictionaryItem, PrimaryPos, RootAttribute, RootAttributes, RootLexicon, SecondaryPos};

use crate::DictionaryError;

/// One parsed line, before cross references are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub line: usize,
    pub item: DictionaryItem,
    /// Components of a compound (`Roots:zeytin-yağ`).
    pub roots: Vec<String>,
}

/// Load a lexicon from dictionary text.
pub fn load_text(text: &str) -> Result<RootLexicon, DictionaryError> {
    load_lines(text.lines())
}

/// Load a lexicon from a text or binary file, chosen by its first bytes.
pub fn load_file(path: impl AsRef<Path>) -> Result<RootLexicon, DictionaryError> {
    let data = std::fs::read(path.as_ref())?;
    #[cfg(feature = "binary")]
    {
        if binary::is_binary(&data) {
            return binary::read(&data);
        }
    }
    let text = String::from_utf8(data).map_err(|e| DictionaryError::Malformed {
        line: 0,
        message: format!("not UTF-8: {e}"),
    })?;
    load_text(&text)
}

pub fn load_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<RootLexicon, DictionaryError> {
    let mut entries = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        if let Some(entry) = parse_line(line, i + 1)? {
            entries.push(entry);
        }
    }
    resolve(entries)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Meta {
    primary: Option<PrimaryPos>,
    secondary: Option<SecondaryPos>,
    attributes: RootAttributes,
    pronunciation: Option<String>,
    index: Option<u32>,
    reference: Option<String>,
    roots: Vec<String>,
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Entry>, DictionaryError> {
    let malformed = |message: &str| DictionaryError::Malformed {
        line: line_no,
        message: message.to_string(),
    };

    let line = match line.find("##") {
        Some(i) => &line[..i],
        None => line,
    }
    .trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (lemma, meta) = match line.find('[') {
        Some(start) => {
            let body = line[start + 1..]
                .strip_suffix(']')
                .ok_or_else(|| malformed("missing closing bracket"))?;
            (line[..start].trim(), parse_meta(body, line_no)?)
        }
        None => (line, Meta::default()),
    };
    if lemma.is_empty() {
        return Err(malformed("empty lemma"));
    }

    let primary = meta.primary.unwrap_or_else(|| infer_pos(lemma));
    let secondary = meta.secondary.unwrap_or_else(|| {
        let capitalized = lemma.chars().next().is_some_and(char::is_uppercase);
        if primary == PrimaryPos::Noun && capitalized {
            SecondaryPos::ProperNoun
        } else {
            SecondaryPos::None
        }
    });

    let mut attributes = meta.attributes;
    let root = make_root(lemma, primary, attributes).ok_or_else(|| DictionaryError::InvalidVerb {
        line: line_no,
        lemma: lemma.to_string(),
    })?;

    let pronunciation = match meta.pronunciation {
        Some(p) => lower(&p),
        None if needs_guess(&root, secondary) => {
            attributes.insert(RootAttribute::PronunciationGuessed);
            guess_pronunciation(&root)
        }
        None => root.clone(),
    };

    infer_attributes(&pronunciation, primary, secondary, &mut attributes);
    if attributes.contains(RootAttribute::Voicing) && !voiceable(lemma, &root) {
        return Err(DictionaryError::ImproperVoicing {
            line: line_no,
            lemma: lemma.to_string(),
        });
    }

    let mut item = DictionaryItem::new(lemma, root, primary, secondary, attributes)
        .with_pronunciation(pronunciation)
        .with_index(meta.index.unwrap_or(0));
    if let Some(r) = meta.reference {
        item.set_reference(r);
    }
    Ok(Some(Entry {
        line: line_no,
        item,
        roots: meta.roots,
    }))
}

fn parse_meta(body: &str, line_no: usize) -> Result<Meta, DictionaryError> {
    let tag = |source| DictionaryError::UnknownTag { line: line_no, source };
    let mut meta = Meta::default();
    for field in body.split(';').map(str::trim).filter(|f| !f.is_empty()) {
        let Some((key, value)) = field.split_once(':') else {
            return Err(DictionaryError::Malformed {
                line: line_no,
                message: format!("expected key:value, got {field:?}"),
            });
        };
        let value = value.trim();
        match key.trim() {
            "P" => {
                let mut parts = value.split(',').map(str::trim);
                if let Some(p) = parts.next() {
                    meta.primary = Some(PrimaryPos::from_str(p).map_err(tag)?);
                }
                if let Some(s) = parts.next() {
                    meta.secondary = Some(SecondaryPos::from_str(s).map_err(tag)?);
                }
            }
            "A" => {
                for a in value.split(',').map(str::trim).filter(|a| !a.is_empty()) {
                    meta.attributes.insert(RootAttribute::from_str(a).map_err(tag)?);
                }
            }
            "Pr" => meta.pronunciation = Some(value.to_string()),
            "Index" => {
                let index = value.parse().map_err(|_| DictionaryError::Malformed {
                    line: line_no,
                    message: format!("bad index {value:?}"),
                })?;
                meta.index = Some(index);
            }
            "Ref" => meta.reference = Some(value.to_string()),
            "Roots" => meta.roots = value.split('-').map(|r| r.trim().to_string()).collect(),
            other => {
                return Err(DictionaryError::Malformed {
                    line: line_no,
                    message: format!("unknown field {other:?}"),
                });
            }
        }
    }
    Ok(meta)
}

fn infer_pos(lemma: &str) -> PrimaryPos {
    let lowercase = lemma.chars().next().is_some_and(char::is_lowercase);
    if lowercase && lemma.chars().count() > 3 && (lemma.ends_with("mak") || lemma.ends_with("mek")) {
        PrimaryPos::Verb
    } else {
        PrimaryPos::Noun
    }
}

/// Normalized root of a lemma; `None` for a verb without an infinitive.
fn make_root(lemma: &str, pos: PrimaryPos, attributes: RootAttributes) -> Option<String> {
    let lowered = if attributes.contains(RootAttribute::LocaleEn) {
        lower_english(lemma)
    } else {
        lower(lemma)
    };
    let mut root = normalize_circumflex(&lowered);
    if root.chars().any(is_turkish_letter) {
        root.retain(|c| !is_apostrophe(c) && c != '-' && c != ' ');
    }
    if pos == PrimaryPos::Verb {
        let stem = root.strip_suffix("mak").or_else(|| root.strip_suffix("mek"))?;
        if stem.is_empty() {
            return None;
        }
        return Some(stem.to_string());
    }
    Some(root)
}

fn needs_guess(root: &str, secondary: SecondaryPos) -> bool {
    root.chars().all(is_turkish_letter)
        && !root.is_empty()
        && (secondary == SecondaryPos::Abbreviation || !contains_vowel(root))
}

/// Spell an abbreviation out letter by letter: `tbmm -> tebememe`.
fn guess_pronunciation(root: &str) -> String {
    let mut out = String::new();
    for c in root.chars() {
        let name = match c {
            c if is_vowel(c) => {
                out.push(c);
                continue;
            }
            'ğ' => "yumuşakge",
            'h' => "he",
            'k' => "ka",
            'q' => "kü",
            'w' => "ve",
            'x' => "iks",
            _ => "",
        };
        if name.is_empty() {
            out.push(c);
            out.push('e');
        } else {
            out.push_str(name);
        }
    }
    out
}

fn voiceable(lemma: &str, root: &str) -> bool {
    lemma.ends_with("nk") || last_letter(root).is_some_and(|c| voice(c) != c)
}

/// Fill in the root attributes a dictionary line may leave implicit.
fn infer_attributes(
    pronunciation: &str,
    pos: PrimaryPos,
    secondary: SecondaryPos,
    attrs: &mut RootAttributes,
) {
    let Some(last) = last_letter(pronunciation) else {
        return;
    };
    let vowels = vowel_count(pronunciation);
    match pos {
        PrimaryPos::Verb => {
            if is_vowel(last) {
                attrs.insert(RootAttribute::ProgressiveVowelDrop);
                attrs.insert(RootAttribute::PassiveIn);
            }
            if vowels > 1 && !attrs.contains(RootAttribute::AoristA) {
                attrs.insert(RootAttribute::AoristI);
            }
            if vowels == 1 && !attrs.contains(RootAttribute::AoristI) {
                attrs.insert(RootAttribute::AoristA);
            }
            if last == 'l' {
                attrs.insert(RootAttribute::PassiveIn);
            }
            if is_vowel(last) || (matches!(last, 'l' | 'r') && vowels > 1) {
                attrs.insert(RootAttribute::CausativeT);
            }
        }
        PrimaryPos::Noun | PrimaryPos::Adjective
            if !matches!(secondary, SecondaryPos::ProperNoun | SecondaryPos::Abbreviation) =>
        {
            if attrs.contains(RootAttribute::NoVoicing) || attrs.contains(RootAttribute::InverseHarmony) {
                return;
            }
            let stop_final = vowels > 1 && is_voiceless(last) && is_stop_consonant(last);
            if stop_final || pronunciation.ends_with("nk") || (vowels > 1 && pronunciation.ends_with("og")) {
                attrs.insert(RootAttribute::Voicing);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Cross references
// ---------------------------------------------------------------------------

fn resolve(mut entries: Vec<Entry>) -> Result<RootLexicon, DictionaryError> {
    let mut by_lemma: HashMap<String, usize> = HashMap::new();
    for (i, e) in entries.iter().enumerate() {
        by_lemma.entry(e.item.lemma.clone()).or_insert(i);
    }

    // Compound roots are synthesized from their last component.
    let mut synthesized = Vec::new();
    for i in 0..entries.len() {
        if entries[i].roots.is_empty() {
            continue;
        }
        let entry = &entries[i];
        let mut last = None;
        for component in &entry.roots {
            let Some(&j) = by_lemma.get(component.as_str()) else {
                return Err(DictionaryError::UnresolvedRoots {
                    line: entry.line,
                    lemma: entry.item.lemma.clone(),
                    root: component.clone(),
                });
            };
            last = Some(j);
        }
        let Some(last) = last else { continue };
        let lemma: String = entry.roots.concat();
        let mut attributes = entries[last].item.attributes;
        attributes.remove(RootAttribute::CompoundP3sg);
        attributes.insert(RootAttribute::CompoundP3sgRoot);
        let root_item = DictionaryItem::new(
            lemma.clone(),
            lower(&lemma),
            PrimaryPos::Noun,
            SecondaryPos::None,
            attributes,
        );
        let id = root_item.id().to_string();
        entries[i].item.set_reference(id);
        if !by_lemma.contains_key(lemma.as_str()) {
            synthesized.push(root_item);
        }
    }

    let mut lexicon = RootLexicon::new();
    for e in &entries {
        lexicon.add(e.item.clone());
    }
    for item in synthesized {
        lexicon.add(item);
    }

    for e in &entries {
        if let Some(id) = e.item.reference() {
            if !lexicon.contains_id(id) {
                return Err(DictionaryError::UnresolvedReference {
                    line: e.line,
                    id: id.to_string(),
                });
            }
        }
    }
    log::debug!("loaded {} dictionary items", lexicon.len());
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> DictionaryItem {
        parse_line(line, 1).unwrap().unwrap().item
    }

    #[test]
    fn comments_and_blank_lines() {
        assert!(parse_line("", 1).unwrap().is_none());
        assert!(parse_line("   ## only a comment", 1).unwrap().is_none());
        assert_eq!(parse("elma ## apple").lemma, "elma");
    }

    #[test]
    fn pos_inference() {
        let elma = parse("elma");
        assert_eq!(elma.primary_pos, PrimaryPos::Noun);
        assert_eq!(elma.id(), "elma_Noun");

        let yapmak = parse("yapmak");
        assert_eq!(yapmak.primary_pos, PrimaryPos::Verb);
        assert_eq!(yapmak.root, "yap");
        assert!(yapmak.has_attribute(RootAttribute::AoristA));

        let ankara = parse("Ankara");
        assert_eq!(ankara.secondary_pos, SecondaryPos::ProperNoun);
        assert_eq!(ankara.root, "ankara");
        assert_eq!(ankara.id(), "Ankara_Noun_Prop");
    }

    #[test]
    fn explicit_fields() {
        let item = parse("yüz [P:Num,Card; Index:2]");
        assert_eq!(item.primary_pos, PrimaryPos::Numeral);
        assert_eq!(item.secondary_pos, SecondaryPos::Cardinal);
        assert_eq!(item.index(), 2);
        assert_eq!(item.id(), "yüz_Num_Card_2");

        let gel = parse("gelmek [A:Aorist_I]");
        assert!(gel.has_attribute(RootAttribute::AoristI));
        assert!(!gel.has_attribute(RootAttribute::AoristA));
        assert!(gel.has_attribute(RootAttribute::PassiveIn));
    }

    #[test]
    fn verb_inference() {
        let ara = parse("aramak");
        assert!(ara.has_attribute(RootAttribute::ProgressiveVowelDrop));
        assert!(ara.has_attribute(RootAttribute::PassiveIn));
        assert!(ara.has_attribute(RootAttribute::AoristI));
        assert!(ara.has_attribute(RootAttribute::CausativeT));
        let oyna = parse("oynamak");
        assert!(oyna.has_attribute(RootAttribute::AoristI));
    }

    #[test]
    fn voicing_inference() {
        assert!(parse("kitap").has_attribute(RootAttribute::Voicing));
        assert!(parse("renk").has_attribute(RootAttribute::Voicing));
        assert!(!parse("top").has_attribute(RootAttribute::Voicing));
        assert!(!parse("hukuk [A:NoVoicing]").has_attribute(RootAttribute::Voicing));
        assert!(!parse("saat [A:InverseHarmony]").has_attribute(RootAttribute::Voicing));
    }

    #[test]
    fn abbreviation_pronunciation() {
        let item = parse("TBMM [P:Noun,Abbrv]");
        assert_eq!(item.root, "tbmm");
        assert_eq!(item.pronunciation, "tebememe");
        assert!(item.has_attribute(RootAttribute::PronunciationGuessed));
        assert_eq!(parse("NATO [P:Noun,Abbrv; Pr:nato]").pronunciation, "nato");
    }

    #[test]
    fn circumflex_and_apostrophe() {
        assert_eq!(parse("kâğıt").root, "kağıt");
        assert_eq!(parse("hoş geldin [P:Interj]").root, "hoşgeldin");
        for lemma in ["Ahmet'in", "Ahmet\u{2019}in", "Ahmet\u{02BC}in"] {
            assert_eq!(parse(lemma).root, "ahmetin", "{lemma:?}");
        }
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            parse_line("elma [P:Noun", 3),
            Err(DictionaryError::Malformed { line: 3, .. })
        ));
        assert!(matches!(
            parse_line("elma [Q:x]", 4),
            Err(DictionaryError::Malformed { line: 4, .. })
        ));
        assert!(matches!(
            parse_line("elma [A:Sparkly]", 5),
            Err(DictionaryError::UnknownTag { line: 5, .. })
        ));
        assert!(matches!(
            parse_line("koşu [P:Verb]", 6),
            Err(DictionaryError::InvalidVerb { line: 6, .. })
        ));
        assert!(matches!(
            parse_line("ev [A:Voicing]", 7),
            Err(DictionaryError::ImproperVoicing { line: 7, .. })
        ));
    }

    #[test]
    fn compound_roots_are_synthesized() {
        let lexicon = load_text("zeytin\nyağ\nzeytinyağı [A:CompoundP3sg; Roots:zeytin-yağ]\n").unwrap();
        assert_eq!(lexicon.len(), 4);
        let compound = &lexicon.matching("zeytinyağı")[0];
        assert_eq!(compound.reference(), Some("zeytinyağ_Noun"));
        let root = lexicon.resolve_reference(compound).unwrap();
        assert!(root.has_attribute(RootAttribute::CompoundP3sgRoot));
    }

    #[test]
    fn unresolved_references_abort_the_load() {
        assert!(matches!(
            load_text("zeytinyağı [A:CompoundP3sg; Roots:zeytin-yağ]"),
            Err(DictionaryError::UnresolvedRoots { line: 1, .. })
        ));
        assert!(matches!(
            load_text("elma\nelmacık [Ref:armut_Noun]"),
            Err(DictionaryError::UnresolvedReference { line: 2, .. })
        ));
    }

    #[test]
    fn duplicates_are_skipped() {
        let lexicon = load_text("elma\nelma\nelma [Index:1]").unwrap();
        assert_eq!(lexicon.len(), 2);
    }
}
