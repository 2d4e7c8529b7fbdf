// Turkish-aware lowercasing and input normalization
//
// Turkish has two distinct "i" letters: dotless ı/I and dotted i/İ. The
// standard library's case mapping follows the root locale, which maps `I`
// to `i` and `İ` to `i̇` (two code points). Everything in this module maps
// one char to exactly one char using the Turkish rules instead.

/// Lowercase a single character using Turkish rules (`I`→`ı`, `İ`→`i`).
pub fn lower_char(c: char) -> char {
    match c {
        'I' => '\u{0131}',
        '\u{0130}' => 'i',
        c if c.is_ascii() => c.to_ascii_lowercase(),
        c => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        }
    }
}

/// Lowercase a string with Turkish rules.
pub fn lower(s: &str) -> String {
    s.chars().map(lower_char).collect()
}

/// Lowercase a string with the plain (English) mapping, so `I` becomes `i`.
///
/// Used for foreign roots marked with the `LocaleEn` root attribute.
pub fn lower_english(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\u{0130}' { 'i' } else { lower_char_en(c) })
        .collect()
}

fn lower_char_en(c: char) -> char {
    if c == 'I' { 'i' } else { lower_char(c) }
}

/// Replace circumflexed vowels with their plain forms: â→a, î→i, û→u.
pub fn normalize_circumflex(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{00E2}' => 'a',
            '\u{00EE}' => 'i',
            '\u{00FB}' => 'u',
            '\u{00C2}' => 'A',
            '\u{00CE}' => '\u{0130}',
            '\u{00DB}' => 'U',
            other => other,
        })
        .collect()
}

/// Whether a character is an apostrophe used to separate proper noun suffixes.
pub fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{02BC}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_i_mapping() {
        assert_eq!(lower_char('I'), 'ı');
        assert_eq!(lower_char('İ'), 'i');
        assert_eq!(lower("ISPARTA"), "ısparta");
        assert_eq!(lower("İSTANBUL"), "istanbul");
    }

    #[test]
    fn english_lowering_keeps_dotted_i() {
        assert_eq!(lower_english("IPHONE"), "iphone");
        assert_eq!(lower_english("İzmir"), "izmir");
    }

    #[test]
    fn non_ascii_letters() {
        assert_eq!(lower_char('Ç'), 'ç');
        assert_eq!(lower_char('Ş'), 'ş');
        assert_eq!(lower("ÇİÇEK"), "çiçek");
    }

    #[test]
    fn circumflex() {
        assert_eq!(normalize_circumflex("kâğıt"), "kağıt");
        assert_eq!(normalize_circumflex("millî"), "milli");
        assert_eq!(normalize_circumflex("mahkûm"), "mahkum");
    }

    #[test]
    fn apostrophes() {
        assert!(is_apostrophe('\''));
        assert!(is_apostrophe('’'));
        assert!(!is_apostrophe('-'));
    }
}
