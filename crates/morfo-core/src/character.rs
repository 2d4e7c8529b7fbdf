// Character classification for the Turkish alphabet
//
// All predicates are case-insensitive. Circumflexed vowels (â, î, û) are
// classified like their plain counterparts so that loan words written
// with them keep correct vowel harmony.

use crate::case::lower_char;

// ---------------------------------------------------------------------------
// Turkish phonological constants
// ---------------------------------------------------------------------------

/// Turkish vowels (lowercase), including circumflexed variants.
const TURKISH_VOWELS: &[char] = &[
    'a', 'e', '\u{0131}', 'i', 'o', '\u{00F6}', 'u', '\u{00FC}', '\u{00E2}', '\u{00EE}', '\u{00FB}',
];

/// Front (frontal) vowels: e i ö ü î.
const FRONTAL_VOWELS: &[char] = &['e', 'i', '\u{00F6}', '\u{00FC}', '\u{00EE}'];

/// Rounded vowels: o ö u ü û.
const ROUNDED_VOWELS: &[char] = &['o', '\u{00F6}', 'u', '\u{00FC}', '\u{00FB}'];

/// Turkish consonants plus the foreign letters q, w, x.
const TURKISH_CONSONANTS: &[char] = &[
    'b', 'c', '\u{00E7}', 'd', 'f', 'g', '\u{011F}', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'r', 's',
    '\u{015F}', 't', 'v', 'y', 'z', 'q', 'w', 'x',
];

/// Voiceless consonants: ç f h k p s ş t.
const VOICELESS_CONSONANTS: &[char] = &['\u{00E7}', 'f', 'h', 'k', 'p', 's', '\u{015F}', 't'];

/// Stop consonants (both voiced and voiceless): b c ç d g k p t.
const STOP_CONSONANTS: &[char] = &['b', 'c', '\u{00E7}', 'd', 'g', 'k', 'p', 't'];

// ---------------------------------------------------------------------------
// Letter classification
// ---------------------------------------------------------------------------

/// Check whether a character is a Turkish vowel.
pub fn is_vowel(c: char) -> bool {
    TURKISH_VOWELS.contains(&lower_char(c))
}

/// Check whether a character is a consonant of the (extended) Turkish alphabet.
pub fn is_consonant(c: char) -> bool {
    TURKISH_CONSONANTS.contains(&lower_char(c))
}

/// Check whether a character belongs to the alphabet at all.
pub fn is_turkish_letter(c: char) -> bool {
    is_vowel(c) || is_consonant(c)
}

/// Front vowel check. Returns `false` for consonants.
pub fn is_frontal(c: char) -> bool {
    FRONTAL_VOWELS.contains(&lower_char(c))
}

/// Rounded vowel check. Returns `false` for consonants.
pub fn is_rounded(c: char) -> bool {
    ROUNDED_VOWELS.contains(&lower_char(c))
}

/// Voiceless consonant check.
pub fn is_voiceless(c: char) -> bool {
    VOICELESS_CONSONANTS.contains(&lower_char(c))
}

/// Stop consonant check (b c ç d g k p t).
pub fn is_stop_consonant(c: char) -> bool {
    STOP_CONSONANTS.contains(&lower_char(c))
}

// ---------------------------------------------------------------------------
// Consonant alternation
// ---------------------------------------------------------------------------

/// Voice a voiceless stop: p→b, k→ğ, ç→c, t→d. `g` also softens to `ğ`.
///
/// Letters without a voiced counterpart are returned unchanged.
pub fn voice(c: char) -> char {
    match c {
        'p' => 'b',
        'k' => '\u{011F}',
        '\u{00E7}' => 'c',
        't' => 'd',
        'g' => '\u{011F}',
        'P' => 'B',
        'K' => '\u{011E}',
        '\u{00C7}' => 'C',
        'T' => 'D',
        'G' => '\u{011E}',
        other => other,
    }
}

/// Devoice a voiced stop: b→p, c→ç, d→t, g→k, ğ→k.
///
/// Letters without a voiceless counterpart are returned unchanged.
pub fn devoice(c: char) -> char {
    match c {
        'b' => 'p',
        'c' => '\u{00E7}',
        'd' => 't',
        'g' => 'k',
        '\u{011F}' => 'k',
        'B' => 'P',
        'C' => '\u{00C7}',
        'D' => 'T',
        'G' => 'K',
        '\u{011E}' => 'K',
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Sequence helpers
// ---------------------------------------------------------------------------

/// Last vowel of a character sequence.
pub fn last_vowel(s: &str) -> Option<char> {
    s.chars().rev().find(|&c| is_vowel(c))
}

/// First letter of a sequence.
pub fn first_letter(s: &str) -> Option<char> {
    s.chars().next()
}

/// Last letter of a sequence.
pub fn last_letter(s: &str) -> Option<char> {
    s.chars().next_back()
}

/// Whether the sequence contains at least one vowel.
pub fn contains_vowel(s: &str) -> bool {
    s.chars().any(is_vowel)
}

/// Number of vowels (syllables) in the sequence.
pub fn vowel_count(s: &str) -> usize {
    s.chars().filter(|&c| is_vowel(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels_and_consonants() {
        for c in ['a', 'e', 'ı', 'i', 'o', 'ö', 'u', 'ü', 'â'] {
            assert!(is_vowel(c), "{c} should be a vowel");
            assert!(!is_consonant(c));
        }
        for c in ['b', 'ç', 'ğ', 'ş', 'y', 'z'] {
            assert!(is_consonant(c), "{c} should be a consonant");
            assert!(!is_vowel(c));
        }
    }

    #[test]
    fn dotted_capital_i_is_a_front_vowel() {
        assert!(is_vowel('İ'));
        assert!(is_frontal('İ'));
        assert!(is_vowel('I'));
        assert!(!is_frontal('I'));
    }

    #[test]
    fn harmony_classes() {
        assert!(is_frontal('e'));
        assert!(!is_frontal('a'));
        assert!(is_rounded('ü'));
        assert!(!is_rounded('ı'));
        assert!(!is_frontal('k'));
    }

    #[test]
    fn voicing_pairs() {
        assert_eq!(voice('p'), 'b');
        assert_eq!(voice('k'), 'ğ');
        assert_eq!(voice('ç'), 'c');
        assert_eq!(voice('t'), 'd');
        assert_eq!(voice('m'), 'm');
        assert_eq!(devoice('d'), 't');
        assert_eq!(devoice('c'), 'ç');
        assert_eq!(devoice('ğ'), 'k');
        assert_eq!(devoice('l'), 'l');
    }

    #[test]
    fn voiceless_and_stop() {
        assert!(is_voiceless('ş'));
        assert!(is_voiceless('h'));
        assert!(!is_voiceless('b'));
        assert!(is_stop_consonant('b'));
        assert!(is_stop_consonant('k'));
        assert!(!is_stop_consonant('s'));
    }

    #[test]
    fn sequence_helpers() {
        assert_eq!(last_vowel("kitap"), Some('a'));
        assert_eq!(last_vowel("tbmm"), None);
        assert_eq!(vowel_count("elmalar"), 3);
        assert!(contains_vowel("ev"));
        assert!(!contains_vowel("gnctrkcll"));
        assert_eq!(first_letter("elma"), Some('e'));
        assert_eq!(last_letter("elma"), Some('a'));
    }
}
