//! Devanagari to ITRANS romanization.
//!
//! Consonants carry an inherent `a` that is dropped before a vowel sign or a
//! virama, so `राम` becomes `rAma` and `क्ष` becomes `kSha`. Output keeps the
//! ITRANS case distinctions (`A`, `Sh`, `T`); callers that compare names
//! lowercase afterwards. ASCII passes through unchanged, which lets mixed
//! script names (`राम Thapa`) survive.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

const VIRAMA: char = '\u{094D}';
const NUKTA: char = '\u{093C}';
const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Raised for letters outside Devanagari and ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no ITRANS mapping for U+{code:04X} at char {position}")]
pub struct TransliterationError {
    pub code: u32,
    pub position: usize,
}

/// Romanizes Devanagari text into ITRANS.
///
/// The input is NFC-normalized first. Non-letter characters outside both
/// scripts (punctuation, symbols, other whitespace) are copied through.
///
/// ```
/// use blm_normalization::transliterate;
///
/// assert_eq!(transliterate("राम").unwrap(), "rAma");
/// assert_eq!(transliterate("कुमार").unwrap(), "kumAra");
/// assert!(transliterate("Иван").is_err());
/// ```
pub fn transliterate(text: &str) -> Result<String, TransliterationError> {
    let normalized: String = text.nfc().collect();
    let mut out = String::with_capacity(normalized.len() * 2);
    let mut chars = normalized.chars().enumerate().peekable();
    let mut inherent_a = false;

    while let Some((position, c)) = chars.next() {
        if let Some(roman) = consonant(c) {
            if inherent_a {
                out.push('a');
            }
            let roman = if chars.peek().is_some_and(|&(_, next)| next == NUKTA) {
                chars.next();
                nukta_consonant(c).unwrap_or(roman)
            } else {
                roman
            };
            out.push_str(roman);
            inherent_a = true;
            continue;
        }

        if let Some(roman) = vowel_sign(c) {
            out.push_str(roman);
            inherent_a = false;
            continue;
        }

        match c {
            VIRAMA => {
                inherent_a = false;
                continue;
            }
            NUKTA | ZWJ | ZWNJ => continue,
            _ => {}
        }

        if inherent_a {
            out.push('a');
            inherent_a = false;
        }

        if let Some(roman) = independent_vowel(c).or_else(|| sign(c)) {
            out.push_str(roman);
        } else if let Some(digit) = devanagari_digit(c) {
            out.push(digit);
        } else if is_devanagari(c) || (!c.is_ascii() && c.is_alphabetic()) {
            return Err(TransliterationError {
                code: u32::from(c),
                position,
            });
        } else {
            out.push(c);
        }
    }

    if inherent_a {
        out.push('a');
    }
    Ok(out)
}

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

fn devanagari_digit(c: char) -> Option<char> {
    let code = u32::from(c);
    if (0x0966..=0x096F).contains(&code) {
        char::from_digit(code - 0x0966, 10)
    } else {
        None
    }
}

fn consonant(c: char) -> Option<&'static str> {
    let roman = match c {
        'क' => "k",
        'ख' => "kh",
        'ग' => "g",
        'घ' => "gh",
        'ङ' => "~N",
        'च' => "ch",
        'छ' => "Ch",
        'ज' => "j",
        'झ' => "jh",
        'ञ' => "~n",
        'ट' => "T",
        'ठ' => "Th",
        'ड' => "D",
        'ढ' => "Dh",
        'ण' => "N",
        'त' => "t",
        'थ' => "th",
        'द' => "d",
        'ध' => "dh",
        'न' | 'ऩ' => "n",
        'प' => "p",
        'फ' => "ph",
        'ब' => "b",
        'भ' => "bh",
        'म' => "m",
        'य' => "y",
        'र' | 'ऱ' => "r",
        'ल' => "l",
        'ळ' | 'ऴ' => "L",
        'व' => "v",
        'श' => "sh",
        'ष' => "Sh",
        'स' => "s",
        'ह' => "h",
        _ => return None,
    };
    Some(roman)
}

/// Consonant followed by a separate nukta sign.
fn nukta_consonant(c: char) -> Option<&'static str> {
    let roman = match c {
        'क' => "q",
        'ख' => "K",
        'ग' => "G",
        'ज' => "z",
        'ड' => ".D",
        'ढ' => ".Dh",
        'फ' => "f",
        'य' => "Y",
        _ => return None,
    };
    Some(roman)
}

fn vowel_sign(c: char) -> Option<&'static str> {
    let roman = match c {
        'ा' => "A",
        'ि' => "i",
        'ी' => "I",
        'ु' => "u",
        'ू' => "U",
        'ृ' => "RRi",
        'ॄ' => "RRI",
        'ॢ' => "LLi",
        'ॣ' => "LLI",
        'ॅ' | 'े' => "e",
        'ै' => "ai",
        'ॉ' | 'ो' => "o",
        'ौ' => "au",
        _ => return None,
    };
    Some(roman)
}

fn independent_vowel(c: char) -> Option<&'static str> {
    let roman = match c {
        'अ' => "a",
        'आ' => "A",
        'इ' => "i",
        'ई' => "I",
        'उ' => "u",
        'ऊ' => "U",
        'ऋ' => "RRi",
        'ॠ' => "RRI",
        'ऌ' => "LLi",
        'ॡ' => "LLI",
        'ऍ' | 'ए' => "e",
        'ऐ' => "ai",
        'ऑ' | 'ओ' => "o",
        'औ' => "au",
        _ => return None,
    };
    Some(roman)
}

fn sign(c: char) -> Option<&'static str> {
    let roman = match c {
        'ं' => "M",
        'ँ' => ".N",
        'ः' => "H",
        'ऽ' => ".a",
        'ॐ' => "OM",
        '।' => "|",
        '॥' => "||",
        _ => return None,
    };
    Some(roman)
}
