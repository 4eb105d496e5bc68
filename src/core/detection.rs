//! Source-language detection for the auto mode.
//!
//! Pure-local heuristic: script composition first (Han, kana, Hangul, Arabic,
//! Cyrillic), stopword profiles for Latin-script languages second. Candidates
//! come back ranked by score; a small preferred list stabilises the choice
//! among near-ties so that e.g. short Spanish input does not flap to
//! Portuguese between keystrokes.

use unicode_segmentation::UnicodeSegmentation;

/// Languages favoured when they land anywhere in the top three candidates.
const PREFERRED: &[&str] = &["eng", "deu", "spa", "fra", "ita"];

/// Function-word profiles for the Latin-script languages we can tell apart.
/// ISO 639-3 codes, matched case-insensitively per word.
const STOPWORDS: &[(&str, &[&str])] = &[
    (
        "eng",
        &[
            "the", "of", "and", "to", "in", "is", "you", "that", "it", "for", "was", "are",
            "with", "his", "they", "this", "have", "from", "not", "but",
        ],
    ),
    (
        "spa",
        &[
            "de", "la", "que", "el", "en", "y", "los", "del", "se", "las", "por", "un",
            "para", "con", "una", "su", "al", "es", "lo", "como", "favor",
        ],
    ),
    (
        "deu",
        &[
            "der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich", "des",
            "auf", "für", "ist", "im", "dem", "nicht", "ein", "eine", "als",
        ],
    ),
    (
        "fra",
        &[
            "de", "la", "le", "et", "les", "des", "en", "un", "du", "une", "que", "est",
            "pour", "qui", "dans", "par", "plus", "pas", "au", "sur",
        ],
    ),
    (
        "ita",
        &[
            "di", "che", "la", "il", "un", "per", "non", "una", "in", "sono", "mi", "si",
            "lo", "ma", "con", "le", "come", "della", "anche", "più",
        ],
    ),
    (
        "por",
        &[
            "de", "que", "e", "o", "da", "em", "um", "para", "com", "não", "uma", "os",
            "no", "se", "na", "por", "mais", "as", "dos", "como",
        ],
    ),
    (
        "nld",
        &[
            "de", "van", "het", "een", "en", "in", "is", "dat", "op", "te", "zijn", "voor",
            "met", "die", "niet", "aan", "er", "om", "ook", "als",
        ],
    ),
    (
        "cat",
        &[
            "de", "la", "que", "el", "i", "a", "en", "un", "per", "amb", "una", "els",
            "al", "és", "més", "les", "com", "del", "ho", "si", "us", "plau",
        ],
    ),
];

/// A ranked detection candidate. `code` is ISO 639-3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub code: &'static str,
    pub score: f64,
}

fn is_han(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}')
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}')
}

fn is_arabic(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, '\u{00C0}'..='\u{024F}')
}

/// Rank language candidates for `text`, best first. Empty when the text has
/// no letters to go on.
pub fn rank(text: &str) -> Vec<Candidate> {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return Vec::new();
    }
    let total = letters.len() as f64;

    let fraction = |pred: fn(char) -> bool| -> f64 {
        letters.iter().filter(|&&c| pred(c)).count() as f64 / total
    };

    let han = fraction(is_han);
    let kana = fraction(is_kana);
    let hangul = fraction(is_hangul);
    let arabic = fraction(is_arabic);
    let cyrillic = fraction(is_cyrillic);
    let latin = fraction(is_latin);

    let mut candidates = Vec::new();
    if kana > 0.05 {
        // Any meaningful kana presence means Japanese even when Han dominates.
        candidates.push(Candidate {
            code: "jpn",
            score: kana + han,
        });
    } else if han > 0.0 {
        candidates.push(Candidate {
            code: "cmn",
            score: han,
        });
    }
    if hangul > 0.0 {
        candidates.push(Candidate {
            code: "kor",
            score: hangul,
        });
    }
    if arabic > 0.0 {
        candidates.push(Candidate {
            code: "ara",
            score: arabic,
        });
    }
    if cyrillic > 0.0 {
        candidates.push(Candidate {
            code: "rus",
            score: cyrillic,
        });
    }

    if latin > 0.0 {
        let words: Vec<String> = text
            .unicode_words()
            .map(|w| w.to_lowercase())
            .collect();
        if !words.is_empty() {
            for &(code, stopwords) in STOPWORDS {
                let hits = words
                    .iter()
                    .filter(|w| stopwords.contains(&w.as_str()))
                    .count();
                if hits > 0 {
                    let ratio = hits as f64 / words.len() as f64;
                    candidates.push(Candidate {
                        code,
                        score: ratio * latin,
                    });
                }
            }
        }
    }

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Detect the language of `text` and return its ISO 639-1 code.
///
/// When a preferred language appears in the top three candidates it wins over
/// the single best score; that keeps short mixed input from flapping between
/// detections. Codes without a 639-1 alias fall back to the 639-3 string.
pub fn detect(text: &str) -> Option<String> {
    let ranked = rank(text);
    let top = ranked.first()?;

    let chosen = ranked
        .iter()
        .take(3)
        .find(|c| PREFERRED.contains(&c.code))
        .unwrap_or(top);

    Some(to_639_1(chosen.code))
}

fn to_639_1(code: &str) -> String {
    isolang::Language::from_639_3(code)
        .and_then(|lang| lang.to_639_1())
        .map(|short| short.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Auto-detection state for the source-language picker.
///
/// Enabled by default; a manual pick disables it until the input is cleared,
/// which also wipes the stale detection.
#[derive(Debug, Default)]
pub struct AutoDetector {
    disabled: bool,
    detected: Option<String>,
}

impl AutoDetector {
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    pub fn detected(&self) -> Option<&str> {
        self.detected.as_deref()
    }

    /// Feed the current input text. Blank input resets the detector entirely:
    /// detection cleared and auto mode re-enabled.
    pub fn observe(&mut self, text: &str) -> Option<&str> {
        if text.trim().is_empty() {
            self.detected = None;
            self.disabled = false;
            return None;
        }
        if self.disabled {
            return self.detected.as_deref();
        }
        if let Some(code) = detect(text) {
            self.detected = Some(code);
        }
        self.detected.as_deref()
    }

    /// The user picked a source language by hand; stop auto-detecting until
    /// the next blank input.
    pub fn manual_override(&mut self) {
        self.disabled = true;
    }
}
