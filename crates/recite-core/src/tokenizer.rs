//! Whitespace tokenizer and stop-word filter.

use std::collections::HashSet;

/// Characters stripped from both ends of a token before the eligibility check.
pub const PUNCTUATION: &[char] = &[
    '.', ',', '?', '!', ';', ':', '"', '\'', '(', ')', '“', '”', '‘', '’', '·', '…',
];

/// Function words and particles that never start a blank.
pub const KOREAN_STOP_WORDS: &[&str] = &[
    "또", "및", "곧", "즉", "그러나", "그런데", "그리고", "그러므로", "하지만", "또한", "이에",
    "이와", "그리하여", "이", "그", "저", "것", "바", "수", "안", "위", "아래", "때", "후",
    "대하여", "위하여", "인하여", "더불어", "함께", "가운데", "중에", "앞에", "뒤에",
    "가라사대", "이르되", "하니", "하더라", "있더라", "하노라", "주기를", "그에게는", "아니한",
    "하리라", "있는", "하시는", "행위를", "가진", "주어", "하나님의", "말씀을", "교회의", "주라",
    "옷", "내가", "나는", "너와", "보니", "보매", "이르리니", "을", "한", "와", "가", "를", "에",
];

/// Minimum cleaned length, in characters, for a token to be blankable.
pub const MIN_ELIGIBLE_CHARS: usize = 2;

/// A closed set of stop words.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self {
            words: KOREAN_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl StopWords {
    /// The built-in list extended with `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.words.extend(
            extra
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.trim().is_empty()),
        );
        set
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A contiguous non-whitespace run of a verse body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token as written.
    pub raw: String,
    /// The token with surrounding punctuation removed.
    pub clean: String,
    /// Whether the token may be part of a blank.
    pub eligible: bool,
}

/// Strip leading and trailing punctuation.
pub fn clean_token(raw: &str) -> &str {
    raw.trim_matches(PUNCTUATION)
}

/// A token is eligible iff its cleaned form is long enough and not a stop word.
pub fn is_eligible(clean: &str, stop_words: &StopWords) -> bool {
    clean.chars().count() >= MIN_ELIGIBLE_CHARS && !stop_words.contains(clean)
}

/// Split `text` on whitespace and flag each token's eligibility.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<Token> {
    text.split_whitespace()
        .map(|raw| {
            let clean = clean_token(raw);
            Token {
                raw: raw.to_string(),
                clean: clean.to_string(),
                eligible: is_eligible(clean, stop_words),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let tokens = tokenize("  예수 그리스도의\t계시라\n", &StopWords::default());
        let raws: Vec<&str> = tokens.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(raws, vec!["예수", "그리스도의", "계시라"]);
    }

    #[test]
    fn punctuation_is_stripped_for_eligibility_only() {
        let tokens = tokenize("계시라.", &StopWords::default());
        assert_eq!(tokens[0].raw, "계시라.");
        assert_eq!(tokens[0].clean, "계시라");
        assert!(tokens[0].eligible);
    }

    #[test]
    fn stop_words_and_short_tokens_are_ineligible() {
        let tokens = tokenize("그리고 또 내가 종들에게", &StopWords::default());
        let flags: Vec<bool> = tokens.iter().map(|t| t.eligible).collect();
        assert_eq!(flags, vec![false, false, false, true]);
    }

    #[test]
    fn stop_word_with_punctuation_is_still_a_stop_word() {
        let tokens = tokenize("그러나,", &StopWords::default());
        assert!(!tokens[0].eligible);
    }

    #[test]
    fn single_character_token_is_ineligible() {
        let tokens = tokenize("손 (빛)", &StopWords::default());
        assert!(!tokens[0].eligible);
        assert_eq!(tokens[1].clean, "빛");
        assert!(!tokens[1].eligible);
    }

    #[test]
    fn extra_stop_words_extend_the_default_set() {
        let words = StopWords::with_extra(["일곱", " "]);
        assert!(words.contains("일곱"));
        assert!(words.contains("그리고"));
        assert_eq!(words.len(), StopWords::default().len() + 1);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("   ", &StopWords::default()).is_empty());
    }
}
