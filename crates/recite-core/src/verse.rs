//! Verse line parsing.
//!
//! Accepted shapes: `[3:5] body`, `3:5] body`, `3:5 body`, and untagged
//! bodies. Full-width colons are normalised to `:`.

use crate::error::VerseError;
use crate::extract::strip_markup;
use crate::model::Verse;

impl Verse {
    /// Parse one raw verse line. `position` is the 1-based line number used to
    /// label untagged verses.
    pub fn parse(raw: &str, position: usize) -> Result<Verse, VerseError> {
        let line = raw.trim();

        let (reference, body, tagged) = if let Some(rest) = line.strip_prefix('[') {
            match split_reference(rest) {
                Some((reference, body)) => (reference, body, true),
                None => {
                    let tag = match line.find(']') {
                        Some(end) => &line[..=end],
                        None => line.split_whitespace().next().unwrap_or(line),
                    };
                    return Err(VerseError::MalformedReference {
                        tag: tag.to_string(),
                    });
                }
            }
        } else {
            match split_reference(line) {
                Some((reference, body)) => (reference, body, true),
                None => (format!("구절 {position}"), line, false),
            }
        };

        let body = body.trim();
        if strip_markup(body).is_empty() {
            return Err(VerseError::EmptyBody { label: reference });
        }

        Ok(Verse {
            reference,
            body: body.to_string(),
            tagged,
        })
    }

    /// Body with markup removed and whitespace collapsed: the whole-verse
    /// answer and the hint text.
    pub fn clean_text(&self) -> String {
        strip_markup(&self.body)
    }
}

/// Split a leading `chapter:verse` reference, with an optional closing `]`,
/// off `s`. Returns the normalised reference and the remaining text.
fn split_reference(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start();
    let chapter_len = s.bytes().take_while(u8::is_ascii_digit).count();
    if chapter_len == 0 {
        return None;
    }
    let after_chapter = &s[chapter_len..];
    let after_colon = after_chapter
        .strip_prefix(':')
        .or_else(|| after_chapter.strip_prefix('：'))?;
    let verse_len = after_colon
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if verse_len == 0 {
        return None;
    }

    let reference = format!("{}:{}", &s[..chapter_len], &after_colon[..verse_len]);
    let rest = &after_colon[verse_len..];
    let rest = rest.strip_prefix(']').unwrap_or(rest);
    Some((reference, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bracketed_reference() {
        let verse = Verse::parse("[1:3] 이 예언의 말씀을 읽는 자와", 1).unwrap();
        assert_eq!(verse.reference, "1:3");
        assert_eq!(verse.body, "이 예언의 말씀을 읽는 자와");
        assert!(verse.tagged);
    }

    #[test]
    fn parse_half_bracketed_and_bare_reference() {
        assert_eq!(Verse::parse("2:10] 죽도록 충성하라", 1).unwrap().reference, "2:10");
        assert_eq!(Verse::parse("2:10 죽도록 충성하라", 1).unwrap().body, "죽도록 충성하라");
    }

    #[test]
    fn full_width_colon_is_normalised() {
        let verse = Verse::parse("[3：20] 볼지어다 내가 문 밖에 서서", 1).unwrap();
        assert_eq!(verse.reference, "3:20");
    }

    #[test]
    fn untagged_verse_gets_positional_label() {
        let verse = Verse::parse("내가 속히 오리니", 4).unwrap();
        assert_eq!(verse.reference, "구절 4");
        assert!(!verse.tagged);
    }

    #[test]
    fn malformed_tag_is_an_error() {
        let err = Verse::parse("[첫째] 본문", 1).unwrap_err();
        assert_eq!(
            err,
            VerseError::MalformedReference {
                tag: "[첫째]".into()
            }
        );
        assert!(Verse::parse("[1: 본문", 1).is_err());
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(matches!(
            Verse::parse("[1:1]   ", 1),
            Err(VerseError::EmptyBody { .. })
        ));
        assert!(matches!(
            Verse::parse("[1:1] {}", 1),
            Err(VerseError::EmptyBody { .. })
        ));
        assert!(matches!(
            Verse::parse("", 1),
            Err(VerseError::EmptyBody { .. })
        ));
    }

    #[test]
    fn clean_text_strips_markup() {
        let verse = Verse::parse("[1:1] 예수  {그리스도}의 계시라", 1).unwrap();
        assert_eq!(verse.clean_text(), "예수 그리스도의 계시라");
    }
}
