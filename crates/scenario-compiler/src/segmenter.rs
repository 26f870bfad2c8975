//! Sentence segmentation

use std::iter::Peekable;

use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

/// Lazy iterator over the sentences of a description.
///
/// Cheap to clone. Call [`segment`] again to restart from the beginning.
#[derive(Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    bounds: Peekable<USentenceBoundIndices<'a>>,
    rest: &'a str,
}

const TERMINATORS: &[char] = &['.', '!', '?'];

/// Split `description` on Unicode sentence boundaries.
///
/// A boundary only counts when whitespace follows the terminator, so
/// `https://a.test/?q=1` stays in one piece. A terminator followed by
/// whitespace always ends a sentence, whatever the case of the next word.
/// Fragments without any alphanumeric character are dropped, so empty
/// input yields nothing.
pub fn segment(description: &str) -> Sentences<'_> {
    Sentences {
        text: description,
        bounds: description.split_sentence_bound_indices().peekable(),
        rest: "",
    }
}

/// Byte offset of the whitespace after the first terminator run.
fn terminator_break(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        if !TERMINATORS.contains(&ch) {
            continue;
        }
        while let Some(&(_, next)) = chars.peek() {
            if TERMINATORS.contains(&next) {
                chars.next();
            } else {
                break;
            }
        }
        match chars.peek() {
            Some(&(index, next)) if next.is_whitespace() => return Some(index),
            _ => {}
        }
    }
    None
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.rest.is_empty() {
                self.rest = self.next_span()?;
            }

            let (head, tail) = match terminator_break(self.rest) {
                Some(index) => self.rest.split_at(index),
                None => (self.rest, ""),
            };
            self.rest = tail;

            let sentence = head.trim();
            if sentence.chars().any(char::is_alphanumeric) {
                return Some(sentence);
            }
        }
    }
}

impl<'a> Sentences<'a> {
    /// Next run of UAX #29 fragments that ends in whitespace or at the end.
    fn next_span(&mut self) -> Option<&'a str> {
        let (start, fragment) = self.bounds.next()?;
        let mut end = start + fragment.len();
        let mut last = fragment;
        while !last.ends_with(char::is_whitespace) {
            match self.bounds.next() {
                Some((next_start, next)) => {
                    end = next_start + next.len();
                    last = next;
                }
                None => break,
            }
        }
        Some(&self.text[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators() {
        let sentences: Vec<_> =
            segment("Go to the login page. Click 'Login'! Is it there?").collect();
        assert_eq!(
            sentences,
            vec!["Go to the login page.", "Click 'Login'!", "Is it there?"]
        );
    }

    #[test]
    fn urls_do_not_split_sentences() {
        let sentences: Vec<_> = segment("Visit 'https://a.test' and click 'Submit'").collect();
        assert_eq!(sentences, vec!["Visit 'https://a.test' and click 'Submit'"]);

        let sentences: Vec<_> =
            segment("Go to https://a.test/?q=Rust! Then wait 1 second.").collect();
        assert_eq!(
            sentences,
            vec!["Go to https://a.test/?q=Rust!", "Then wait 1 second."]
        );
    }

    #[test]
    fn lowercase_sentences_still_split() {
        let sentences: Vec<_> = segment("click 'A'. click 'B'.").collect();
        assert_eq!(sentences, vec!["click 'A'.", "click 'B'."]);

        let sentences: Vec<_> = segment(
            "go to 'https://a.test/login'. type 'bob' into 'User'. type 'pw' into 'Pass'.",
        )
        .collect();
        assert_eq!(
            sentences,
            vec![
                "go to 'https://a.test/login'.",
                "type 'bob' into 'User'.",
                "type 'pw' into 'Pass'.",
            ]
        );
    }

    #[test]
    fn terminator_inside_quotes_does_not_split() {
        let sentences: Vec<_> = segment("verify 'Saved.' is visible. wait 2s").collect();
        assert_eq!(sentences, vec!["verify 'Saved.' is visible.", "wait 2s"]);
    }

    #[test]
    fn empty_and_punctuation_only_input_yield_nothing() {
        assert_eq!(segment("").count(), 0);
        assert_eq!(segment("   \n\t ").count(), 0);
        assert_eq!(segment(" ... !? ").count(), 0);
    }

    #[test]
    fn segmenting_twice_yields_same_sentences() {
        let text = "Wait 2 seconds. Then check 'Done' is visible.";
        let first: Vec<_> = segment(text).collect();
        let second: Vec<_> = segment(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
