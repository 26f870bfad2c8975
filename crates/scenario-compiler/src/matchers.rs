//! Intent matchers
//!
//! Each matcher is a pure function from one sentence to at most one
//! [`Action`]. Triggers and patterns are evaluated against the lower-cased
//! sentence; extracted literals are sliced from the original text at the
//! same byte offsets so they keep their case.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use scenario_core_types::Action;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s'"]+"#).expect("url regex"));

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'([^']+)'|"([^"]+)""#).expect("quoted regex"));

static CLICK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"click (?:on )?(?:the )?['"]([^'"]+)['"]"#).expect("click regex")
});

static INPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:type|input|enter) ['"]([^'"]+)['"] (?:in|into) (?:the )?['"]?([^'"]+)['"]?"#)
        .expect("input regex")
});

static ASSERT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)(?:should|expect|verify|check).*?['"]([^'"]+)['"]"#).expect("assert regex")
});

static WAIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:second|sec|s)").expect("wait regex"));

const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// A sentence in its original form plus an ASCII-lower-cased copy.
///
/// ASCII lower-casing never changes byte lengths, so a match range found in
/// [`SentenceView::lowered`] indexes the original text as well.
#[derive(Debug, Clone)]
pub struct SentenceView<'a> {
    original: &'a str,
    lowered: String,
}

impl<'a> SentenceView<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            lowered: original.to_ascii_lowercase(),
        }
    }

    pub fn original(&self) -> &'a str {
        self.original
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.lowered.contains(needle))
    }

    /// Original-case text for a range found in the lowered sentence.
    pub fn slice(&self, range: Range<usize>) -> &'a str {
        &self.original[range]
    }
}

pub type MatchFn = fn(&SentenceView<'_>) -> Option<Action>;

/// A named recognizer for one category of instruction.
#[derive(Clone, Copy)]
pub struct IntentMatcher {
    pub name: &'static str,
    pub attempt: MatchFn,
}

impl IntentMatcher {
    pub const fn new(name: &'static str, attempt: MatchFn) -> Self {
        Self { name, attempt }
    }

    pub fn attempt_match(&self, sentence: &SentenceView<'_>) -> Option<Action> {
        (self.attempt)(sentence)
    }
}

impl std::fmt::Debug for IntentMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentMatcher")
            .field("name", &self.name)
            .finish()
    }
}

/// Matchers in priority order.
pub const DEFAULT_MATCHERS: [IntentMatcher; 5] = [
    IntentMatcher::new("navigation", match_navigation),
    IntentMatcher::new("click", match_click),
    IntentMatcher::new("input", match_input),
    IntentMatcher::new("assertion", match_assertion),
    IntentMatcher::new("wait", match_wait),
];

pub fn match_navigation(sentence: &SentenceView<'_>) -> Option<Action> {
    if !sentence.contains_any(&["visit", "go to", "navigate to"]) {
        return None;
    }

    if let Some(found) = URL_RE.find(sentence.lowered()) {
        let url = sentence
            .slice(found.range())
            .trim_end_matches(URL_TRAILING_PUNCTUATION);
        if !url.is_empty() {
            return Some(Action::navigate(url));
        }
    }

    // Any quoted literal stands in for the destination when no URL is given.
    let caps = QUOTED_RE.captures(sentence.lowered())?;
    let literal = caps.get(1).or_else(|| caps.get(2))?;
    Some(Action::navigate(sentence.slice(literal.range())))
}

pub fn match_click(sentence: &SentenceView<'_>) -> Option<Action> {
    if !sentence.contains_any(&["click"]) {
        return None;
    }
    let caps = CLICK_RE.captures(sentence.lowered())?;
    let label = caps.get(1)?;
    Some(Action::click(sentence.slice(label.range())))
}

pub fn match_input(sentence: &SentenceView<'_>) -> Option<Action> {
    if !sentence.contains_any(&["type", "input", "enter"]) {
        return None;
    }
    let caps = INPUT_RE.captures(sentence.lowered())?;
    let text = sentence.slice(caps.get(1)?.range());
    let field = sentence.slice(caps.get(2)?.range()).trim();
    if field.is_empty() {
        return None;
    }
    Some(Action::input(field, text))
}

pub fn match_assertion(sentence: &SentenceView<'_>) -> Option<Action> {
    if !sentence.contains_any(&["should", "expect", "verify", "check"]) {
        return None;
    }
    let caps = ASSERT_RE.captures(sentence.lowered())?;
    let text = sentence.slice(caps.get(1)?.range());

    if sentence.contains_any(&["visible", "see", "display"]) {
        Some(Action::assert_visible(text))
    } else if sentence.contains_any(&["exist", "present"]) {
        Some(Action::assert_exists(text))
    } else {
        None
    }
}

pub fn match_wait(sentence: &SentenceView<'_>) -> Option<Action> {
    if !sentence.contains_any(&["wait"]) {
        return None;
    }
    let caps = WAIT_RE.captures(sentence.lowered())?;
    let seconds: u64 = caps.get(1)?.as_str().parse().ok()?;
    let ms = seconds.checked_mul(1000)?;
    Some(Action::wait(ms))
}
