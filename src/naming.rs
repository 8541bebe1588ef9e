//! Naming and title helpers shared by all extraction strategies

use crate::descriptor::Tagged;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Other(char),
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else {
        CharClass::Other(c)
    }
}

/// Splits an identifier at camel-case and letter/digit boundaries
///
/// An upper-case run followed by a lower-case letter gives its last capital to the next
/// token, so `"ASFRules"` splits into `["ASF", "Rules"]`.
pub fn split_camel_case(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut token_start = 0;
    let mut current = classify(chars[0]);

    for pos in 1..chars.len() {
        let class = classify(chars[pos]);
        if class == current {
            continue;
        }
        if class == CharClass::Lower && current == CharClass::Upper {
            let new_start = pos - 1;
            if new_start != token_start {
                tokens.push(chars[token_start..new_start].iter().collect());
                token_start = new_start;
            }
        } else {
            tokens.push(chars[token_start..pos].iter().collect());
            token_start = pos;
        }
        current = class;
    }
    tokens.push(chars[token_start..].iter().collect());
    tokens
}

/// Uppercases the first character, leaving the rest untouched
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turns a camel-cased identifier into a sentence-cased title
///
/// `"getUserId"` becomes `"Get user id"`.
pub fn generate_title(identifier: &str) -> String {
    capitalize(&split_camel_case(identifier).join(" ").to_lowercase())
}

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| {
        Regex::new(r#"[.!?]+["')\]]*\s+|\n[ \t]*\r?\n"#).expect("sentence boundary pattern is valid")
    })
}

/// First sentence of a doc comment, trimmed
///
/// A terminator only ends a sentence when it is followed by whitespace and the next word
/// does not start with a lower-case letter (`"e.g. this"` stays one sentence). Blank lines
/// always end a sentence. Text without a boundary is returned whole, trimmed.
pub fn first_sentence(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    for found in sentence_boundary().find_iter(text) {
        let rest = &text[found.end()..];
        let continues_lowercase = rest.chars().next().is_some_and(|c| c.is_lowercase());
        if found.as_str().starts_with('\n') || !continues_lowercase {
            return text[..found.end()].trim().to_string();
        }
    }
    text.trim().to_string()
}

/// [`first_sentence`] lifted over optional doc text
pub fn first_sentence_of(text: Option<&str>) -> Option<String> {
    text.map(first_sentence)
}

/// Doc-tag comments keyed by the first word of each tag value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCommentMap {
    entries: BTreeMap<String, String>,
    malformed: Vec<String>,
}

impl TagCommentMap {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw values that had no key/comment split
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }
}

/// Collects `@tag key comment...` values of a descriptor into a key -> comment map
///
/// Values without whitespace cannot be split and are reported through
/// [`TagCommentMap::malformed`] instead of being recorded.
pub fn tag_comment_map(descriptor: &dyn Tagged, tag_name: &str) -> TagCommentMap {
    let mut map = TagCommentMap::default();
    for tag in descriptor.tags_named(tag_name) {
        let value = tag.value.trim();
        match value.split_once(char::is_whitespace) {
            Some((key, comment)) => {
                map.entries
                    .insert(key.to_string(), comment.trim_start().to_string());
            }
            None => map.malformed.push(value.to_string()),
        }
    }
    map
}
