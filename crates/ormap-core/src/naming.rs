//! Physical name generation.
//!
//! Converts source identifiers into the spelling used for tables and
//! columns. Conversion runs in two steps: the word separator style is
//! applied first, then the whole name is case folded.

use serde::{Deserialize, Serialize};
use std::iter;

/// Character joining the words of a separated name.
pub const SEPARATOR: char = '_';

/// Separator style and case folding applied to physical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    use_underscore: bool,
    uppercase: bool,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::underscore()
    }
}

impl NamingPolicy {
    /// Create a policy from its two options.
    pub const fn new(use_underscore: bool, uppercase: bool) -> Self {
        Self {
            use_underscore,
            uppercase,
        }
    }

    /// Lowercase words joined by underscores (`order_item`).
    pub const fn underscore() -> Self {
        Self::new(true, false)
    }

    /// Lowercase words with separators removed (`orderitem`).
    pub const fn camel() -> Self {
        Self::new(false, false)
    }

    /// Set case folding to uppercase or lowercase.
    pub const fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Whether words are joined by [`SEPARATOR`].
    pub const fn use_underscore(&self) -> bool {
        self.use_underscore
    }

    /// Whether names are folded to uppercase.
    pub const fn is_uppercase(&self) -> bool {
        self.uppercase
    }
}

/// Format `original` into a physical name under `policy`.
///
/// Total over all inputs: the empty string formats to the empty string.
/// The output is already canonical, so formatting it again under the same
/// policy returns it unchanged.
///
/// Uppercase output is the lowercase output folded to uppercase, which
/// differs from a direct uppercase fold for letters such as `İ`.
pub fn format(original: &str, policy: NamingPolicy) -> String {
    let spelled = if policy.use_underscore() {
        camel_case_to_separator(original)
    } else {
        separator_to_camel(original)
    };

    let lower = spelled.to_lowercase();
    if policy.is_uppercase() {
        lower.to_uppercase()
    } else {
        lower
    }
}

/// Remove every separator and uppercase the character following it.
///
/// `"user_name"` becomes `"userName"` and `"_name"` becomes `"Name"`. The
/// case of all other characters is left alone.
pub fn separator_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut raise_next = false;

    for c in s.chars() {
        if c == SEPARATOR {
            raise_next = true;
        } else if raise_next {
            out.extend(c.to_uppercase());
            raise_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Split camel-case words apart with [`SEPARATOR`].
///
/// Acronyms stay together and hand their last capital to the next word, so
/// `"URLBuilderConfiguration"` becomes `"URL_Builder_Configuration"`.
/// Separators already present are kept as they are. Word casing is
/// preserved.
pub fn camel_case_to_separator(s: &str) -> String {
    let separator = SEPARATOR.to_string();

    s.split(SEPARATOR)
        .map(|chunk| camel_words(chunk).join(&separator))
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Segment a separator-free chunk into camel-case words.
///
/// Characters without case (digits, punctuation) belong to the word they
/// appear in and do not interrupt an uppercase run. A letter counts as
/// cased only if case folding changes it.
fn camel_words(chunk: &str) -> Vec<&str> {
    let mut words = Vec::new();
    // Byte offset where the current word starts.
    let mut start = 0;
    // Consecutive uppercase letters seen, and where the latest one starts.
    let mut run = 0usize;
    let mut last_upper = 0;
    // Whether the most recent cased letter was lowercase.
    let mut after_lower = false;

    for (i, c) in chunk.char_indices() {
        if folds_to_lower(c) {
            if run == 0 && after_lower && i > start {
                words.push(&chunk[start..i]);
                start = i;
            }
            run += 1;
            last_upper = i;
            after_lower = false;
        } else if folds_to_upper(c) {
            if run > 1 {
                // Acronym: its last capital starts the next word.
                words.push(&chunk[start..last_upper]);
                start = last_upper;
            }
            run = 0;
            after_lower = true;
        }
    }

    if start < chunk.len() {
        words.push(&chunk[start..]);
    }

    words
}

fn folds_to_lower(c: char) -> bool {
    !c.to_lowercase().eq(iter::once(c))
}

fn folds_to_upper(c: char) -> bool {
    !c.to_uppercase().eq(iter::once(c))
}
