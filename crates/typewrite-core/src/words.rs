//! The cyclic, non-empty word list.

use crate::error::TypewriteError;
use serde::Serialize;

/// Ordered words shown by the effect, fixed at construction.
///
/// Indexing wraps modulo the list length, so any `usize` is a valid index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Validate and freeze a list of words.
    pub fn new<I, S>(words: I) -> Result<Self, TypewriteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(TypewriteError::EmptyWordList);
        }
        Ok(Self { words })
    }

    /// Number of words. Always at least one.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true: construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Word at `index`, wrapping around the end of the list.
    pub fn get(&self, index: usize) -> &str {
        &self.words[index % self.words.len()]
    }

    /// Index following `index`, wrapping to zero after the last word.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.words.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Number of characters in `word`, counted in Unicode scalar values.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// The first `count` characters of `word`, always cut on a char boundary.
///
/// A `count` past the end yields the whole word.
pub fn prefix(word: &str, count: usize) -> &str {
    match word.char_indices().nth(count) {
        Some((byte, _)) => &word[..byte],
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_rejected() {
        let err = WordList::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, TypewriteError::EmptyWordList);
    }

    #[test]
    fn indexing_wraps() {
        let words = WordList::new(["a", "b", "c"]).unwrap();
        assert_eq!(words.get(0), "a");
        assert_eq!(words.get(3), "a");
        assert_eq!(words.get(5), "c");
        assert_eq!(words.next_index(2), 0);
        assert_eq!(words.next_index(0), 1);
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        assert_eq!(prefix("héllo", 0), "");
        assert_eq!(prefix("héllo", 2), "hé");
        assert_eq!(prefix("日本", 1), "日");
        assert_eq!(prefix("日本", 2), "日本");
        assert_eq!(prefix("日本", 9), "日本");
        assert_eq!(char_len("日本"), 2);
    }
}
