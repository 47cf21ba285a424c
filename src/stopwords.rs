use std::{collections::HashSet, fs, path::Path};

use crate::error::{Error, Result};

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself", "yourselves", "thee", "thou",
    "thy", "thine", "hath", "doth", "shall", "art", "tis", "o",
];

/// Decides whether a token is noise.
///
/// A word is a stopword when it is shorter than two characters, starts with a
/// decimal digit ("25th") or is listed in the set. Membership is an exact,
/// case-sensitive match, so callers lower-case the document first.
#[derive(Clone, Debug, Default)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl StopwordFilter {
    /// Filter that only rejects short and numeric-leading tokens.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopwordFilter {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads one stopword per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| Error::io(err, path))?;

        let filter = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        );
        tracing::debug!("Loaded {} stopwords from {}", filter.len(), path.display());

        Ok(filter)
    }

    /// Like [`StopwordFilter::from_path`], but an unreadable list only logs a
    /// warning and yields an empty set.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::from_path(path).unwrap_or_else(|err| {
            tracing::warn!("Continuing without stopwords: {err}");
            Self::empty()
        })
    }

    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            return true;
        };

        if chars.next().is_none() {
            return true;
        }

        first.is_ascii_digit() || self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
