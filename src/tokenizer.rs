use regex::{Matches, Regex};

use crate::{
    error::{Error, Result},
    frequency::{rank, FrequencyAggregator, WordStat},
    stem::{SnowballStemmer, Stemmer},
    stopwords::StopwordFilter,
};

/// Whitespace plus the punctuation that never belongs to a word.
pub const DEFAULT_DELIMITERS: &str = " \t\n\r!@#$%^&*()-=_+;'\":,./\\<>?[]{}";

pub const DEFAULT_MAX_WORDS: usize = 15;

/// Splits text into maximal runs of non-delimiter characters.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    delimiters: Vec<char>,
    regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl Tokenizer {
    pub fn new(delimiters: &str) -> Self {
        let mut delimiters: Vec<char> = delimiters.chars().collect();
        delimiters.sort_unstable();
        delimiters.dedup();

        let pattern = if delimiters.is_empty() {
            "(?s).+".to_string()
        } else {
            let class: String = delimiters
                .iter()
                .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
                .collect();
            format!("[^{class}]+")
        };

        Tokenizer {
            regex: Regex::new(&pattern).expect("Escaped delimiter class is always valid"),
            delimiters,
        }
    }

    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.binary_search(&c).is_ok()
    }

    /// Lazily yields the tokens of `text` in document order.
    ///
    /// Calling it again restarts from the beginning of the text.
    pub fn tokens<'r, 't>(&'r self, text: &'t str) -> Tokens<'r, 't> {
        Tokens {
            matches: self.regex.find_iter(text),
        }
    }
}

pub struct Tokens<'r, 't> {
    matches: Matches<'r, 't>,
}

impl<'r, 't> Iterator for Tokens<'r, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|mat| mat.as_str())
    }
}

/// Turns a document into its most frequent words.
///
/// Tokens are dropped when either the surface form or its root is a stopword.
/// Surviving words are merged by root and the most common spelling of each
/// root represents it.
pub struct WordTokenizer {
    tokenizer: Tokenizer,
    stemmer: Box<dyn Stemmer>,
    pub filter: StopwordFilter,
    pub max_words: usize,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        WordTokenizer {
            tokenizer: Tokenizer::default(),
            stemmer: Box::new(SnowballStemmer::default()),
            filter: StopwordFilter::english(),
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl WordTokenizer {
    pub fn with_delimiters(mut self, delimiters: &str) -> Self {
        self.tokenizer = Tokenizer::new(delimiters);
        self
    }

    pub fn with_stemmer(mut self, stemmer: impl Stemmer + 'static) -> Self {
        self.stemmer = Box::new(stemmer);
        self
    }

    pub fn with_filter(mut self, filter: StopwordFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_max_words(mut self, size: usize) -> Self {
        self.max_words = size;
        self
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// One entry per surviving root, in the order roots were first seen.
    pub fn get_word_frequencies(&self, text: &str) -> Result<Vec<WordStat>> {
        let document = text.to_lowercase();
        let mut aggregator = FrequencyAggregator::default();
        let mut dropped = 0usize;

        for word in self.tokenizer.tokens(&document) {
            if self.filter.is_stopword(word) {
                dropped += 1;
                continue;
            }

            let root = self.stemmer.stem(word);
            if root.is_empty() {
                return Err(Error::InvalidStem {
                    word: word.to_string(),
                });
            }

            if self.filter.is_stopword(&root) {
                dropped += 1;
                continue;
            }

            aggregator.add(word, &root);
        }

        let stats = aggregator.finish();
        tracing::debug!("Aggregated {} roots, dropped {dropped} tokens", stats.len());

        Ok(stats)
    }

    /// The `max_words` most frequent words, most frequent first.
    pub fn get_ranked_words(&self, text: &str) -> Result<Vec<WordStat>> {
        let frequencies = self.get_word_frequencies(text)?;

        Ok(rank(frequencies, self.max_words))
    }
}

#[cfg(test)]
mod tests {
    use crate::{stem::NoStemmer, stopwords::StopwordFilter};

    use super::{Tokenizer, WordTokenizer};

    #[test]
    fn splits_on_every_delimiter() {
        let tokenizer = Tokenizer::default();
        let text = "the cat, (sat)--on the\tmat.\r\n\"well\"? [yes]{no} a/b\\c";

        let tokens: Vec<_> = tokenizer.tokens(text).collect();

        assert_eq!(
            tokens,
            ["the", "cat", "sat", "on", "the", "mat", "well", "yes", "no", "a", "b", "c"]
        );
        for token in &tokens {
            assert!(!token.is_empty());
            assert!(!token.chars().any(|c| tokenizer.is_delimiter(c)));
        }
    }

    #[test]
    fn tokens_and_gaps_rebuild_the_document() {
        let tokenizer = Tokenizer::default();
        let text = "  it's 25th of may -- 'twas brillig!  ";

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for token in tokenizer.tokens(text) {
            let start = text[cursor..].find(token).unwrap() + cursor;
            let gap = &text[cursor..start];
            assert!(gap.chars().all(|c| tokenizer.is_delimiter(c)));
            rebuilt.push_str(gap);
            rebuilt.push_str(token);
            cursor = start + token.len();
        }
        let tail = &text[cursor..];
        assert!(tail.chars().all(|c| tokenizer.is_delimiter(c)));
        rebuilt.push_str(tail);

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn tokens_restart_and_skip_empty_input() {
        let tokenizer = Tokenizer::new(" ");

        assert_eq!(tokenizer.tokens("").count(), 0);
        assert_eq!(tokenizer.tokens("   ").count(), 0);
        assert_eq!(tokenizer.tokens("a b").count(), tokenizer.tokens("a b").count());
        assert_eq!(Tokenizer::new("").tokens("a b").collect::<Vec<_>>(), ["a b"]);
    }

    #[test]
    fn stopwords_are_checked_on_the_root_too() {
        let to_the = |word: &str| {
            if word == "thee" {
                "the".to_string()
            } else {
                word.to_string()
            }
        };
        let tokenizer = WordTokenizer::default()
            .with_filter(StopwordFilter::from_words(["the"]))
            .with_stemmer(to_the);

        let words = tokenizer.get_word_frequencies("thee the cat").unwrap();

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "cat");
    }

    #[test]
    fn empty_root_is_an_error() {
        let tokenizer = WordTokenizer::default()
            .with_filter(StopwordFilter::empty())
            .with_stemmer(|_: &str| String::new());

        assert!(tokenizer.get_word_frequencies("cat").is_err());
    }

    #[test]
    fn cat_sat_on_the_mat() {
        let tokenizer = WordTokenizer::default()
            .with_filter(StopwordFilter::from_words(["the", "on"]))
            .with_stemmer(NoStemmer)
            .with_max_words(2);

        let ranked = tokenizer
            .get_ranked_words("The cat sat on the mat. The cat ran.")
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!((ranked[0].word.as_str(), ranked[0].count), ("cat", 2));
        assert_eq!(ranked[1].count, 1);
        assert!(["sat", "mat", "ran"].contains(&ranked[1].word.as_str()));
    }

    #[test]
    fn surviving_counts_add_up() {
        let tokenizer = WordTokenizer::default().with_max_words(usize::MAX);
        let text = "Running runners run; the runner runs. 42 apples, an apple!";

        let survivors = tokenizer
            .tokenizer()
            .tokens(&text.to_lowercase())
            .filter(|word| !tokenizer.filter.is_stopword(word))
            .count();
        let words = tokenizer.get_word_frequencies(text).unwrap();

        assert_eq!(words.iter().map(|stat| stat.count).sum::<usize>(), survivors);
    }
}
