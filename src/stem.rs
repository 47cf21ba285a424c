use std::borrow::Cow;

use rust_stemmers::Algorithm;

/// Maps a surface word onto its root.
///
/// Implementations must be deterministic for the lifetime of a pipeline run.
/// Any `Fn(&str) -> String` is a stemmer, which keeps test stubs short.
pub trait Stemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;

    /// Runs `self` first and feeds its root into `next`.
    fn then<S: Stemmer>(self, next: S) -> Chain<Self, S>
    where
        Self: Sized,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String,
{
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(word))
    }
}

/// Leaves every word untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStemmer;

impl Stemmer for NoStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

/// Snowball stemmer, English (Porter2) unless told otherwise.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new(algorithm: Algorithm) -> Self {
        SnowballStemmer {
            inner: rust_stemmers::Stemmer::create(algorithm),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Stemmer for SnowballStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.inner.stem(word)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Stemmer, B: Stemmer> Stemmer for Chain<A, B> {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self.first.stem(word) {
            Cow::Borrowed(root) => self.second.stem(root),
            Cow::Owned(root) => Cow::Owned(self.second.stem(&root).into_owned()),
        }
    }
}
