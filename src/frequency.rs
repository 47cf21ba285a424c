use std::collections::HashMap;

/// Occurrences of one root, displayed through its most common spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordStat {
    pub root: String,
    pub word: String,
    pub count: usize,
}

struct RootCounts {
    root: String,
    // (surface form, occurrences) in first-seen order
    variants: Vec<(String, usize)>,
}

impl RootCounts {
    fn representative(&self) -> Option<&(String, usize)> {
        self.variants.iter().fold(None, |best, variant| match best {
            Some(best) if best.1 >= variant.1 => Some(best),
            _ => Some(variant),
        })
    }
}

/// Counts surface forms per root.
#[derive(Default)]
pub struct FrequencyAggregator {
    index: HashMap<String, usize>,
    roots: Vec<RootCounts>,
}

impl FrequencyAggregator {
    pub fn add(&mut self, surface: &str, root: &str) {
        let roots = &mut self.roots;
        let slot = *self.index.entry(root.to_string()).or_insert_with(|| {
            roots.push(RootCounts {
                root: root.to_string(),
                variants: Vec::new(),
            });
            roots.len() - 1
        });

        let variants = &mut self.roots[slot].variants;
        match variants.iter_mut().find(|(variant, _)| variant == surface) {
            Some((_, occurrences)) => *occurrences += 1,
            None => variants.push((surface.to_string(), 1)),
        }
    }

    /// One [`WordStat`] per root, in the order roots were first added.
    ///
    /// Ties between equally common spellings go to the one seen first.
    pub fn finish(self) -> Vec<WordStat> {
        self.roots
            .into_iter()
            .filter_map(|counts| {
                let (word, _) = counts.representative()?.clone();
                let count = counts.variants.iter().map(|(_, n)| n).sum();

                Some(WordStat {
                    root: counts.root,
                    word,
                    count,
                })
            })
            .collect()
    }
}

/// Sorts by count, most frequent first, and keeps the first `limit` entries.
///
/// The sort is stable but callers should not rely on the order of ties.
pub fn rank(mut words: Vec<WordStat>, limit: usize) -> Vec<WordStat> {
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(limit);

    words
}
