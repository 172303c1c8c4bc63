//! Keyword retrieval over a small text corpus.
//!
//! [`CorpusIndex`] is an explicitly constructed, explicitly owned resource:
//! build it once from the documents, hand it to whichever tool needs it. No
//! lazily initialized globals. Scoring is Okapi BM25, which is all the
//! knowledge-base tool needs; semantic/embedding retrieval is a different
//! collaborator and out of scope here.

use std::collections::HashMap;

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// The matched document's text.
    pub text: String,
    /// BM25 relevance score. Higher is better.
    pub score: f64,
}

/// BM25 index over an in-memory document corpus.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    docs: Vec<String>,
    doc_terms: Vec<HashMap<String, usize>>,
    doc_lens: Vec<usize>,
    doc_freq: HashMap<String, usize>,
    avg_len: f64,
    k1: f64,
    b: f64,
}

impl CorpusIndex {
    /// Build an index from the given documents.
    ///
    /// Tokenization is lowercase alphanumeric runs; no stemming.
    #[must_use]
    pub fn build(docs: Vec<String>) -> Self {
        let mut doc_terms = Vec::with_capacity(docs.len());
        let mut doc_lens = Vec::with_capacity(docs.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in &docs {
            let tokens = tokenize(doc);
            let mut terms: HashMap<String, usize> = HashMap::new();
            for token in &tokens {
                *terms.entry(token.clone()).or_insert(0) += 1;
            }
            for term in terms.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lens.push(tokens.len());
            doc_terms.push(terms);
        }

        let avg_len = if docs.is_empty() {
            0.0
        } else {
            doc_lens.iter().sum::<usize>() as f64 / docs.len() as f64
        };

        Self {
            docs,
            doc_terms,
            doc_lens,
            doc_freq,
            avg_len,
            k1: 1.2,
            b: 0.75,
        }
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Return the top `k` documents for `query`, best first.
    ///
    /// Documents with zero overlap are not returned, so the result may be
    /// shorter than `k`.
    #[must_use]
    pub fn search(&self, query: &str, k: usize) -> Vec<Hit> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() || self.docs.is_empty() {
            return Vec::new();
        }

        let n = self.docs.len() as f64;
        let mut scored: Vec<(usize, f64)> = Vec::new();

        for (idx, terms) in self.doc_terms.iter().enumerate() {
            let mut score = 0.0;
            for term in &query_terms {
                let Some(&tf) = terms.get(term) else {
                    continue;
                };
                let df = self.doc_freq.get(term).copied().unwrap_or(0) as f64;
                let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
                let tf = tf as f64;
                let len_norm =
                    1.0 - self.b + self.b * self.doc_lens[idx] as f64 / self.avg_len.max(1.0);
                score += idf * (tf * (self.k1 + 1.0)) / (tf + self.k1 * len_norm);
            }
            if score > 0.0 {
                scored.push((idx, score));
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(k)
            .map(|(idx, score)| Hit {
                text: self.docs[idx].clone(),
                score,
            })
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
