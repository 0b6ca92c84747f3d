//! TF-IDF weighting over the movie documents.
//!
//! Tokens are runs of two or more alphanumeric characters, lowercased, with
//! stop words removed. Weights are raw term counts multiplied by the smoothed
//! inverse document frequency `ln((1 + n) / (1 + df)) + 1`, and every row is
//! L2-normalized so that a dot product between rows is their cosine similarity.

use std::collections::{BTreeSet, HashMap};

use super::stopwords::StopWords;

/// Sparse row of the TF-IDF matrix, entries sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_unsorted(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    /// Learns the vocabulary and IDF weights, then returns one normalized row
    /// per document, in input order.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        // Sorted vocabulary keeps term indices independent of document order.
        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut doc_freq = vec![0usize; self.vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<usize> = tokens.iter().map(|t| self.vocabulary[t]).collect();
            for index in unique {
                doc_freq[index] += 1;
            }
        }

        let n_docs = documents.len() as f64;
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = self.vocabulary.len(),
            "TF-IDF vocabulary fitted"
        );

        tokenized
            .iter()
            .map(|tokens| self.weigh(tokens))
            .collect()
    }

    /// Vectorizes a new document against the fitted vocabulary. Unknown terms
    /// are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let tokens = self.tokenize(document);
        self.weigh(&tokens)
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut vector = SparseVector::from_unsorted(
            counts
                .into_iter()
                .map(|(index, count)| (index, count * self.idf[index]))
                .collect(),
        );
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(docs: &[&str]) -> (TfidfVectorizer, Vec<SparseVector>) {
        let mut vectorizer = TfidfVectorizer::default();
        let vectors = vectorizer.fit_transform(docs);
        (vectorizer, vectors)
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_short_and_stop_words() {
        let vectorizer = TfidfVectorizer::default();
        let tokens = vectorizer.tokenize("The Lion King (1994) Children's|Sci-Fi");
        assert_eq!(
            tokens,
            vec!["lion", "king", "1994", "children", "sci", "fi"]
        );
    }

    #[test]
    fn test_rows_are_unit_length() {
        let (_, vectors) = fitted(&[
            "Toy Story (1995) Animation Comedy",
            "Heat (1995) Action Crime Thriller",
        ]);
        for vector in vectors {
            assert!((vector.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_idf_prefers_rare_terms() {
        let (vectorizer, _) = fitted(&[
            "Toy Story Comedy",
            "Heat Comedy",
            "Casino Comedy",
        ]);
        let common = vectorizer.idf("comedy").unwrap();
        let rare = vectorizer.idf("toy").unwrap();
        assert!((common - 1.0).abs() < 1e-12);
        assert!(rare > common);
        assert!((rare - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_stop_word_only_document_is_empty() {
        let (_, vectors) = fitted(&["The One", "Heat Action"]);
        assert!(vectors[0].is_empty());
        assert_eq!(vectors[0].norm(), 0.0);
    }

    #[test]
    fn test_dot_of_identical_documents_is_one() {
        let (_, vectors) = fitted(&["Heat Action Crime", "Heat Action Crime", "Casino Drama"]);
        assert!((vectors[0].dot(&vectors[1]) - 1.0).abs() < 1e-9);
        assert_eq!(vectors[0].dot(&vectors[2]), 0.0);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (vectorizer, vectors) = fitted(&["Heat Action", "Casino Drama"]);
        let vector = vectorizer.transform("Heat Action Zebra");
        assert!((vector.dot(&vectors[0]) - 1.0).abs() < 1e-9);
        assert_eq!(vectorizer.vocabulary_size(), 4);
    }
}
