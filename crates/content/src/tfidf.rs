//! TF-IDF vectorization over feature-text documents.
//!
//! Semantics: raw term counts weighted by a smoothed inverse document
//! frequency, `ln((1 + n_docs) / (1 + df)) + 1`, with every document
//! vector L2-normalized. The vocabulary is capped at `max_features`
//! terms, keeping those with the highest total corpus count (ties by
//! term order).

use crate::features;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit a vocabulary over `documents` and return the vectorizer with
    /// the document × term weight matrix (rows L2-normalized).
    pub fn fit(documents: &[String], max_features: usize) -> (Self, Array2<f64>) {
        let doc_terms: Vec<Vec<String>> =
            documents.iter().map(|d| features::terms(d)).collect();

        // Corpus-wide counts and document frequencies.
        let mut corpus_count: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &doc_terms {
            let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
            for term in terms {
                *corpus_count.entry(term.as_str()).or_insert(0) += 1;
                seen.insert(term.as_str());
            }
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary by total count, ties by term order, then
        // assign indices in term order for a stable layout.
        let mut ranked: Vec<(&str, usize)> =
            corpus_count.iter().map(|(t, c)| (*t, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);
        let mut selected: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        selected.sort_unstable();

        let n_docs = documents.len();
        let mut vocabulary = HashMap::with_capacity(selected.len());
        let mut idf = Vec::with_capacity(selected.len());
        for (index, term) in selected.iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            let df = doc_freq[term];
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        let vectorizer = Self { vocabulary, idf };

        let mut weights = Array2::<f64>::zeros((n_docs, vectorizer.idf.len()));
        for (row, terms) in doc_terms.iter().enumerate() {
            vectorizer.fill_row(terms, &mut weights.row_mut(row));
        }

        (vectorizer, weights)
    }

    /// Project a query into the fitted term space. Out-of-vocabulary
    /// terms are ignored; the result is L2-normalized (or all-zero).
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let terms = features::terms(text);
        let mut vector = Array1::<f64>::zeros(self.idf.len());
        self.fill_row(&terms, &mut vector.view_mut());
        vector
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn fill_row(&self, terms: &[String], row: &mut ndarray::ArrayViewMut1<'_, f64>) {
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                row[index] += self.idf[index];
            }
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn rows_are_l2_normalized() {
        let (_, weights) = TfidfVectorizer::fit(
            &docs(&["action drama thriller", "comedy romance"]),
            1000,
        );
        for row in weights.rows() {
            let norm = row.dot(&row).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_document_stays_zero() {
        let (_, weights) = TfidfVectorizer::fit(&docs(&["action", ""]), 1000);
        let norm = weights.row(1).dot(&weights.row(1)).sqrt();
        assert_eq!(norm, 0.0);
    }

    #[test]
    fn rarer_terms_get_higher_idf_weight() {
        // "action" appears in both documents, "noir" in one.
        let (vectorizer, _) =
            TfidfVectorizer::fit(&docs(&["action noir", "action comedy"]), 1000);
        let v = vectorizer.transform("action noir");
        let action = vectorizer.vocabulary["action"];
        let noir = vectorizer.vocabulary["noir"];
        assert!(v[noir] > v[action]);
    }

    #[test]
    fn transform_ignores_out_of_vocabulary_terms() {
        let (vectorizer, _) = TfidfVectorizer::fit(&docs(&["action drama"]), 1000);
        let v = vectorizer.transform("western musical");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn max_features_caps_vocabulary_by_corpus_count() {
        let (vectorizer, weights) = TfidfVectorizer::fit(
            &docs(&["action action drama", "action comedy"]),
            1,
        );
        assert_eq!(vectorizer.vocabulary_len(), 1);
        assert!(vectorizer.vocabulary.contains_key("action"));
        assert_eq!(weights.ncols(), 1);
    }

    #[test]
    fn bigrams_enter_the_vocabulary() {
        let (vectorizer, _) = TfidfVectorizer::fit(&docs(&["action drama"]), 1000);
        assert!(vectorizer.vocabulary.contains_key("action drama"));
    }
}
