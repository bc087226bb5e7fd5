//! Feature Builder — turns a movie's categorical attributes into the
//! normalized token stream the TF-IDF model is fitted on.

use cine_core::types::Movie;

/// Common English stop words discarded before n-gram generation.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its",
    "itself", "me", "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Build the normalized feature string for a movie: lower-cased,
/// space-joined genres, director, and cast. Missing fields contribute
/// nothing; a movie with no attributes yields an empty string.
pub fn feature_text(movie: &Movie) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(movie.genres.len() + movie.cast.len() + 1);
    for genre in &movie.genres {
        parts.push(genre.to_lowercase());
    }
    if !movie.director.is_empty() {
        parts.push(movie.director.to_lowercase());
    }
    for name in &movie.cast {
        parts.push(name.to_lowercase());
    }
    parts.join(" ")
}

/// Split text into lowercase word tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Tokenize, drop stop words, then emit unigrams and bigrams from the
/// filtered stream. Bigram terms are space-joined.
pub fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut terms = Vec::with_capacity(tokens.len() * 2);
    terms.extend(tokens.iter().cloned());
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}
