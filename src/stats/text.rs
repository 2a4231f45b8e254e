//! Text mining over the free-text suggestions (Q5).

use crate::data::SurveyTable;
use std::collections::{HashMap, HashSet};

/// Common English words left out of the word cloud.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do",
    "does", "doing", "during", "each", "for", "from", "further", "had", "has", "have", "having",
    "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "me", "more", "most", "my", "no", "nor", "not", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "why", "will", "with", "would", "you", "your",
];

/// Tokens shorter than this are dropped from word frequencies.
pub const MIN_WORD_LEN: usize = 3;

/// Space-joined non-empty Q5 answers, in table order.
pub fn build_corpus(table: &SurveyTable) -> String {
    table
        .iter()
        .filter_map(|row| row.q5_answer.as_deref())
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct non-empty Q5 answers in first-encountered order.
pub fn distinct_suggestions(table: &SurveyTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .iter()
        .filter_map(|row| row.q5_answer.as_deref())
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Word counts for the cloud, most frequent first (ties alphabetical).
pub fn word_frequencies(corpus: &str, stopwords: &[&str]) -> Vec<(String, usize)> {
    let stop: HashSet<&str> = stopwords.iter().copied().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in corpus.split(|c: char| !c.is_alphabetic() && c != '\'') {
        let word = token.trim_matches('\'').to_lowercase();
        if word.chars().count() < MIN_WORD_LEN || stop.contains(word.as_str()) {
            continue;
        }
        *counts.entry(word).or_default() += 1;
    }

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::row;

    fn q5_table(answers: &[Option<&str>]) -> SurveyTable {
        answers
            .iter()
            .enumerate()
            .map(|(i, a)| row(i as u64 + 1, "Rabat", None, None, *a))
            .collect()
    }

    #[test]
    fn corpus_skips_empty_answers() {
        let table = q5_table(&[Some("Plant trees"), None, Some("More shade"), Some("  ")]);
        assert_eq!(build_corpus(&table), "Plant trees More shade");
    }

    #[test]
    fn all_empty_answers_give_empty_outputs() {
        let table = q5_table(&[None, None, Some("")]);
        assert_eq!(build_corpus(&table), "");
        assert!(distinct_suggestions(&table).is_empty());
        assert!(word_frequencies(&build_corpus(&table), STOPWORDS).is_empty());
    }

    #[test]
    fn suggestions_are_distinct_and_in_order() {
        let table = q5_table(&[
            Some("Plant trees"),
            Some("Green roofs"),
            None,
            Some("Plant trees"),
            Some("Water fountains"),
        ]);

        let suggestions = distinct_suggestions(&table);
        assert_eq!(suggestions, vec!["Plant trees", "Green roofs", "Water fountains"]);

        let corpus = build_corpus(&table);
        for s in &suggestions {
            assert!(corpus.contains(s.as_str()));
        }
        let unique: HashSet<_> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
    }

    #[test]
    fn word_frequencies_drop_stopwords_and_short_tokens() {
        let words = word_frequencies("Plant more trees. Trees give shade, and shade is cool!", STOPWORDS);
        assert_eq!(words[0], ("shade".to_string(), 2));
        assert_eq!(words[1], ("trees".to_string(), 2));
        assert!(words.iter().all(|(w, _)| w != "and" && w != "is" && w != "more"));
        assert!(words.iter().any(|(w, n)| w == "plant" && *n == 1));
    }

    #[test]
    fn capitalize_labels() {
        assert_eq!(capitalize("yes"), "Yes");
        assert_eq!(capitalize("NO"), "No");
        assert_eq!(capitalize(""), "");
    }
}
