//! Keyword extraction for turning chat messages into search queries.

/// Number of keywords kept by [`extract_keywords`] callers that don't care.
pub const DEFAULT_MAX_KEYWORDS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "is", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "this", "that", "these", "those", "i", "me", "my", "you", "your", "he", "she", "it", "we",
    "they",
];

fn is_keyword(word: &str) -> bool {
    word.chars().count() > 2 && !STOP_WORDS.contains(&word)
}

/// Builds a search query from free text.
///
/// Words are lower-cased and split on whitespace; stop words and words of two
/// characters or fewer are dropped and the first `max_keywords` survivors are
/// joined with spaces. When nothing survives the trimmed message is returned
/// unchanged.
pub fn extract_keywords(message: &str, max_keywords: usize) -> String {
    let lowered = message.trim().to_lowercase();
    let keywords: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| is_keyword(word))
        .take(max_keywords)
        .collect();

    if keywords.is_empty() {
        message.trim().to_string()
    } else {
        keywords.join(" ")
    }
}
