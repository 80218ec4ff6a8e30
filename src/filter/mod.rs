//! Lexical filter for extracted symbol lists.
//!
//! Commit summaries arrive with ctags output and regex-harvested key
//! points mixed with prose; this pass drops stop words, language
//! keywords, short noise tokens, and anything that does not look like an
//! identifier, so the engine only ever sees plausible definitions.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::core::Summary;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "or", "but", "not",
        "this", "they", "have", "had", "what", "when", "where", "who", "which", "why", "how",
    ]
    .into_iter()
    .collect()
});

static PROGRAMMING_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "auto", "break", "case", "catch", "class", "const", "continue", "default", "delete", "do",
        "else", "enum", "explicit", "extern", "false", "finally", "for", "friend", "goto", "if",
        "inline", "int", "long", "namespace", "new", "null", "nullptr", "operator", "private",
        "protected", "public", "return", "short", "signed", "sizeof", "static", "struct",
        "switch", "template", "this", "throw", "true", "try", "typedef", "typename", "union",
        "unsigned", "using", "virtual", "void", "volatile", "while", "bool", "char", "double",
        "float", "string", "vector", "map", "set", "list", "array", "function", "method",
        "variable", "object", "type", "include", "define", "ifdef", "ifndef", "endif", "pragma",
    ]
    .into_iter()
    .collect()
});

static NOISE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "tmp", "temp", "val", "var", "ptr", "ref", "obj", "cnt", "num", "idx", "len", "str",
        "msg", "err", "ret", "res", "arg", "param", "data", "info", "item", "node", "elem",
        "key", "value", "size", "count", "index", "length", "width", "height", "min", "max",
        "sum", "avg", "std", "dev", "test", "debug", "log", "print", "output", "input", "file",
        "path", "name", "id", "uid", "pid", "tid", "time", "date", "year", "month", "day",
        "hour", "minute", "second", "ms", "sec", "us", "ns",
    ]
    .into_iter()
    .collect()
});

/// Keep only tokens that plausibly name a definition.
pub fn filter_definitions(definitions: Vec<String>) -> Vec<String> {
    definitions
        .into_iter()
        .filter(|d| !should_filter(d))
        .collect()
}

/// Apply the filter to both symbol lists of a summary in place.
pub fn filter_summary(summary: &mut Summary) {
    summary.ctag_definitions = filter_definitions(std::mem::take(&mut summary.ctag_definitions));
    summary.regex_definitions = filter_definitions(std::mem::take(&mut summary.regex_definitions));
}

fn should_filter(word: &str) -> bool {
    let normalized = word.trim().to_lowercase();
    if normalized.is_empty() || normalized.len() <= 2 {
        return true;
    }

    // Scoped identifiers are judged as a whole, not by their parts.
    if word.contains("::") {
        return !is_valid_identifier(word);
    }

    if STOP_WORDS.contains(normalized.as_str())
        || PROGRAMMING_KEYWORDS.contains(normalized.as_str())
        || NOISE_WORDS.contains(normalized.as_str())
    {
        return true;
    }

    if !is_valid_identifier(word) {
        return true;
    }

    normalized.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_identifier(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    // ctags emits these verbatim; they are definitions even though they
    // break the identifier grammar.
    if word.starts_with("lambda[") || word.starts_with("operator") || word.contains("::~") {
        return true;
    }

    let mut chars = word.chars();
    let first = chars.next().expect("non-empty checked above");
    if !first.is_alphabetic() && first != '_' {
        return false;
    }
    if !word.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ':') {
        return false;
    }
    word.chars().any(|c| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn stop_words_and_keywords_are_dropped() {
        let kept = filter_definitions(strings(&["the", "namespace", "parseConfig", "which"]));
        assert_eq!(kept, vec!["parseConfig".to_string()]);
    }

    #[test]
    fn short_and_numeric_tokens_are_dropped() {
        let kept = filter_definitions(strings(&["x", "ab", "42", "1234", "handleRequest"]));
        assert_eq!(kept, vec!["handleRequest".to_string()]);
    }

    #[test]
    fn noise_words_are_dropped_case_insensitively() {
        let kept = filter_definitions(strings(&["TMP", "Count", "renderFrame"]));
        assert_eq!(kept, vec!["renderFrame".to_string()]);
    }

    #[test]
    fn scoped_identifiers_survive() {
        let kept = filter_definitions(strings(&["net::Socket::open", "std::vector"]));
        assert!(kept.contains(&"net::Socket::open".to_string()));
        assert!(kept.contains(&"std::vector".to_string()));
    }

    #[test]
    fn special_ctag_forms_survive() {
        let kept = filter_definitions(strings(&[
            "lambda[abc123]",
            "operator<<",
            "Widget::~Widget",
        ]));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn malformed_tokens_are_dropped() {
        let kept = filter_definitions(strings(&["3cats", "foo-bar", "___", "has space"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_summary_rewrites_both_lists() {
        let mut summary = Summary {
            ctag_definitions: strings(&["the", "parseConfig"]),
            regex_definitions: strings(&["tmp", "writeOutput"]),
            ..Default::default()
        };
        filter_summary(&mut summary);
        assert_eq!(summary.ctag_definitions, vec!["parseConfig".to_string()]);
        assert_eq!(summary.regex_definitions, vec!["writeOutput".to_string()]);
    }
}
