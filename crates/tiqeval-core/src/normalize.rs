use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// ASCII punctuation minus hyphen, plus Ge'ez punctuation and curly quotes.
// Hyphen is kept on purpose: hyphenated forms stay a single token.
static ALL_PUNCS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[!"#$%&'()*+,./:;<=>?@\[\\\]^_`{|}~፡፣፥፤፦።፧፨፠“”‘’‚‛„‟]"##)
        .expect("fixed punctuation class compiles")
});

// Articles carry no answer content in either language. Tigrinya has no
// dedicated article, so the set covers its most common particles instead.
static EXCLUDED_ARTICLES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from(["a", "an", "the", "ብ", "ናይ", "ኣብ", "እዩ", "ናብ", "ካብ", "እቲ"])
});

/// Canonicalize an answer string for comparison.
///
/// Lowercases (Ge'ez has no case and passes through), replaces punctuation
/// with spaces, collapses whitespace, and drops article tokens. Pure and
/// idempotent; may return an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = ALL_PUNCS.replace_all(&lowered, " ");
    cleaned
        .split_whitespace()
        .filter(|token| !EXCLUDED_ARTICLES.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}
