use std::collections::HashMap;

use crate::normalize::normalize;

/// Exact match against a single reference: 1.0 iff the normalized strings
/// are equal.
pub fn exact_match(prediction: &str, reference: &str) -> f64 {
    if normalize(prediction) == normalize(reference) {
        1.0
    } else {
        0.0
    }
}

/// Token-level F1 against a single reference.
///
/// Tokens are compared as multisets: a repeated word counts once per
/// occurrence, capped by its count on the other side. Follows the SQuAD
/// convention for empty token sequences: 1.0 if both sides normalize to
/// nothing, 0.0 if only one does.
pub fn token_f1(prediction: &str, reference: &str) -> f64 {
    let pred_norm = normalize(prediction);
    let ref_norm = normalize(reference);
    let pred_tokens: Vec<&str> = pred_norm.split_whitespace().collect();
    let ref_tokens: Vec<&str> = ref_norm.split_whitespace().collect();

    if pred_tokens.is_empty() || ref_tokens.is_empty() {
        return if pred_tokens == ref_tokens { 1.0 } else { 0.0 };
    }

    let mut ref_counts: HashMap<&str, usize> = HashMap::new();
    for token in &ref_tokens {
        *ref_counts.entry(*token).or_insert(0) += 1;
    }
    let mut num_same = 0usize;
    for token in &pred_tokens {
        if let Some(count) = ref_counts.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                num_same += 1;
            }
        }
    }

    if num_same == 0 {
        return 0.0;
    }
    let precision = num_same as f64 / pred_tokens.len() as f64;
    let recall = num_same as f64 / ref_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

/// EM and F1 for one prediction over all reference alternatives.
///
/// The two maxima are taken independently: the best EM and the best F1 need
/// not come from the same reference.
pub fn max_em_f1(prediction: &str, references: &[String]) -> (f64, f64) {
    let mut max_em = 0.0f64;
    let mut max_f1 = 0.0f64;
    for reference in references {
        max_em = max_em.max(exact_match(prediction, reference));
        max_f1 = max_f1.max(token_f1(prediction, reference));
    }
    (max_em, max_f1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_exact_match_after_normalization() {
        assert_eq!(exact_match("The Addis Ababa!", "addis ababa"), 1.0);
        assert_eq!(exact_match("Addis", "Ababa"), 0.0);
    }

    #[test]
    fn test_exact_match_empty_normalized_pair() {
        // "The." and "A," both normalize away entirely.
        assert_eq!(exact_match("The.", "A,"), 1.0);
        assert_eq!(exact_match("The.", "cat"), 0.0);
    }

    #[test]
    fn test_f1_perfect() {
        assert!((token_f1("Addis Ababa", "addis, ababa") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_f1_partial_overlap() {
        // pred {big, red, car} vs ref {big, car}: num_same = 2,
        // precision 2/3, recall 1, f1 = 0.8.
        assert!((token_f1("the big red car", "big car") - 0.8).abs() < EPS);
    }

    #[test]
    fn test_f1_no_overlap() {
        assert_eq!(token_f1("apples and oranges", "quick brown fox"), 0.0);
    }

    #[test]
    fn test_f1_repeated_tokens_use_min_count() {
        // pred {very, very, good} vs ref {very, good}: num_same = 2,
        // precision 2/3, recall 1, f1 = 0.8.
        assert!((token_f1("very very good", "very good") - 0.8).abs() < EPS);
    }

    #[test]
    fn test_f1_empty_rules() {
        assert_eq!(token_f1("The.", "A,"), 1.0);
        assert_eq!(token_f1("The.", "cat"), 0.0);
        assert_eq!(token_f1("cat", "A,"), 0.0);
    }

    #[test]
    fn test_f1_bounds() {
        for (pred, gold) in [
            ("a", "b"),
            ("the big red car", "big car"),
            ("ናይ ከተማ", "ከተማ"),
            ("x y z", "x"),
        ] {
            let f1 = token_f1(pred, gold);
            assert!((0.0..=1.0).contains(&f1), "f1 {f1} out of bounds");
        }
    }

    #[test]
    fn test_max_over_references() {
        let refs = vec!["automobile".to_string(), "car".to_string()];
        let (em, f1) = max_em_f1("car", &refs);
        assert_eq!(em, 1.0);
        assert!((f1 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_em_and_f1_maximized_independently() {
        // Neither reference matches exactly; F1 peaks against the second.
        let refs = vec!["blue train".to_string(), "red car engine".to_string()];
        let (em, f1) = max_em_f1("red car", &refs);
        assert_eq!(em, 0.0);
        assert!((f1 - 0.8).abs() < EPS);
    }

    #[test]
    fn test_no_references_scores_zero() {
        let (em, f1) = max_em_f1("anything", &[]);
        assert_eq!(em, 0.0);
        assert_eq!(f1, 0.0);
    }
}
