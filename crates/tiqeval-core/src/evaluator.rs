use std::collections::BTreeMap;

use thiserror::Error;
use tiqeval_types::{CoverageWarning, EvalResult, EvalSummary, QuestionScore};

use crate::metrics::max_em_f1;

/// Question ID -> predicted answer.
pub type Predictions = BTreeMap<String, String>;
/// Question ID -> acceptable gold answers.
pub type References = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("no common question IDs found between predictions and references")]
    NoOverlap,
}

/// Score predictions against references aligned by question ID.
///
/// Averages best-of-references EM and F1 over the jointly-covered IDs.
/// Unmatched IDs on either side are excluded from the averages and reported
/// as [`CoverageWarning`]s; an empty intersection is fatal.
pub fn score(
    predictions: &Predictions,
    references: &References,
) -> Result<EvalResult, ScoreError> {
    let mut scores = Vec::new();
    for (qid, prediction) in predictions {
        if let Some(refs) = references.get(qid) {
            let (em, f1) = max_em_f1(prediction, refs);
            scores.push(QuestionScore { qid: qid.clone(), em, f1 });
        }
    }
    if scores.is_empty() {
        return Err(ScoreError::NoOverlap);
    }

    let mut warnings = Vec::new();
    let missing_preds: Vec<String> = references
        .keys()
        .filter(|qid| !predictions.contains_key(*qid))
        .cloned()
        .collect();
    if !missing_preds.is_empty() {
        warnings.push(CoverageWarning::MissingPredictions { qids: missing_preds });
    }
    let missing_refs: Vec<String> = predictions
        .keys()
        .filter(|qid| !references.contains_key(*qid))
        .cloned()
        .collect();
    if !missing_refs.is_empty() {
        warnings.push(CoverageWarning::MissingReferences { qids: missing_refs });
    }

    let count = scores.len() as f64;
    let summary = EvalSummary {
        em: scores.iter().map(|s| s.em).sum::<f64>() / count,
        f1: scores.iter().map(|s| s.f1).sum::<f64>() / count,
        num_evaluated: scores.len(),
        total_predictions: predictions.len(),
        total_references: references.len(),
    };

    Ok(EvalResult { scores, summary, warnings })
}
