use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Best-of-references EM and F1 for a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScore {
	pub qid: String,
	pub em: f64,
	pub f1: f64,
}

/// Dataset-level averages plus coverage counts.
///
/// `em` and `f1` are means over the jointly-covered question IDs only;
/// `total_predictions` / `total_references` count the full input mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
	pub em: f64,
	pub f1: f64,
	pub num_evaluated: usize,
	pub total_predictions: usize,
	pub total_references: usize,
}

/// Non-fatal coverage mismatch between predictions and references.
/// Affected question IDs are excluded from the averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageWarning {
	/// Question IDs with references but no prediction.
	MissingPredictions { qids: Vec<String> },
	/// Question IDs with a prediction but no references.
	MissingReferences { qids: Vec<String> },
}

impl CoverageWarning {
	pub fn message(&self) -> String {
		match self {
			CoverageWarning::MissingPredictions { qids } => format!(
				"{} question IDs have references but no predictions!",
				qids.len()
			),
			CoverageWarning::MissingReferences { qids } => format!(
				"{} question IDs have predictions but no references!",
				qids.len()
			),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResult {
	pub scores: Vec<QuestionScore>,
	pub summary: EvalSummary,
	#[serde(skip_serializing_if = "Vec::is_empty", default)]
	pub warnings: Vec<CoverageWarning>,
}

#[derive(Tabled)]
struct ScoreRow {
	qid: String,
	em: String,
	f1: String,
}

impl EvalResult {
	/// Per-question score table for verbose output.
	pub fn score_table(&self) -> String {
		let rows: Vec<ScoreRow> = self
			.scores
			.iter()
			.map(|s| ScoreRow {
				qid: s.qid.clone(),
				em: format!("{:.0}", s.em),
				f1: format!("{:.4}", s.f1),
			})
			.collect();

		let table = Table::new(rows);
		format!("{}\n", table)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_result() -> EvalResult {
		EvalResult {
			scores: vec![
				QuestionScore { qid: "q1".into(), em: 1.0, f1: 1.0 },
				QuestionScore { qid: "q2".into(), em: 0.0, f1: 0.8 },
			],
			summary: EvalSummary {
				em: 0.5,
				f1: 0.9,
				num_evaluated: 2,
				total_predictions: 3,
				total_references: 2,
			},
			warnings: vec![CoverageWarning::MissingReferences {
				qids: vec!["q3".into()],
			}],
		}
	}

	#[test]
	fn test_score_table_lists_qids() {
		let table = sample_result().score_table();
		assert!(table.contains("q1"));
		assert!(table.contains("q2"));
		assert!(table.contains("0.8000"));
	}

	#[test]
	fn test_warning_message_counts() {
		let result = sample_result();
		assert_eq!(
			result.warnings[0].message(),
			"1 question IDs have predictions but no references!"
		);
	}

	#[test]
	fn test_result_json_round_trip() {
		let json = serde_json::to_string(&sample_result()).unwrap();
		let back: EvalResult = serde_json::from_str(&json).unwrap();
		assert_eq!(back.summary.num_evaluated, 2);
		assert_eq!(back.warnings.len(), 1);
	}

	#[test]
	fn test_empty_warnings_skipped_in_json() {
		let mut result = sample_result();
		result.warnings.clear();
		let json = serde_json::to_string(&result).unwrap();
		assert!(!json.contains("warnings"));
	}
}
