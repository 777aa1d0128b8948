use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::evaluator::{Predictions, References};

/// Supplies the `{qid: [gold answers]}` mapping consumed by the evaluator.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load(&self) -> Result<References>;
}

/// Dataset split on the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }
}

/// Load predictions from a JSON object `{"qid": "answer text", ...}`.
pub async fn load_predictions(path: impl AsRef<Path>) -> Result<Predictions> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read predictions from {:?}", path))?;
    parse_predictions(&content)
        .with_context(|| format!("Invalid predictions file {:?}", path))
}

pub fn parse_predictions(json: &str) -> Result<Predictions> {
    Ok(serde_json::from_str(json)
        .context("Expected a JSON object mapping question IDs to answer strings")?)
}

/// SQuAD-shaped local evaluation set:
/// `{"data": [{"paragraphs": [{"qas": [{"id", "answers": [{"text"}]}]}]}]}`.
pub struct LocalEvalSet {
    path: PathBuf,
}

impl LocalEvalSet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deserialize)]
struct EvalSet {
    data: Vec<Article>,
}

#[derive(Deserialize)]
struct Article {
    paragraphs: Vec<Paragraph>,
}

#[derive(Deserialize)]
struct Paragraph {
    qas: Vec<QuestionAnswers>,
}

#[derive(Deserialize)]
struct QuestionAnswers {
    id: String,
    answers: Vec<Answer>,
}

#[derive(Deserialize)]
struct Answer {
    text: String,
}

pub fn parse_eval_set(json: &str) -> Result<References> {
    let eval_set: EvalSet =
        serde_json::from_str(json).context("Expected SQuAD-shaped evaluation set JSON")?;
    let mut references = References::new();
    for article in eval_set.data {
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                // A question with no gold answers has nothing to compare
                // against and is left out of the mapping.
                if qa.answers.is_empty() {
                    continue;
                }
                let texts = qa.answers.into_iter().map(|a| a.text).collect();
                references.insert(qa.id, texts);
            }
        }
    }
    Ok(references)
}

#[async_trait]
impl ReferenceSource for LocalEvalSet {
    async fn load(&self) -> Result<References> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read evaluation set from {:?}", self.path))?;
        parse_eval_set(&content)
            .with_context(|| format!("Invalid evaluation set {:?}", self.path))
    }
}

const HUB_ROWS_URL: &str = "https://datasets-server.huggingface.co/rows";
const HUB_PAGE_SIZE: usize = 100;

/// Fetch a split from the dataset hub via the datasets-server rows API.
/// Rows are expected to carry `{"id": ..., "answers": {"text": [...]}}`.
pub struct HubSplit {
    dataset: String,
    split: Split,
}

impl HubSplit {
    pub fn new(dataset: impl Into<String>, split: Split) -> Self {
        Self { dataset: dataset.into(), split }
    }
}

#[derive(Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
    num_rows_total: usize,
}

#[derive(Deserialize)]
struct RowEntry {
    row: HubRow,
}

#[derive(Deserialize)]
struct HubRow {
    id: String,
    answers: HubAnswers,
}

#[derive(Deserialize)]
struct HubAnswers {
    text: Vec<String>,
}

#[async_trait]
impl ReferenceSource for HubSplit {
    async fn load(&self) -> Result<References> {
        let client = reqwest::Client::new();
        let mut references = References::new();
        let mut offset = 0usize;
        loop {
            let page: RowsPage = client
                .get(HUB_ROWS_URL)
                .query(&[
                    ("dataset", self.dataset.as_str()),
                    ("config", "default"),
                    ("split", self.split.as_str()),
                ])
                .query(&[("offset", offset), ("length", HUB_PAGE_SIZE)])
                .send()
                .await
                .and_then(|resp| resp.error_for_status())
                .with_context(|| {
                    format!(
                        "Failed to fetch {} rows for {} at offset {}",
                        self.split.as_str(),
                        self.dataset,
                        offset
                    )
                })?
                .json()
                .await
                .context("Unexpected rows payload from the dataset hub")?;

            let fetched = page.rows.len();
            for entry in page.rows {
                if entry.row.answers.text.is_empty() {
                    continue;
                }
                references.insert(entry.row.id, entry.row.answers.text);
            }
            offset += fetched;
            if fetched == 0 || offset >= page.num_rows_total {
                break;
            }
        }
        Ok(references)
    }
}
