use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use tiqeval_core::{
	load_predictions, render_report, score, HubSplit, LocalEvalSet, ReferenceSource, Split,
};

#[derive(Debug, Parser)]
#[command(name = "tiqeval", about = "Evaluate extractive QA predictions on the TiQuAD benchmark")]
struct Cli {
	/// JSON file containing predictions in format { "qid": "answer text", ... }
	preds_path: PathBuf,

	/// Path to a local SQuAD-shaped evaluation set JSON file
	#[arg(long)]
	eval_set_path: Option<PathBuf>,

	/// Load the evaluation split from the dataset hub instead of a local file
	#[arg(long, action = ArgAction::SetTrue)]
	use_hf_dataset: bool,

	/// Hub dataset ID used with --use-hf-dataset
	#[arg(long, default_value = "fgaim/tiquad")]
	dataset: String,

	/// Dataset split: train, validation, test
	#[arg(long, default_value = "validation")]
	split: String,

	/// Print detailed evaluation information
	#[arg(long, action = ArgAction::SetTrue)]
	verbose: bool,

	/// Write the full result (per-question scores, summary, warnings) as JSON
	#[arg(long)]
	json_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let split = match cli.split.to_lowercase().as_str() {
		"train" => Split::Train,
		"validation" => Split::Validation,
		"test" => Split::Test,
		other => bail!("Unknown split {other:?}, expected train, validation or test"),
	};

	println!("Loading predictions from: {}", cli.preds_path.display());
	let predictions = load_predictions(&cli.preds_path).await?;

	let source: Box<dyn ReferenceSource> = if cli.use_hf_dataset {
		println!("Loading {} set from the dataset hub...", split.as_str());
		Box::new(HubSplit::new(cli.dataset.clone(), split))
	} else if let Some(path) = cli.eval_set_path.clone() {
		println!("Loading evaluation set from local file...");
		Box::new(LocalEvalSet::new(path))
	} else {
		bail!("No evaluation option provided! Either use --eval-set-path or --use-hf-dataset!");
	};
	let references = source.load().await?;

	if cli.verbose {
		println!("Loaded {} predictions", predictions.len());
		println!("Loaded {} references", references.len());
	}

	println!("Computing evaluation scores...");
	let result = score(&predictions, &references)?;

	for warning in &result.warnings {
		eprintln!("Warning: {}", warning.message());
	}

	if cli.verbose {
		println!("\n{}", result.score_table());
	}
	println!("\n{}", render_report(&result, cli.verbose));

	if let Some(path) = cli.json_out {
		let json = serde_json::to_string_pretty(&result)?;
		tokio::fs::write(path, json).await?;
	}

	Ok(())
}
