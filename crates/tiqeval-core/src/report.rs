use tiqeval_types::EvalResult;

const BANNER_WIDTH: usize = 35;

/// Render the console report for an evaluation run.
pub fn render_report(result: &EvalResult, verbose: bool) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let summary = &result.summary;

    let mut out = String::new();
    out.push_str(&banner);
    out.push_str("\nTiQuAD EVALUATION RESULTS\n");
    out.push_str(&banner);
    out.push('\n');
    out.push_str(&format!(
        "Exact Match (EM): {:.4} ({:.2}%)\n",
        summary.em,
        summary.em * 100.0
    ));
    out.push_str(&format!(
        "F1 Score:         {:.4} ({:.2}%)\n",
        summary.f1,
        summary.f1 * 100.0
    ));
    out.push_str(&format!("Questions evaluated: {}\n", summary.num_evaluated));

    if verbose {
        out.push_str(&format!("Total predictions: {}\n", summary.total_predictions));
        out.push_str(&format!("Total references:  {}\n", summary.total_references));
        if summary.num_evaluated != summary.total_predictions {
            let missing = summary.total_predictions - summary.num_evaluated;
            out.push_str(&format!("Missing references: {}\n", missing));
        }
        if summary.num_evaluated != summary.total_references {
            let missing = summary.total_references - summary.num_evaluated;
            out.push_str(&format!("Missing predictions: {}\n", missing));
        }
        out.push_str(&format!(
            "Generated: {}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    out.push_str(&banner);
    out.push('\n');
    out
}
