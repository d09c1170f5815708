// Terminal and JSON report rendering.
//
// The plain report prints one line per kept model in the form
// `<topic> <precision> <recall> <accuracy> <f1>`, each metric to three
// decimal places. Kept models always have defined metrics (an undefined
// F1 never clears the threshold), but the formatter still spells out
// `undef` rather than inventing a number.

use anyhow::Result;
use colored::Colorize;

use crate::model::ModelReport;

/// Format a metric to three decimal places, or `undef` for a metric whose
/// defining ratio was 0/0.
pub fn fmt_metric(metric: Option<f64>) -> String {
    match metric {
        Some(value) => format!("{value:.3}"),
        None => "undef".to_string(),
    }
}

/// The per-model report line: `<topic> <precision> <recall> <accuracy> <f1>`.
pub fn report_line(model: &ModelReport) -> String {
    format!(
        "{} {} {} {} {}",
        model.topic,
        fmt_metric(model.metrics.precision),
        fmt_metric(model.metrics.recall),
        fmt_metric(model.metrics.accuracy),
        fmt_metric(model.metrics.f1),
    )
}

/// Display the kept models in the terminal.
pub fn display_models(models: &[ModelReport], f1_threshold: f64) {
    if models.is_empty() {
        println!("No models cleared the F1 threshold of {f1_threshold}.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Kept models ({}, F1 > {}) ===", models.len(), f1_threshold).bold()
    );
    println!(
        "{}",
        "topic precision recall accuracy f1".dimmed()
    );
    for model in models {
        println!("{}", report_line(model));
    }
}

/// Render the kept models as pretty-printed JSON.
pub fn render_json(models: &[ModelReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(models)?)
}
