//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use motive_core::model::{AnalysisResult, AnalyzeResponse, Motive, MotiveScores};
use serde_json::Value;

/// Print a relay response in human-readable form.
pub fn print_response(response: &AnalyzeResponse) {
    match response {
        AnalyzeResponse::Scores(scores) => print_scores(scores),
        AnalyzeResponse::Analysis(result) => print_analysis(result),
    }
}

/// Print flat motive scores with a bar per motive.
pub fn print_scores(scores: &MotiveScores) {
    println!("{:<14} {:>8}", "Motive", "Score");
    println!("{}", "─".repeat(46));

    for motive in Motive::ALL {
        let value = scores.get(motive);
        println!(
            "{:<14} {:>8.2}  {}",
            motive_label(motive),
            value,
            bar(value).dimmed()
        );
    }
}

/// Print a sentence-level analysis summary.
pub fn print_analysis(result: &AnalysisResult) {
    println!("{}: {}", "Words".bold(), result.total_words);
    println!("{}: {}", "Sentences".bold(), result.total_sentences);
    println!("{}: {}", "Characters".bold(), result.text_length_chars);
    println!();

    if result.motives.is_empty() {
        println!("{}", "No motive imagery reported.".dimmed());
        return;
    }

    for (motive, detail) in &result.motives {
        println!("{}", motive_label(*motive));
        match detail {
            Value::Object(fields) => {
                for (key, value) in fields {
                    println!("  {:<20} {}", key, value);
                }
            }
            other => println!("  {}", other),
        }
    }
}

fn motive_label(motive: Motive) -> ColoredString {
    match motive {
        Motive::Achievement => "achievement".yellow(),
        Motive::Affiliation => "affiliation".green(),
        Motive::Power => "power".red(),
    }
}

/// A 30-column bar for a 0-100 percentage.
fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * 30.0).round() as usize;
    "█".repeat(filled)
}
