//! Text rendering of dice and the probability table.

use fair_dice_core::games::{Die, ProbabilityMatrix};
use std::fmt::Write;

/// Table of the chance that the row die beats the column die
pub fn probability_table(dice: &[Die], matrix: &ProbabilityMatrix) -> String {
    let labels: Vec<String> = dice.iter().map(|d| d.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0).max(6);

    let mut out = String::new();
    let _ = writeln!(out, "Probability of the win for the row dice over the column dice:");
    let _ = write!(out, "{:>width$}", "");
    for label in &labels {
        let _ = write!(out, " | {label:>width$}");
    }
    let _ = writeln!(out);

    for (row, label) in labels.iter().enumerate() {
        let _ = write!(out, "{label:>width$}");
        for col in 0..labels.len() {
            let cell = match matrix.get(row, col) {
                Some(p) if row != col => format!("{p:.4}"),
                _ => "-".to_string(),
            };
            let _ = write!(out, " | {cell:>width$}");
        }
        let _ = writeln!(out);
    }
    out
}
