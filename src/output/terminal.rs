// Colored terminal summaries of a run.
//
// Axis values live in [-1, 1] after normalization, so each value is drawn
// as a bar growing left (towards the first endpoint) or right (towards the
// second) from a center mark.

use colored::Colorize;

use crate::corpus::keywords::KeywordCorpus;
use crate::vectors::aggregate::ClusterVector;

const HALF_WIDTH: usize = 10;
const AXIS_LABEL_CHARS: usize = 36;

/// Display the keyword corpus: one line per axis with keyword counts.
pub fn display_corpus(corpus: &KeywordCorpus) {
    println!(
        "\n{}",
        format!(
            "=== Keyword Corpus ({} axes, {} endpoints) ===",
            corpus.axis_count(),
            corpus.endpoint_count()
        )
        .bold()
    );
    println!();

    for (i, pair) in corpus.endpoints().chunks_exact(2).enumerate() {
        println!(
            "  {:>2}. {} {} {}",
            i + 1,
            pair[0].name.bold(),
            "|".dimmed(),
            pair[1].name.bold()
        );
        println!(
            "      Keywords: {} / {}",
            pair[0].keywords.len().to_string().dimmed(),
            pair[1].keywords.len().to_string().dimmed()
        );
    }
    println!();
}

/// Display each cluster's vector as centered bars, one line per axis.
pub fn display_clusters(axes: &[String], clusters: &[ClusterVector]) {
    if clusters.is_empty() {
        println!("No clusters to display.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Cluster Vectors ({} clusters) ===", clusters.len()).bold()
    );

    for cluster in clusters {
        println!(
            "\n  Cluster {} ({} documents)",
            cluster.label.to_string().bold(),
            cluster.members
        );
        for (axis, value) in axes.iter().zip(&cluster.values) {
            println!(
                "    {:<width$} {} {:>6.3}",
                super::truncate_chars(axis, AXIS_LABEL_CHARS),
                centered_bar(*value),
                value,
                width = AXIS_LABEL_CHARS + 3
            );
        }
    }
    println!();
}

/// Render a value in [-1, 1] as "[    ====|          ]".
fn centered_bar(value: f64) -> colored::ColoredString {
    let filled = ((value.abs().min(1.0)) * HALF_WIDTH as f64).round() as usize;
    let (left, right) = if value < 0.0 {
        (
            format!("{}{}", " ".repeat(HALF_WIDTH - filled), "=".repeat(filled)),
            " ".repeat(HALF_WIDTH),
        )
    } else {
        (
            " ".repeat(HALF_WIDTH),
            format!("{}{}", "=".repeat(filled), " ".repeat(HALF_WIDTH - filled)),
        )
    };
    let bar = format!("[{left}|{right}]");

    if value < 0.0 {
        bar.bright_blue()
    } else {
        bar.bright_green()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_bar_shape() {
        colored::control::set_override(false);
        assert_eq!(centered_bar(0.5).to_string(), "[          |=====     ]");
        assert_eq!(centered_bar(-1.0).to_string(), "[==========|          ]");
        assert_eq!(centered_bar(0.0).to_string(), "[          |          ]");
    }
}
