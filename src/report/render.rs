use super::types::Report;
use chrono::DateTime;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Render a report as plain text for terminal output
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Performance Summary");
    let _ = writeln!(
        out,
        "Practice Session • {} • {} min",
        format_date(&report.timestamp),
        report.duration
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Overall score: {} ({})", format_score(report.score()), report.tone());
    let _ = writeln!(out);

    for (name, value) in report.metrics().entries() {
        let _ = writeln!(out, "  {:<14} {} {:>3}", name, bar(value), format_score(value));
    }

    let feedback = report.feedback();
    let sections: [(&str, &[String]); 5] = [
        ("What You Did Well", &feedback.strengths),
        ("Keep Practicing", &feedback.improvements),
        ("Helpful Tips", &feedback.practice_tips),
        ("Speaking Patterns", &feedback.speaking_patterns),
        ("Cultural Notes", &feedback.cultural_notes),
    ];

    for (title, items) in sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", title);
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  {}", report.summary());

    out
}

fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%B %-d, %Y %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportDraft, ReportFeedback, ReportMetrics, Tone};

    fn sample_report() -> Report {
        Report::new(
            ReportDraft {
                score: 72.0,
                metrics: ReportMetrics {
                    fluency: 70.0,
                    grammar: 65.5,
                    vocabulary: 80.0,
                    pronunciation: 75.0,
                    listening: 100.0,
                },
                feedback: ReportFeedback {
                    strengths: vec!["Clear answers".into()],
                    improvements: vec!["Past tense".into()],
                    practice_tips: vec!["Read aloud".into()],
                    speaking_patterns: vec!["Short sentences".into()],
                    cultural_notes: vec!["Small talk".into()],
                },
                summary: "Solid session.".into(),
                tone: Tone::Constructive,
            },
            "2025-03-04T10:30:00.000Z".into(),
            10,
        )
    }

    #[test]
    fn test_render_sections() {
        let text = render_text(&sample_report());
        assert!(text.contains("March 4, 2025 10:30"));
        assert!(text.contains("Overall score: 72 (constructive)"));
        assert!(text.contains("What You Did Well\n  - Clear answers"));
        assert!(text.contains("Cultural Notes\n  - Small talk"));
        assert!(text.contains("65.5"));
        assert!(text.ends_with("  Solid session.\n"));
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0.0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_unparseable_date_passthrough() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
