//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use citelens_domain::{CitationRecord, ChatTurn, Sentiment, SentimentBreakdown};
use citelens_extractor::{AssemblyReport, UnitFailure};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Widest a text column may grow in table mode.
const MAX_COLUMN_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the records selected from a report.
    pub fn format_citations(&self, report: &AssemblyReport, records: &[&CitationRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_citations_json(report, records),
            OutputFormat::Table => Ok(self.format_citations_table(report, records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.citation.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_citations_json(&self, report: &AssemblyReport, records: &[&CitationRecord]) -> Result<String> {
        let breakdown = SentimentBreakdown::from_records(records.iter().copied());
        let json = serde_json::json!({
            "citations": records.iter().map(|r| record_json(r)).collect::<Vec<_>>(),
            "breakdown": {
                "positive": breakdown.count(Sentiment::Positive),
                "negative": breakdown.count(Sentiment::Negative),
                "neutral": breakdown.count(Sentiment::Neutral),
            },
            "failures": report.failures.iter().map(|f| serde_json::json!({
                "unit": f.unit.to_string(),
                "reason": f.reason,
            })).collect::<Vec<_>>(),
            "metadata": {
                "model": report.metadata.model_name,
                "chunks": report.metadata.chunk_count,
                "citations_extracted": report.metadata.citations_extracted,
                "references_extracted": report.metadata.references_extracted,
                "processing_time_ms": report.metadata.processing_time_ms,
            },
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_citations_table(&self, report: &AssemblyReport, records: &[&CitationRecord]) -> String {
        let mut out = String::new();

        if records.is_empty() {
            out.push_str(&self.colorize("No citations found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Citation", "Reference", "Sentiment", "Link"]);

            for (i, record) in records.iter().enumerate() {
                builder.push_record([
                    (i + 1).to_string(),
                    record.citation.to_string(),
                    record.reference.label().to_string(),
                    self.sentiment_label(record.sentiment),
                    record.link.clone(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .with(Modify::new(Rows::new(1..)).with(Width::wrap(MAX_COLUMN_WIDTH)));
            out.push_str(&table.to_string());
        }

        out.push('\n');
        out.push_str(&self.format_breakdown(&SentimentBreakdown::from_records(records.iter().copied())));
        out.push_str(&format!(
            "\n{} citations, {} references, {} chunks ({} ms, {})",
            report.records.len(),
            report.metadata.references_extracted,
            report.metadata.chunk_count,
            report.metadata.processing_time_ms,
            report.metadata.model_name
        ));

        for failure in &report.failures {
            out.push('\n');
            out.push_str(&self.failure(failure));
        }

        out
    }

    /// One-line sentiment summary.
    pub fn format_breakdown(&self, breakdown: &SentimentBreakdown) -> String {
        format!(
            "{}: {}  {}: {}  {}: {}",
            self.sentiment_label(Sentiment::Positive),
            breakdown.count(Sentiment::Positive),
            self.sentiment_label(Sentiment::Negative),
            breakdown.count(Sentiment::Negative),
            self.sentiment_label(Sentiment::Neutral),
            breakdown.count(Sentiment::Neutral),
        )
    }

    /// Format free text returned by the assistant.
    pub fn format_text(&self, label: &str, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut map = serde_json::Map::new();
                map.insert(label.to_lowercase(), serde_json::Value::String(text.to_string()));
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Table => Ok(format!("{}\n{}", self.colorize(label, "cyan"), text)),
            OutputFormat::Quiet => Ok(text.to_string()),
        }
    }

    /// Format a chat transcript.
    pub fn format_history(&self, chat: &[ChatTurn]) -> String {
        if chat.is_empty() {
            return self.info("No questions asked yet.");
        }
        chat.iter()
            .map(|turn| format!("{}: {}", self.colorize(turn.role.label(), "cyan"), turn.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a skipped extraction unit.
    pub fn failure(&self, failure: &UnitFailure) -> String {
        self.warning(&format!("Skipped {}: {}", failure.unit, failure.reason))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn sentiment_label(&self, sentiment: Sentiment) -> String {
        let color = match sentiment {
            Sentiment::Positive => "green",
            Sentiment::Negative => "red",
            Sentiment::Neutral => "blue",
        };
        self.colorize(sentiment.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn record_json(record: &CitationRecord) -> serde_json::Value {
    serde_json::json!({
        "citation": record.citation.as_str(),
        "reference": record.reference.reference().map(|r| r.as_str()),
        "match": record.reference.strategy(),
        "link": record.link,
        "sentiment": record.sentiment.as_str(),
    })
}
