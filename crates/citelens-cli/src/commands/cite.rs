//! Cite command implementation.

use crate::app::App;
use crate::cli::CiteArgs;
use crate::document::load_document;
use crate::error::Result;
use crate::output::Formatter;
use citelens_domain::{CitationRecord, CompletionService, RecordFilter};
use citelens_extractor::AssemblyReport;

/// Execute the cite command.
pub fn execute_cite<L>(args: CiteArgs, app: &App<L>, formatter: &Formatter) -> Result<()>
where
    L: CompletionService + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let text = load_document(&args.file)?;
    let report = app.assemble(&text);
    let filter = build_filter(&args);

    println!("{}", render(&report, &filter, formatter)?);
    Ok(())
}

fn build_filter(args: &CiteArgs) -> RecordFilter {
    let mut filter = RecordFilter::all();

    if let Some(sentiment) = args.sentiment {
        filter = filter.with_sentiment(sentiment.into());
    }

    if let Some(query) = &args.search {
        filter = filter.with_query(query.clone());
    }

    filter
}

/// Render the filtered view of a report.
pub fn render(report: &AssemblyReport, filter: &RecordFilter, formatter: &Formatter) -> Result<String> {
    let records: Vec<&CitationRecord> = filter.apply(&report.records);
    formatter.format_citations(report, &records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SentimentArg;
    use crate::config::OutputFormat;
    use citelens_domain::Sentiment;
    use std::path::PathBuf;

    #[test]
    fn test_filter_from_args() {
        let args = CiteArgs {
            file: PathBuf::from("paper.pdf"),
            sentiment: Some(SentimentArg::Positive),
            search: Some("Smith".to_string()),
        };
        let filter = build_filter(&args);
        assert_eq!(filter.sentiment, Some(Sentiment::Positive));
        assert_eq!(filter.query.as_deref(), Some("Smith"));
    }

    #[test]
    fn test_render_applies_filter() {
        use citelens_extractor::AssemblyMetadata;
        use citelens_domain::{Citation, ReferenceMatch};

        let record = |text: &str, sentiment| CitationRecord {
            citation: Citation::new(text),
            reference: ReferenceMatch::NoMatch,
            link: "https://scholar.google.com".to_string(),
            sentiment,
        };
        let report = AssemblyReport {
            records: vec![record("Good one.", Sentiment::Positive), record("Bad one.", Sentiment::Negative)],
            failures: Vec::new(),
            metadata: AssemblyMetadata {
                chunk_count: 1,
                citations_extracted: 2,
                references_extracted: 0,
                model_name: "mock".to_string(),
                processing_time_ms: 0,
            },
        };

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let filter = RecordFilter::all().with_sentiment(Sentiment::Negative);
        assert_eq!(render(&report, &filter, &formatter).unwrap(), "Bad one.");
    }
}
