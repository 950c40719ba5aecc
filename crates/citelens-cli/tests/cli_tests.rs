//! Command tests driven through the library API with a scripted provider

use citelens_cli::cli::{AskArgs, CiteArgs, DocumentArgs, SentimentArg};
use citelens_cli::commands;
use citelens_cli::config::OutputFormat;
use citelens_cli::{App, CliError, Formatter};
use citelens_extractor::{
    ExtractorConfig, CITATION_INSTRUCTION, QUESTION_INSTRUCTION, REFERENCE_INSTRUCTION, SUMMARY_INSTRUCTION,
};
use citelens_llm::MockProvider;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_paper(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("paper.txt");
    fs::write(
        &path,
        "Smith (2019) proposed an excellent parser. Jones (2020) reported poor recall. \
References: Smith 2019. Jones 2020.",
    )
    .unwrap();
    path
}

fn scripted_app() -> (App<MockProvider>, MockProvider) {
    let mut provider = MockProvider::default();
    provider.add_response(REFERENCE_INSTRUCTION, "Smith 2019.\nJones 2020.");
    provider.add_response(
        CITATION_INSTRUCTION,
        "Smith (2019) proposed an excellent parser.\nJones (2020) reported poor recall.",
    );
    provider.add_response(SUMMARY_INSTRUCTION, "A parser paper.");
    provider.add_response(QUESTION_INSTRUCTION, "A parser.");
    let observer = provider.clone();

    (App::new(provider, ExtractorConfig::default()).unwrap(), observer)
}

#[test]
fn test_cite_command() {
    let dir = TempDir::new().unwrap();
    let (app, observer) = scripted_app();
    let formatter = Formatter::new(OutputFormat::Json, false);

    let args = CiteArgs {
        file: write_paper(&dir),
        sentiment: Some(SentimentArg::Negative),
        search: None,
    };
    commands::execute_cite(args, &app, &formatter).unwrap();
    assert_eq!(observer.call_count(), 2);

    let report = app.assemble(&fs::read_to_string(dir.path().join("paper.txt")).unwrap());
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].reference.label(), "Jones 2020.");
}

#[test]
fn test_summarize_and_ask_commands() {
    let dir = TempDir::new().unwrap();
    let (app, observer) = scripted_app();
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    let file = write_paper(&dir);

    commands::execute_summarize(DocumentArgs { file: file.clone() }, &app, &formatter).unwrap();
    commands::execute_ask(
        AskArgs {
            file,
            question: vec!["What".to_string(), "is".to_string(), "it?".to_string()],
        },
        &app,
        &formatter,
    )
    .unwrap();

    let requests = observer.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].prompt.ends_with("Question: What is it?"));
}

#[test]
fn test_summarize_empty_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "   ").unwrap();
    let (app, observer) = scripted_app();
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    let result = commands::execute_summarize(DocumentArgs { file: path }, &app, &formatter);
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
    assert_eq!(observer.call_count(), 0);
}
