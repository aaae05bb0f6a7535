mod common;

use clap::Parser;
use common::{json_response, table_json};
use extract_view::cli::{handle_command, Cli};
use extract_view::SubmitOutcome;
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_resume(dir: &Path) -> String {
    let file = dir.join("resume.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();
    file.to_str().unwrap().to_string()
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut contents: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();
    contents.sort();
    contents
}

async fn mount_upload(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(json_response(200, body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_upload_json_output_and_table_export() {
    let server = MockServer::start().await;
    let reply = json!({
        "extracted_text": "Hello",
        "extracted_tables": [table_json(&["A", "B"], &[&["1", "2"]])]
    });
    mount_upload(&server, reply.clone()).await;

    let temp = tempfile::tempdir().unwrap();
    let file = write_resume(temp.path());
    let output = temp.path().join("reply.json");
    let tables = temp.path().join("tables");
    let uri = server.uri();

    let cli = Cli::try_parse_from([
        "cvextract",
        "upload",
        file.as_str(),
        "--format",
        "json",
        "--output",
        output.to_str().unwrap(),
        "--tables-dir",
        tables.to_str().unwrap(),
        "--config",
        temp.path().join("missing.yaml").to_str().unwrap(),
        "--service-url",
        uri.as_str(),
    ])
    .unwrap();

    let outcome = handle_command(cli).await.unwrap();
    assert!(outcome.is_rendered());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, reply);
    assert_eq!(csv_files(&tables), vec!["A,B\n1,2\n".to_string()]);
}

#[tokio::test]
async fn test_relative_paths_land_in_output_dir() {
    let server = MockServer::start().await;
    mount_upload(
        &server,
        json!({
            "extracted_text": "Hello",
            "extracted_tables": [table_json(&["A"], &[&["1"]])]
        }),
    )
    .await;

    let temp = tempfile::tempdir().unwrap();
    let file = write_resume(temp.path());
    let out_dir = temp.path().join("out");
    let config = temp.path().join("config.yaml");
    let section = format!("  output:\n    output_dir: {:?}\n", out_dir);
    std::fs::write(&config, format!("local:\n{section}production:\n{section}")).unwrap();
    let uri = server.uri();

    let cli = Cli::try_parse_from([
        "cvextract",
        "upload",
        file.as_str(),
        "--format",
        "html",
        "--output",
        "result.html",
        "--config",
        config.to_str().unwrap(),
        "--service-url",
        uri.as_str(),
        "--tables-dir",
    ])
    .unwrap();

    handle_command(cli).await.unwrap();

    let page = std::fs::read_to_string(out_dir.join("result.html")).unwrap();
    assert!(page.contains("<div id=\"extractedText\">Hello</div>"));
    assert_eq!(csv_files(&out_dir), vec!["A\n1\n".to_string()]);
}

#[tokio::test]
async fn test_analyze_failure_is_reported_as_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let output = temp.path().join("analysis.json");
    let uri = server.uri();

    let cli = Cli::try_parse_from([
        "cvextract",
        "analyze",
        "--job-description",
        "JD",
        "--format",
        "json",
        "--output",
        output.to_str().unwrap(),
        "--config",
        temp.path().join("missing.yaml").to_str().unwrap(),
        "--service-url",
        uri.as_str(),
    ])
    .unwrap();

    let outcome = handle_command(cli).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let error = written["error"].as_str().unwrap();
    assert!(error.contains("non-JSON"));
    assert!(error.contains("502"));
}
