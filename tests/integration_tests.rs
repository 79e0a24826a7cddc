use httpmock::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tree_reports::{
    AirtableClient, DocsCredentials, GoogleDocsClient, LocalStorage, OpenAiClient, ReportEngine,
    SummaryPipeline,
};

const DOC_ID: &str = "doc-template-1";

fn credentials() -> DocsCredentials {
    serde_json::from_value(json!({"access_token": "doc-token"})).unwrap()
}

fn engine_for(
    server: &MockServer,
    output_path: PathBuf,
) -> ReportEngine<
    SummaryPipeline<AirtableClient, OpenAiClient, GoogleDocsClient, GoogleDocsClient, LocalStorage>,
> {
    let source = AirtableClient::new(&server.base_url(), "at-key", "appBase", "Trees").unwrap();
    let completions = OpenAiClient::new(&server.base_url(), "oa-key", "gpt-4o-mini", 400).unwrap();
    let editor = GoogleDocsClient::new(&server.base_url(), credentials()).unwrap();
    let exporter = GoogleDocsClient::new(&server.base_url(), credentials()).unwrap();

    ReportEngine::new(SummaryPipeline::new(
        source,
        completions,
        editor,
        exporter,
        LocalStorage::new(),
        DOC_ID.to_string(),
        output_path,
    ))
}

#[tokio::test]
async fn end_to_end_writes_pdf_report() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("outputs/generated_report.pdf");

    // Two rows; the second is missing its Height field.
    let records_page = server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(200).json_body(json!({
            "records": [
                {
                    "id": "rec1",
                    "fields": {
                        "Species": "Quercus robur",
                        "DBH": "45cm",
                        "Height": "18m",
                        "Health Condition": "Fair",
                        "Risk Rating": "Moderate"
                    }
                },
                {
                    "id": "rec2",
                    "fields": {
                        "Species": "Betula pendula",
                        "DBH": "30cm",
                        "Health Condition": "Good",
                        "Risk Rating": "Low"
                    }
                }
            ]
        }));
    });

    let oak_completion = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Quercus robur");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Oak assessment."}}]
        }));
    });
    let birch_completion = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Betula pendula");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Birch assessment."}}]
        }));
    });

    let batch_update = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/documents/{}:batchUpdate", DOC_ID))
            .json_body(json!({
                "requests": [{
                    "insertText": {
                        "location": {"index": 1},
                        "text": "Oak assessment.\n\nBirch assessment.\n\n"
                    }
                }]
            }));
        then.status(200).json_body(json!({}));
    });
    let export = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/drive/v3/files/{}/export", DOC_ID))
            .query_param("mimeType", "application/pdf");
        then.status(200).body(b"%PDF-1.4 generated".to_vec());
    });

    let result = engine_for(&server, output_path.clone())
        .run()
        .await
        .unwrap();

    records_page.assert();
    oak_completion.assert();
    birch_completion.assert();
    batch_update.assert();
    export.assert();

    assert_eq!(result, Some(output_path.clone()));
    assert_eq!(
        std::fs::read(&output_path).unwrap(),
        b"%PDF-1.4 generated"
    );
}

#[tokio::test]
async fn missing_height_gets_placeholder_in_prompt() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("report.pdf");

    server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(200).json_body(json!({
            "records": [{"id": "rec1", "fields": {"Species": "Acer"}}]
        }));
    });
    let completion = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Height: N/A");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Maple assessment."}}]
        }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/documents/{}:batchUpdate", DOC_ID));
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/drive/v3/files/{}/export", DOC_ID));
        then.status(200).body(b"%PDF".to_vec());
    });

    engine_for(&server, output_path).run().await.unwrap();

    completion.assert();
}

#[tokio::test]
async fn fetch_failure_aborts_without_document_calls() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("report.pdf");

    server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(503);
    });
    let completion = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });
    let batch_update = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/documents/{}:batchUpdate", DOC_ID));
        then.status(200).json_body(json!({}));
    });
    let export = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/drive/v3/files/{}/export", DOC_ID));
        then.status(200).body(b"%PDF".to_vec());
    });

    let result = engine_for(&server, output_path.clone()).run().await;

    assert!(result.is_err());
    assert_eq!(completion.hits(), 0);
    assert_eq!(batch_update.hits(), 0);
    assert_eq!(export.hits(), 0);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn whitespace_only_completions_skip_document_update() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("report.pdf");

    server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(200).json_body(json!({
            "records": [{"id": "rec1", "fields": {"Species": "Oak"}}]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": "  \n "}}]}));
    });
    let batch_update = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/documents/{}:batchUpdate", DOC_ID));
        then.status(200).json_body(json!({}));
    });
    let export = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/drive/v3/files/{}/export", DOC_ID));
        then.status(200).body(b"%PDF".to_vec());
    });

    let result = engine_for(&server, output_path.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(batch_update.hits(), 0);
    assert_eq!(export.hits(), 0);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn empty_record_set_is_a_successful_no_op() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("report.pdf");

    server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(200).json_body(json!({"records": []}));
    });
    let completion = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let result = engine_for(&server, output_path.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(completion.hits(), 0);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn document_update_failure_aborts_before_export() {
    let server = MockServer::start();
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("report.pdf");

    server.mock(|when, then| {
        when.method(GET).path("/appBase/Trees");
        then.status(200).json_body(json!({
            "records": [{"id": "rec1", "fields": {"Species": "Oak"}}]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": "Oak assessment."}}]}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/documents/{}:batchUpdate", DOC_ID));
        then.status(403);
    });
    let export = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/drive/v3/files/{}/export", DOC_ID));
        then.status(200).body(b"%PDF".to_vec());
    });

    let result = engine_for(&server, output_path.clone()).run().await;

    assert!(result.is_err());
    assert_eq!(export.hits(), 0);
    assert!(!output_path.exists());
}
