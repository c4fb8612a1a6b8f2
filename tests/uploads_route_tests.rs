use apilab::config::{Config, Lab, UploadsConfig};
use apilab::server::LabApp;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const BOUNDARY: &str = "apilab-test-boundary";

struct Part<'a> {
    field: &'a str,
    filename: &'a str,
    content_type: &'a str,
    data: &'a [u8],
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn temp_upload_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "apilab-uploads-{tag}-{}-{}",
        std::process::id(),
        nanos
    ))
}

async fn uploads_app(uploads: UploadsConfig) -> Router {
    let mut cfg = Config::default();
    cfg.basic.lab = Lab::Uploads;
    cfg.uploads = uploads;
    LabApp::start(&cfg).await.expect("uploads lab starts").router
}

async fn post_multipart(app: &Router, uri: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn octet_part<'a>(filename: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        field: "upload_file",
        filename,
        content_type: "application/octet-stream",
        data,
    }
}

fn stored_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

fn sample_payload() -> Vec<u8> {
    (0..300_000u32).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn buffered_and_chunked_write_identical_bytes() {
    let dir = temp_upload_dir("same");
    let app = uploads_app(UploadsConfig {
        upload_dir: dir.clone(),
        chunk_size: 4096,
        ..Default::default()
    })
    .await;
    let data = sample_payload();

    let (status, body) = post_multipart(
        &app,
        "/upload",
        &[Part {
            field: "upload_file",
            filename: "buffered.bin",
            content_type: "application/octet-stream",
            data: &data,
        }],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "filename": "buffered.bin",
            "content_type": "application/octet-stream",
            "size": data.len(),
            "strategy": "buffered"
        })
    );

    let (status, body) = post_multipart(
        &app,
        "/upload2",
        &[Part {
            field: "upload_file",
            filename: "chunked.bin",
            content_type: "application/octet-stream",
            data: &data,
        }],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "chunked");
    assert_eq!(body["size"], data.len());

    let buffered = fs::read(dir.join("buffered.bin")).expect("buffered file written");
    let chunked = fs::read(dir.join("chunked.bin")).expect("chunked file written");
    assert_eq!(buffered, data);
    assert_eq!(chunked, buffered);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn batch_upload_stores_every_part() {
    let dir = temp_upload_dir("batch");
    let app = uploads_app(UploadsConfig {
        upload_dir: dir.clone(),
        ..Default::default()
    })
    .await;

    let (status, body) = post_multipart(
        &app,
        "/upload_file",
        &[
            Part {
                field: "file_uploads",
                filename: "notes.txt",
                content_type: "text/plain",
                data: b"hello",
            },
            Part {
                field: "file_uploads",
                filename: "../escape.json",
                content_type: "application/json",
                data: b"{}",
            },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "filename": ["notes.txt", "escape.json"],
            "content_type": ["text/plain", "application/json"]
        })
    );
    assert_eq!(fs::read(dir.join("notes.txt")).expect("notes written"), b"hello");
    assert_eq!(fs::read(dir.join("escape.json")).expect("json written"), b"{}");

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_field_and_oversized_parts_are_rejected() {
    let dir = temp_upload_dir("limits");
    let app = uploads_app(UploadsConfig {
        upload_dir: dir.clone(),
        max_part_size: 1024,
        chunk_size: 256,
        ..Default::default()
    })
    .await;

    let (status, body) = post_multipart(
        &app,
        "/upload",
        &[Part {
            field: "something_else",
            filename: "a.txt",
            content_type: "text/plain",
            data: b"abc",
        }],
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "upload_file"]));

    let big = vec![b'x'; 2048];
    for uri in ["/upload", "/upload2"] {
        let (status, _) = post_multipart(
            &app,
            uri,
            &[Part {
                field: "upload_file",
                filename: "big.txt",
                content_type: "text/plain",
                data: &big,
            }],
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{uri}");
    }
    assert!(stored_files(&dir).is_empty(), "{:?}", stored_files(&dir));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn rejected_reupload_keeps_the_stored_file() {
    let dir = temp_upload_dir("keep");
    let app = uploads_app(UploadsConfig {
        upload_dir: dir.clone(),
        max_part_size: 1000,
        chunk_size: 128,
        ..Default::default()
    })
    .await;
    let small = vec![b'k'; 500];
    let big = vec![b'B'; 5000];

    for (uri, name) in [("/upload", "keep-buffered.bin"), ("/upload2", "keep-chunked.bin")] {
        let (status, _) = post_multipart(&app, uri, &[octet_part(name, &small)]).await;
        assert_eq!(status, StatusCode::OK, "{uri}");

        let (status, _) = post_multipart(&app, uri, &[octet_part(name, &big)]).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{uri}");
        assert_eq!(
            fs::read(dir.join(name)).expect("earlier upload still stored"),
            small,
            "{uri}"
        );
    }
    assert_eq!(
        stored_files(&dir),
        vec!["keep-buffered.bin", "keep-chunked.bin"]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn failed_batch_stores_nothing() {
    let dir = temp_upload_dir("mixed");
    let app = uploads_app(UploadsConfig {
        upload_dir: dir.clone(),
        max_part_size: 1000,
        ..Default::default()
    })
    .await;
    let big = vec![b'b'; 5000];

    let (status, body) = post_multipart(
        &app,
        "/upload_file",
        &[
            Part {
                field: "file_uploads",
                filename: "a.bin",
                content_type: "application/octet-stream",
                data: &[b'a'; 10],
            },
            Part {
                field: "file_uploads",
                filename: "b.bin",
                content_type: "application/octet-stream",
                data: &big,
            },
        ],
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["detail"].is_string());
    assert!(stored_files(&dir).is_empty(), "{:?}", stored_files(&dir));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn index_and_permissive_cors() {
    let app = uploads_app(UploadsConfig {
        upload_dir: temp_upload_dir("cors"),
        ..Default::default()
    })
    .await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://frontend.example")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://frontend.example")
    );
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        body,
        json!({ "Welcome": "You have entered the file-upload backend home page!" })
    );
}
