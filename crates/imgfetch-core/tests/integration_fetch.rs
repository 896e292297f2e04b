//! Integration tests: real curl transport against a local HTTP server.

mod common;

use std::time::Duration;

use common::image_server::{self, Route};
use imgfetch_core::safety::SafetyValidator;
use imgfetch_core::transport::CurlTransport;
use imgfetch_core::{BatchRunner, DedupIndex, FetchError, FetchOutcome, ImageFetcher};
use tempfile::tempdir;

fn fetcher(timeout: Duration) -> ImageFetcher {
    ImageFetcher::new(CurlTransport::new(timeout), SafetyValidator::default())
}

fn png_body() -> Vec<u8> {
    let mut body = b"\x89PNG\r\n\x1a\n".to_vec();
    body.extend((0u8..200).cycle().take(48 * 1024));
    body
}

#[test]
fn identical_content_under_two_paths_is_saved_once() {
    let body = png_body();
    let base = image_server::start(vec![
        ("/a/cat.png", Route::image("image/png", &body)),
        ("/b/same-cat.png", Route::image("image/png", &body)),
    ]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("Fetched_Images");
    let runner = BatchRunner::new(fetcher(Duration::from_secs(15)), &dest);
    let dedup = DedupIndex::new();

    let input = format!("{base}/a/cat.png, {base}/b/same-cat.png");
    let summary = runner.run([input], &dedup);

    assert_eq!(summary.written, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_distinct, 1);
    assert_eq!(std::fs::read(dest.join("cat.png")).unwrap(), body);
    assert!(!dest.join("same-cat.png").exists());
}

#[test]
fn timeout_in_the_middle_is_one_failure() {
    let base = image_server::start(vec![
        ("/one.png", Route::image("image/png", b"first image")),
        (
            "/slow.png",
            Route::image("image/png", b"too late").delayed(Duration::from_secs(4)),
        ),
        ("/three.gif", Route::image("image/gif", b"GIF89a third")),
    ]);
    let dir = tempdir().unwrap();
    let runner = BatchRunner::new(fetcher(Duration::from_secs(1)), dir.path());

    let summary = runner.run(
        [
            format!("{base}/one.png"),
            format!("{base}/slow.png"),
            format!("{base}/three.gif"),
        ],
        &DedupIndex::new(),
    );

    assert_eq!(summary.attempted(), 3);
    assert_eq!(summary.saved, 2);
    assert_eq!(summary.failed, 1);
    assert!(matches!(summary.results[1].error(), Some(FetchError::Timeout)));
    assert!(dir.path().join("one.png").exists());
    assert!(dir.path().join("three.gif").exists());
}

#[test]
fn http_404_reports_status_and_reason() {
    let base = image_server::start(vec![]);
    let dir = tempdir().unwrap();

    let r = fetcher(Duration::from_secs(5)).fetch(
        &format!("{base}/missing.png"),
        dir.path(),
        &DedupIndex::new(),
    );

    match r.error() {
        Some(FetchError::HttpStatus { code, reason }) => {
            assert_eq!(*code, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[test]
fn non_image_and_untyped_responses_are_rejected() {
    let base = image_server::start(vec![
        ("/page", Route::image("text/html; charset=utf-8", b"<html></html>")),
        ("/blob.png", Route::image("image/png", b"x").without_content_type()),
    ]);
    let dir = tempdir().unwrap();
    let dedup = DedupIndex::new();
    let f = fetcher(Duration::from_secs(5));

    let html = f.fetch(&format!("{base}/page"), dir.path(), &dedup);
    let untyped = f.fetch(&format!("{base}/blob.png"), dir.path(), &dedup);

    assert_eq!(html.error().map(FetchError::kind), Some("unsupported content type"));
    assert_eq!(untyped.error().map(FetchError::kind), Some("unsupported content type"));
    assert!(dedup.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn declared_size_over_ceiling_is_rejected() {
    let base = image_server::start(vec![("/big.png", Route::image("image/png", &png_body()))]);
    let dir = tempdir().unwrap();
    let f = ImageFetcher::new(CurlTransport::new(Duration::from_secs(5)), SafetyValidator::new(1024));

    let r = f.fetch(&format!("{base}/big.png"), dir.path(), &DedupIndex::new());

    assert_eq!(r.error().map(FetchError::kind), Some("exceeds size limit"));
    assert!(!dir.path().join("big.png").exists());
}

#[test]
fn missing_length_is_accepted_and_body_read_to_end() {
    let body = png_body();
    let base = image_server::start(vec![(
        "/stream/",
        Route::image("image/gif", &body).without_length(),
    )]);
    let dir = tempdir().unwrap();

    let r = fetcher(Duration::from_secs(5)).fetch(
        &format!("{base}/stream/"),
        dir.path(),
        &DedupIndex::new(),
    );

    assert_eq!(r.filename(), Some("downloaded_image.gif"));
    assert_eq!(r.bytes, body.len() as u64);
    assert_eq!(std::fs::read(dir.path().join("downloaded_image.gif")).unwrap(), body);
}

#[test]
fn refused_connection_is_connection_error() {
    let dir = tempdir().unwrap();
    let r = fetcher(Duration::from_secs(5)).fetch(
        &image_server::refused_url(),
        dir.path(),
        &DedupIndex::new(),
    );
    assert!(matches!(r.error(), Some(FetchError::Connection(_))));
}

#[test]
fn parallel_batch_saves_identical_content_once() {
    let body = png_body();
    let base = image_server::start(vec![
        ("/m1/pic.png", Route::image("image/png", &body)),
        ("/m2/pic.png", Route::image("image/png", &body)),
        ("/m3/pic.png", Route::image("image/png", &body)),
        ("/other.png", Route::image("image/png", b"different")),
    ]);
    let dir = tempdir().unwrap();
    let runner = BatchRunner::new(fetcher(Duration::from_secs(15)), dir.path()).with_workers(4);

    let urls: Vec<String> = ["/m1/pic.png", "/m2/pic.png", "/m3/pic.png", "/other.png"]
        .iter()
        .map(|p| format!("{base}{p}"))
        .collect();
    let summary = runner.run(&urls, &DedupIndex::new());

    assert_eq!(summary.written, 2);
    assert_eq!(summary.duplicates, 2);
    assert_eq!(summary.total_distinct, 2);
    let saved: Vec<_> = summary
        .results
        .iter()
        .filter(|r| matches!(r.outcome, FetchOutcome::Saved { .. }))
        .collect();
    assert_eq!(saved.len(), 2);
}
