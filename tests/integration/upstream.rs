use kamoes::core::KamoesError;
use kamoes::extractor::{EntryBlock, extract_document};
use kamoes::fetcher::{DocumentFetcher, HttpFetcher};
use std::time::Duration;

use super::common::Upstream;

fn fetcher(upstream: &Upstream) -> HttpFetcher {
    HttpFetcher::new(&upstream.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_extract() {
    let upstream = Upstream::start().await;

    let html = fetcher(&upstream).fetch("bisa").await.unwrap();
    let blocks = extract_document(&html);

    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| matches!(b, EntryBlock::Entry(_))));
}

#[tokio::test]
async fn test_multi_word_path_is_encoded() {
    let upstream = Upstream::with_pages([("rumah sakit", "<html></html>".to_string())]).await;

    let html = fetcher(&upstream).fetch("rumah sakit").await.unwrap();
    assert_eq!(html, "<html></html>");
    assert_eq!(upstream.hits("rumah sakit"), 1);
}

#[tokio::test]
async fn test_error_statuses_are_upstream_errors() {
    let upstream = Upstream::start().await;
    let fetcher = fetcher(&upstream);

    for (word, status) in [("sibuk", "429"), ("tidakada", "404")] {
        let err = fetcher.fetch(word).await.unwrap_err();
        match err.downcast_ref::<KamoesError>() {
            Some(KamoesError::UpstreamError {
                word: w,
                reason,
            }) => {
                assert_eq!(w, word);
                assert!(reason.contains(status), "{reason}");
            }
            other => panic!("Expected UpstreamError, got {other:?}"),
        }
    }
}
