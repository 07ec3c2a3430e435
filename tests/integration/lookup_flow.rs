use kamoes::cache::CacheStore;
use kamoes::lookup::LookupService;
use kamoes::models::{Definition, Sense, SenseEntry};
use kamoes::resolver::Resolver;
use kamoes::test_utils::{StaticFetcher, fixtures, init_test_logging};
use kamoes::vocabulary::Vocabulary;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

async fn service(dir: &Path, fetcher: &Arc<StaticFetcher>, words: &[&str]) -> LookupService {
    let cache = CacheStore::open(dir).await.unwrap();
    let vocabulary = Arc::new(Vocabulary::from_words(words.iter().copied()));
    LookupService::new(cache, vocabulary, Resolver::new(fetcher.clone(), 5), true)
}

fn standard_fetcher() -> Arc<StaticFetcher> {
    Arc::new(
        StaticFetcher::new()
            .with_page("rumah", fixtures::RUMAH)
            .with_page("jaman", fixtures::JAMAN)
            .with_page("zaman", fixtures::ZAMAN)
            .with_page("juang", fixtures::JUANG),
    )
}

#[tokio::test]
async fn test_rumah_is_fetched_once_and_persisted() {
    init_test_logging(None);
    let temp = tempdir().unwrap();
    let fetcher = standard_fetcher();
    let lookup = service(temp.path(), &fetcher, &["rumah"]).await;

    let first = lookup.lookup("rumah").await.unwrap().unwrap();
    let second = lookup.lookup("rumah").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert!(first[0].is_canonical);
    assert_eq!(first[0].senses.len(), 2);
    assert_eq!(fetcher.fetch_count("rumah"), 1);
    assert!(temp.path().join("rumah.json").exists());
}

#[tokio::test]
async fn test_single_noun_sense_lookup() {
    let temp = tempdir().unwrap();
    let fetcher = Arc::new(StaticFetcher::new().with_page("rumah", fixtures::RUMAH_NOMINA));
    let lookup = service(temp.path(), &fetcher, &["rumah"]).await;

    let result = lookup.lookup("rumah").await.unwrap().unwrap();

    assert_eq!(
        result,
        vec![Definition {
            syllabification: Some("ru.mah".to_string()),
            root_word: None,
            pronunciation_spelling: Some("rumah".to_string()),
            is_canonical: true,
            alternate_form: None,
            senses: vec![SenseEntry::Sense(Sense {
                part_of_speech: Some("n".to_string()),
                part_of_speech_label: Some("nomina".to_string()),
                gloss: "bangunan untuk tempat tinggal".to_string(),
                example: None,
                attributions: vec![],
            })],
        }]
    );

    let stored = std::fs::read_to_string(temp.path().join("rumah.json")).unwrap();
    let stored: Vec<Definition> = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, result);
}

#[tokio::test]
async fn test_jaman_carries_zaman_senses() {
    let temp = tempdir().unwrap();
    let fetcher = standard_fetcher();
    let lookup = service(temp.path(), &fetcher, &["jaman", "zaman"]).await;

    let jaman = lookup.lookup("jaman").await.unwrap().unwrap();
    let zaman = lookup.lookup("zaman").await.unwrap().unwrap();

    assert!(!jaman[0].is_canonical);
    assert_eq!(jaman[0].alternate_form.as_deref(), Some("za.man"));
    assert_eq!(jaman[0].senses, zaman[0].senses);

    match &zaman[0].senses[0] {
        SenseEntry::Sense(sense) => {
            assert_eq!(sense.example.as_deref(), Some("zaman batu"));
            assert!(!sense.gloss.ends_with(':'));
        }
        other => panic!("Expected a glossed sense, got {other:?}"),
    }

    // Redirect targets are refetched; each lookup resolves from the network.
    assert!(lookup.cache().has("jaman"));
    assert!(lookup.cache().has("zaman"));
    assert_eq!(fetcher.fetch_count("zaman"), 2);
}

#[tokio::test]
async fn test_artifacts_survive_restart() {
    let temp = tempdir().unwrap();
    let fetcher = standard_fetcher();

    {
        let lookup = service(temp.path(), &fetcher, &["rumah", "juang"]).await;
        lookup.lookup("rumah").await.unwrap().unwrap();
        lookup.lookup("juang").await.unwrap().unwrap();
    }

    let offline = Arc::new(StaticFetcher::new());
    let lookup = service(temp.path(), &offline, &[]).await;

    assert_eq!(lookup.cache().words(), vec!["juang".to_string(), "rumah".to_string()]);
    let juang = lookup.lookup("juang").await.unwrap().unwrap();
    assert!(matches!(&juang[0].senses[0], SenseEntry::Reference(r) if r.targets.len() == 3));
    assert_eq!(offline.total_fetches(), 0);
}

#[tokio::test]
async fn test_multi_word_artifact_name() {
    let temp = tempdir().unwrap();
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("rumah sakit", &fixtures::cross_reference("rumah sakit", "rumah"))
            .with_page("rumah", fixtures::RUMAH),
    );
    let lookup = service(temp.path(), &fetcher, &["rumah sakit"]).await;

    lookup.lookup("rumah sakit").await.unwrap().unwrap();
    assert!(temp.path().join("rumah_sakit.json").exists());

    let reopened = CacheStore::open(temp.path()).await.unwrap();
    assert!(reopened.has("rumah sakit"));
}

#[tokio::test]
async fn test_concurrent_lookups_of_different_words() {
    let temp = tempdir().unwrap();
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("rumah", fixtures::RUMAH)
            .with_page("zaman", fixtures::ZAMAN)
            .with_page("juang", fixtures::JUANG)
            .with_delay(Duration::from_millis(50)),
    );
    let lookup = service(temp.path(), &fetcher, &["rumah", "zaman", "juang"]).await;

    let results = futures::future::join_all(
        ["rumah", "zaman", "juang", "rumah", "zaman"].map(|w| {
            let lookup = lookup.clone();
            async move { lookup.lookup(w).await }
        }),
    )
    .await;

    assert!(results.iter().all(|r| matches!(r, Ok(Some(_)))));
    assert_eq!(lookup.cache().len(), 3);
    assert_eq!(fetcher.fetch_count("rumah"), 1);
    assert_eq!(fetcher.fetch_count("zaman"), 1);
}
