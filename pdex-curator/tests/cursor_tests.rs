//! Curation cursor integration tests

mod helpers;

use helpers::*;
use pdex_curator::services::cursor::RECORD_MISSING_LABEL;
use pdex_curator::services::CursorPosition;

#[tokio::test]
async fn test_resumes_at_first_asset_without_record() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "b.png", b"b");
    put_asset(&stores, "a.png", b"a");
    put_record(&stores, &sample_record("a", "LCB Sinner", "Yi Sang"));

    let view = test_catalog(&stores).resolve_entry_point(None).await.unwrap();

    match view.position {
        CursorPosition::Reviewing { index, total, asset, record, record_error } => {
            assert_eq!(index, 1);
            assert_eq!(total, 2);
            assert_eq!(asset.id, "b");
            assert!(record.is_none());
            assert!(record_error.is_none());
        }
        other => panic!("expected reviewing state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_store_is_complete() {
    let (_temp, stores) = test_stores();

    let view = test_catalog(&stores).resolve_entry_point(None).await.unwrap();

    assert_eq!(view.position, CursorPosition::Complete { total: 0 });
    assert!(view.listing.is_empty());
}

#[tokio::test]
async fn test_all_records_present_is_complete() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "a.png", b"a");
    put_record(&stores, &sample_record("a", "LCB Sinner", "Yi Sang"));

    let view = test_catalog(&stores).resolve_entry_point(None).await.unwrap();

    assert!(view.is_complete());
    assert_eq!(view.position, CursorPosition::Complete { total: 1 });
}

#[tokio::test]
async fn test_explicit_index_overrides_resume_point() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "a.png", b"a");
    put_asset(&stores, "b.png", b"b");
    put_record(&stores, &sample_record("a", "LCB Sinner", "Yi Sang"));
    let catalog = test_catalog(&stores);

    let view = catalog.resolve_entry_point(Some("0")).await.unwrap();
    match view.position {
        CursorPosition::Reviewing { index, asset, record, .. } => {
            assert_eq!(index, 0);
            assert_eq!(asset.id, "a");
            assert_eq!(record.unwrap().character_name, "Yi Sang");
        }
        other => panic!("expected reviewing state, got {:?}", other),
    }

    let past_end = catalog.resolve_entry_point(Some("2")).await.unwrap();
    assert_eq!(past_end.position, CursorPosition::Complete { total: 2 });
}

#[tokio::test]
async fn test_malformed_index_normalizes_to_zero() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "a.png", b"a");
    put_asset(&stores, "b.png", b"b");
    let catalog = test_catalog(&stores);

    for raw in ["abc", "-1", ""] {
        let view = catalog.resolve_entry_point(Some(raw)).await.unwrap();
        match view.position {
            CursorPosition::Reviewing { index, .. } => assert_eq!(index, 0, "raw index {:?}", raw),
            other => panic!("expected reviewing state for {:?}, got {:?}", raw, other),
        }
    }
}

#[tokio::test]
async fn test_listing_labels() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "a.png", b"a");
    put_asset(&stores, "b.png", b"b");
    put_asset(&stores, "c.png", b"c");
    put_record(&stores, &sample_record("a", "LCB Sinner", "Yi Sang"));
    put_record(&stores, &sample_record("c", "  ", "Faust"));

    let view = test_catalog(&stores).resolve_entry_point(None).await.unwrap();

    let labels: Vec<(usize, &str, &str)> = view
        .listing
        .iter()
        .map(|e| (e.index, e.asset_id.as_str(), e.label.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (0, "a", "[LCB Sinner] Yi Sang"),
            (1, "b", RECORD_MISSING_LABEL),
            (2, "c", "[이름없음] Faust"),
        ]
    );
}

#[tokio::test]
async fn test_unreadable_record_is_reported_not_fatal() {
    let (_temp, stores) = test_stores();
    put_asset(&stores, "a.png", b"a");
    std::fs::write(stores.metadata.join("a.json"), b"{ not json").unwrap();

    let view = test_catalog(&stores).resolve_entry_point(Some("0")).await.unwrap();

    match view.position {
        CursorPosition::Reviewing { record, record_error, .. } => {
            assert!(record.is_none());
            assert!(record_error.is_some());
        }
        other => panic!("expected reviewing state, got {:?}", other),
    }
    assert_eq!(view.listing[0].label, RECORD_MISSING_LABEL);
}
