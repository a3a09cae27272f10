//! End-to-end scenario runs: JSON in, filtered JSON out

use std::path::PathBuf;
use veil::VeilErrorKind;
use veil::filter::ContentItems;
use veil::scenario::Scenario;

const COLLECTIONS_JSON: &str = include_str!("fixtures/collections.json");
const TAGS_JSON: &str = include_str!("fixtures/tags.json");

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_collections_scenario() {
    let scenario = Scenario::from_json(COLLECTIONS_JSON).expect("failed to parse scenario");
    let result = scenario.run().expect("scenario should run");

    let ContentItems::Collections(collections) = &result.items else {
        panic!("expected collections, got {:?}", result.items.content_type());
    };
    let ids: Vec<u64> = collections.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1]);

    let first = &collections[0];
    let image_ids: Vec<u64> = first.images.iter().map(|i| i.id).collect();
    assert_eq!(image_ids, vec![10, 11]);
    assert_eq!(first.image.as_ref().map(|i| i.id), Some(10));

    assert_eq!(result.hidden.images, 1);
    assert_eq!(result.hidden.browsing_level, 1);
    // 2 lost its only image, 5 never had any
    assert_eq!(result.hidden.no_images, 2);
    assert_eq!(result.hidden.collections, 1);
    assert_eq!(result.hidden.users, 1);
}

#[test]
fn test_show_imageless_keeps_collection() {
    let mut scenario = Scenario::from_json(COLLECTIONS_JSON).expect("failed to parse scenario");
    scenario.options.show_imageless = true;

    let result = scenario.run().expect("scenario should run");

    let ContentItems::Collections(collections) = &result.items else {
        panic!("expected collections");
    };
    let ids: Vec<u64> = collections.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 5]);
    assert!(collections[1].images.is_empty());
    assert_eq!(result.hidden.no_images, 1);
}

#[test]
fn test_tags_scenario() {
    let result = Scenario::from_json(TAGS_JSON)
        .and_then(|s| s.run())
        .expect("scenario should run");

    let ContentItems::Tags(tags) = &result.items else {
        panic!("expected tags");
    };
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["landscape", "bikini"]);
    assert_eq!(result.hidden.tags, 1);
    assert_eq!(result.hidden.browsing_level, 1);
}

#[test]
fn test_load_from_file() {
    let scenario = Scenario::load(fixture_path("tags.json")).expect("failed to load scenario");
    assert_eq!(scenario.content_type().unwrap().as_str(), "tags");

    let err = Scenario::load(fixture_path("does-not-exist.json")).unwrap_err();
    assert_eq!(*err.kind(), VeilErrorKind::Io);
}

#[test]
fn test_output_shape() {
    let result = Scenario::from_json(TAGS_JSON)
        .and_then(|s| s.run())
        .expect("scenario should run");

    let json = serde_json::to_value(&result).unwrap();

    assert!(json["items"].is_array());
    assert_eq!(json["items"][0]["name"], "landscape");
    assert_eq!(json["hidden"]["browsingLevel"], 1);
    assert_eq!(json["hidden"]["noImages"], 0);
}

#[test]
fn test_unsupported_content_type() {
    let scenario = Scenario::from_json(r#"{ "contentType": "videos", "items": [] }"#)
        .expect("unknown types are only rejected when run");

    let err = scenario.run().unwrap_err();
    assert_eq!(*err.kind(), VeilErrorKind::UnsupportedType);
}

#[test]
fn test_items_of_wrong_shape() {
    let scenario = Scenario::from_json(
        r#"{ "contentType": "users", "viewer": { "browsingLevel": 1 }, "items": [{ "name": "no id" }] }"#,
    )
    .expect("items are parsed lazily");

    let err = scenario.run().unwrap_err();
    assert_eq!(*err.kind(), VeilErrorKind::Scenario);
}

#[test]
fn test_missing_items_short_circuit() {
    let scenario = Scenario::from_json(r#"{ "contentType": "posts", "viewer": { "browsingLevel": 3 } }"#)
        .expect("failed to parse scenario");

    let result = scenario.run().expect("scenario should run");

    assert_eq!(result.items, ContentItems::Posts(vec![]));
    assert!(result.hidden.is_empty());
}

#[test]
fn test_malformed_document() {
    let err = Scenario::from_json("{ not json").unwrap_err();
    assert_eq!(*err.kind(), VeilErrorKind::Scenario);
}

#[test]
fn test_concurrent_runs_agree() {
    let scenario = Scenario::from_json(COLLECTIONS_JSON).expect("failed to parse scenario");
    let expected = scenario.run().expect("scenario should run");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| scenario.run())).collect();
        for handle in handles {
            let result = handle
                .join()
                .expect("filter thread panicked")
                .expect("scenario should run");
            assert_eq!(result, expected);
        }
    });
}
